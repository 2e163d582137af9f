//! Resolution output consumed by logging, UI cues and the decision engine.

use crate::action::ActionKind;
use crate::state::EntityId;
use crate::status::{ApplyOutcome, StatusTag};

/// One observable step of a resolution, in the order it happened.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatEvent {
    MpSpent { actor: EntityId, amount: u32 },
    ResourceSpent { actor: EntityId, name: String, amount: u32 },
    ResourceGained { actor: EntityId, name: String, amount: u32 },
    Hit { target: EntityId },
    Miss { target: EntityId },
    Critical { target: EntityId },
    BraveDamage { target: EntityId, amount: u32 },
    BraveGained { actor: EntityId, amount: u32 },
    /// Attacker Brave consumed by an HP attack.
    BraveSpent { actor: EntityId, amount: u32 },
    Break { target: EntityId },
    HpDamage { target: EntityId, amount: u32 },
    Healed { target: EntityId, amount: u32 },
    Revived { target: EntityId, hp: u32 },
    StatusApplied { target: EntityId, tag: StatusTag, outcome: ApplyOutcome },
    /// Chance roll failed or the merge rejected the effect.
    StatusResisted { target: EntityId, tag: StatusTag },
    Cleansed { target: EntityId, tags: Vec<StatusTag> },
    Guarding { actor: EntityId },
    Died { target: EntityId },
}

/// Per-target sums.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetTotals {
    pub target: EntityId,
    pub brave_damage: u32,
    pub hp_damage: u32,
    pub healed: u32,
    pub hit: bool,
    pub critical: bool,
    pub killed: bool,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolutionReport {
    pub actor: EntityId,
    pub kind: ActionKind,
    pub skill: String,
    /// Nonce the action resolved under.
    pub nonce: u64,
    pub events: Vec<CombatEvent>,
    pub totals: Vec<TargetTotals>,
    /// Echo of `BattleContext::effects_enabled`.
    pub effects_enabled: bool,
}

impl ResolutionReport {
    pub fn new(
        actor: EntityId,
        kind: ActionKind,
        skill: impl Into<String>,
        nonce: u64,
        effects_enabled: bool,
    ) -> Self {
        Self {
            actor,
            kind,
            skill: skill.into(),
            nonce,
            events: Vec::new(),
            totals: Vec::new(),
            effects_enabled,
        }
    }

    pub(crate) fn push(&mut self, event: CombatEvent) {
        self.events.push(event);
    }

    pub(crate) fn totals_mut(&mut self, target: EntityId) -> &mut TargetTotals {
        let index = match self.totals.iter().position(|t| t.target == target) {
            Some(index) => index,
            None => {
                self.totals.push(TargetTotals {
                    target,
                    ..TargetTotals::default()
                });
                self.totals.len() - 1
            }
        };
        &mut self.totals[index]
    }

    pub fn total_brave_damage(&self) -> u32 {
        self.totals.iter().map(|t| t.brave_damage).sum()
    }

    pub fn total_hp_damage(&self) -> u32 {
        self.totals.iter().map(|t| t.hp_damage).sum()
    }

    pub fn total_healing(&self) -> u32 {
        self.totals.iter().map(|t| t.healed).sum()
    }

    pub fn hits(&self) -> usize {
        self.count(|e| matches!(e, CombatEvent::Hit { .. }))
    }

    pub fn misses(&self) -> usize {
        self.count(|e| matches!(e, CombatEvent::Miss { .. }))
    }

    pub fn kills(&self) -> Vec<EntityId> {
        self.events
            .iter()
            .filter_map(|e| match e {
                CombatEvent::Died { target } => Some(*target),
                _ => None,
            })
            .collect()
    }

    pub fn broke_any(&self) -> bool {
        self.events.iter().any(|e| matches!(e, CombatEvent::Break { .. }))
    }

    pub fn statuses_landed(&self) -> usize {
        self.count(|e| matches!(e, CombatEvent::StatusApplied { .. }))
    }

    fn count(&self, predicate: impl Fn(&CombatEvent) -> bool) -> usize {
        self.events.iter().filter(|e| predicate(e)).count()
    }
}
