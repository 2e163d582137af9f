//! Combatant-level status operations: application, per-turn processing,
//! eligibility queries.

use super::collection::{ApplyOutcome, CleanseFilter};
use super::effect::StatusEffect;
use super::tag::{StatusCategory, StatusTag};
use crate::state::{Combatant, EntityId};

/// Something that happened while processing a combatant's statuses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusEvent {
    Damaged { tag: StatusTag, amount: u32 },
    Healed { tag: StatusTag, amount: u32 },
    Expired { tag: StatusTag },
    /// The owner died from the named over-time effect.
    Died { tag: StatusTag },
}

/// Outcome of one [`process_tick`] pass.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickReport {
    pub entity: EntityId,
    pub events: Vec<StatusEvent>,
    pub died: bool,
}

impl TickReport {
    pub fn total_damage(&self) -> u32 {
        self.events
            .iter()
            .map(|e| match e {
                StatusEvent::Damaged { amount, .. } => *amount,
                _ => 0,
            })
            .sum()
    }

    pub fn total_healing(&self) -> u32 {
        self.events
            .iter()
            .map(|e| match e {
                StatusEvent::Healed { amount, .. } => *amount,
                _ => 0,
            })
            .sum()
    }
}

/// Merges `effect` into `target`'s statuses. Dead targets are left alone.
pub fn apply(target: &mut Combatant, effect: StatusEffect) -> ApplyOutcome {
    if !target.is_alive() {
        return ApplyOutcome::Ignored;
    }
    target.statuses.apply(effect)
}

/// Runs one processing pass over `combatant`'s statuses.
///
/// Order: damage-over-time, heal-over-time, then passive effects. Every
/// effect releases its payload, loses one turn of duration and is removed
/// with an `Expired` event at 0. A lethal DoT stops the pass; the death
/// transition clears the remaining effects.
pub fn process_tick(combatant: &mut Combatant) -> TickReport {
    let mut report = TickReport {
        entity: combatant.id,
        events: Vec::new(),
        died: false,
    };
    if !combatant.is_alive() {
        return report;
    }

    for phase in 0..=2u8 {
        let mut index = 0;
        while let Some(effect) = combatant.statuses.at(index) {
            if effect.tag.tick_phase() != phase {
                index += 1;
                continue;
            }

            let amount = effect.tick_amount();
            match effect.tag.category() {
                StatusCategory::DamageOverTime => {
                    let dealt = combatant.take_hp_damage(amount);
                    report.events.push(StatusEvent::Damaged {
                        tag: effect.tag,
                        amount: dealt,
                    });
                    if !combatant.is_alive() {
                        tracing::debug!(
                            entity = %combatant.id,
                            tag = %effect.tag,
                            "status tick was lethal"
                        );
                        report.events.push(StatusEvent::Died { tag: effect.tag });
                        report.died = true;
                        return report;
                    }
                }
                StatusCategory::HealOverTime => {
                    let healed = combatant.heal(amount);
                    report.events.push(StatusEvent::Healed {
                        tag: effect.tag,
                        amount: healed,
                    });
                }
                _ => {}
            }

            let expired = match combatant.statuses.at_mut(index) {
                Some(slot) => {
                    slot.remaining_total = slot.remaining_total.saturating_sub(amount);
                    slot.duration = slot.duration.saturating_sub(1);
                    slot.duration == 0
                }
                None => false,
            };
            if expired {
                combatant.statuses.remove_at(index);
                report.events.push(StatusEvent::Expired { tag: effect.tag });
            } else {
                index += 1;
            }
        }
    }

    report
}

pub fn can_act(combatant: &Combatant) -> bool {
    combatant.is_alive() && combatant.statuses.can_act()
}

pub fn can_use_skills(combatant: &Combatant) -> bool {
    combatant.is_alive() && combatant.statuses.can_use_skills()
}

pub fn cleanse(combatant: &mut Combatant, filter: CleanseFilter) -> Vec<StatusTag> {
    combatant.statuses.cleanse(filter)
}

pub fn active_effects(combatant: &Combatant) -> impl Iterator<Item = &StatusEffect> {
    combatant.statuses.iter()
}
