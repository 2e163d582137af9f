//! Situational analysis for one decision.
//!
//! The [`AiContext`] is the "blackboard" the generator reads from. It is
//! computed once per decision and provides:
//!
//! - The actor's own pool ratios and status-modified stats
//! - A [`ThreatLevel`] for the actor
//! - Allies in need (critical and injured) and fallen allies
//! - The strongest and weakest enemies

use game_core::{Combatant, CombatConfig, EffectiveStats, EntityId};

use super::types::ThreatLevel;

/// Allies below this HP ratio are critical.
pub const CRITICAL_HP: f32 = 0.3;
/// Allies below this HP ratio are injured.
pub const INJURED_HP: f32 = 0.7;

/// Context for one decision of one actor.
///
/// # Lifetime
///
/// Borrows the combatants from the battle state; the decision is made
/// synchronously before any mutation, so the borrow never outlives a turn.
#[derive(Debug)]
pub struct AiContext<'a> {
    /// The entity making the decision.
    pub actor: &'a Combatant,
    pub stats: EffectiveStats,

    /// Living allies, including the actor.
    pub allies: Vec<&'a Combatant>,
    /// Dead allies (revive targets).
    pub fallen: Vec<&'a Combatant>,
    /// Living enemies.
    pub enemies: Vec<&'a Combatant>,

    pub hp_ratio: f32,
    pub brave_ratio: f32,
    pub mp_ratio: f32,

    /// Raw pressure the threat level was banded from.
    pub pressure: f32,
    pub threat: ThreatLevel,

    /// Living allies under [`CRITICAL_HP`], most hurt first.
    pub critical_allies: Vec<EntityId>,
    /// Living allies under [`INJURED_HP`] (critical ones included), most hurt first.
    pub injured_allies: Vec<EntityId>,

    /// Enemy with the highest offensive stat.
    pub strongest_enemy: Option<EntityId>,
    /// Enemy with the lowest current HP.
    pub weakest_enemy: Option<EntityId>,

    pub config: &'a CombatConfig,
}

impl<'a> AiContext<'a> {
    /// Analyzes the battlefield from `actor`'s point of view.
    ///
    /// `allies` may contain dead members and the actor itself; `enemies`
    /// are filtered to the living.
    pub fn analyze(
        actor: &'a Combatant,
        allies: &[&'a Combatant],
        enemies: &[&'a Combatant],
        config: &'a CombatConfig,
    ) -> Self {
        let stats = EffectiveStats::of(actor, config);

        let (living, fallen): (Vec<&Combatant>, Vec<&Combatant>) =
            allies.iter().copied().partition(|c| c.is_alive());
        let enemies: Vec<&Combatant> = enemies.iter().copied().filter(|c| c.is_alive()).collect();

        let mut by_hp: Vec<&Combatant> = living.clone();
        by_hp.sort_by(|a, b| a.hp_ratio().total_cmp(&b.hp_ratio()));
        let critical_allies = by_hp
            .iter()
            .filter(|c| c.hp_ratio() < CRITICAL_HP)
            .map(|c| c.id)
            .collect();
        let injured_allies = by_hp
            .iter()
            .filter(|c| c.hp_ratio() < INJURED_HP)
            .map(|c| c.id)
            .collect();

        let offense_of = |c: &Combatant| {
            let s = EffectiveStats::of(c, config);
            s.attack.max(s.magic)
        };
        let strongest_enemy = enemies
            .iter()
            .map(|c| (c.id, offense_of(c)))
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id);
        let weakest_enemy = enemies.iter().min_by_key(|c| c.hp).map(|c| c.id);

        let hp_ratio = actor.hp_ratio();
        let offense: f32 = enemies.iter().map(|c| offense_of(c)).sum();
        let defense = ((stats.defense + stats.magic_defense) / 2.0).max(1.0);
        let pressure = offense / defense * (2.0 - hp_ratio);

        let mut threat = ThreatLevel::from_pressure(pressure);
        // Any enemy whose stored Brave already covers our HP can finish us.
        if enemies.iter().any(|e| e.brave >= actor.hp) {
            threat = threat.escalate();
        }

        tracing::trace!(
            actor = %actor.id,
            pressure,
            %threat,
            "situation analyzed"
        );

        Self {
            actor,
            stats,
            allies: living,
            fallen,
            enemies,
            hp_ratio,
            brave_ratio: actor.brave_ratio(),
            mp_ratio: actor.mp_ratio(),
            pressure,
            threat,
            critical_allies,
            injured_allies,
            strongest_enemy,
            weakest_enemy,
            config,
        }
    }

    pub fn is_critical(&self, id: EntityId) -> bool {
        self.critical_allies.contains(&id)
    }

    /// True when some ally would benefit from healing.
    pub fn has_injured_allies(&self) -> bool {
        !self.injured_allies.is_empty()
    }

    pub fn ally(&self, id: EntityId) -> Option<&'a Combatant> {
        self.allies.iter().copied().find(|c| c.id == id)
    }

    pub fn enemy(&self, id: EntityId) -> Option<&'a Combatant> {
        self.enemies.iter().copied().find(|c| c.id == id)
    }
}

/// Number of harmful effects on `combatant`.
pub fn harmful_effects(combatant: &Combatant) -> usize {
    combatant
        .statuses
        .iter()
        .filter(|e| e.tag.category().is_harmful())
        .count()
}
