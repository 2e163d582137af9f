//! Readiness scheduler (ATB).
//!
//! Every living combatant fills its gauge by its effective speed each tick.
//! A combatant whose gauge reaches the threshold is ready; once it has acted
//! the gauge resets. Actions with a cast time park the actor in a casting
//! state that completes when the gauge has refilled by the cast duration.
//!
//! Gauges live on [`Combatant`](crate::state::Combatant) so a battle snapshot
//! carries them; the scheduler owns only the in-progress casts and the
//! acting marker.

use crate::action::Action;
use crate::config::CombatConfig;
use crate::state::{BattleState, Combatant, EntityId};
use crate::stats::EffectiveStats;

/// Per-entity scheduling phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ReadinessPhase {
    /// Gauge empty.
    Idle,
    Charging,
    Ready,
    /// Chosen to act; awaiting its action.
    Acting,
    Casting,
    /// Cast completed; action is being resolved.
    Resolving,
    Dead,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct CastState {
    entity: EntityId,
    action: Action,
    start_gauge: u32,
    duration: u32,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scheduler {
    threshold: u32,
    tick_rate: u32,
    /// Ticks advanced since the encounter started.
    clock: u64,
    casts: Vec<CastState>,
    active: Option<(EntityId, ReadinessPhase)>,
}

impl Scheduler {
    pub fn new(threshold: u32, tick_rate: u32) -> Self {
        Self {
            threshold: threshold.max(1),
            tick_rate: tick_rate.max(1),
            clock: 0,
            casts: Vec::new(),
            active: None,
        }
    }

    pub fn from_config(config: &CombatConfig) -> Self {
        Self::new(config.ready_threshold, config.tick_rate)
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn clock(&self) -> u64 {
        self.clock
    }

    /// Fills every living gauge by `effective speed × tick_rate`.
    ///
    /// Casting entities charge like everyone else; growth never depends on
    /// cast or cancel state. Dead combatants are skipped.
    pub fn advance_tick(&mut self, battle: &mut BattleState, config: &CombatConfig) {
        self.clock += 1;
        for combatant in battle.iter_mut().filter(|c| c.is_alive()) {
            let speed = EffectiveStats::of(combatant, config).gauge_speed();
            let step = speed.saturating_mul(self.tick_rate);
            combatant.gauge = combatant.gauge.saturating_add(step).min(self.threshold);
        }
        tracing::trace!(clock = self.clock, "gauges advanced");
    }

    /// Living, non-casting combatants at the threshold.
    ///
    /// Player-controlled entities come first, then insertion order.
    pub fn ready_entities(&self, battle: &BattleState) -> Vec<EntityId> {
        self.ordered(battle, |c| {
            c.is_alive() && c.gauge >= self.threshold && !self.is_casting(c.id)
        })
    }

    pub fn is_ready(&self, battle: &BattleState, entity: EntityId) -> bool {
        battle.get(entity).is_some_and(|c| {
            c.is_alive() && c.gauge >= self.threshold && !self.is_casting(entity)
        })
    }

    pub fn is_casting(&self, entity: EntityId) -> bool {
        self.casts.iter().any(|c| c.entity == entity)
    }

    /// Marks `entity` as the one whose action is being chosen.
    pub fn begin_turn(&mut self, entity: EntityId) {
        self.active = Some((entity, ReadinessPhase::Acting));
    }

    /// Marks `entity` as resolving a completed cast.
    pub fn begin_resolution(&mut self, entity: EntityId) {
        self.active = Some((entity, ReadinessPhase::Resolving));
    }

    /// Empties the gauge and drops any cast state.
    pub fn reset(&mut self, battle: &mut BattleState, entity: EntityId) {
        if let Some(combatant) = battle.get_mut(entity) {
            combatant.gauge = 0;
        }
        self.casts.retain(|c| c.entity != entity);
        self.clear_active(entity);
    }

    /// Parks `action` until the actor's gauge refills by `duration`.
    ///
    /// The gauge is emptied when the cast begins, so the start snapshot is 0.
    /// `duration` is clamped to `[1, threshold]`; an entity already casting
    /// has its previous cast replaced.
    pub fn begin_cast(
        &mut self,
        battle: &mut BattleState,
        entity: EntityId,
        action: Action,
        duration: u32,
    ) {
        let Some(combatant) = battle.get_mut(entity) else {
            return;
        };
        if !combatant.is_alive() {
            return;
        }
        combatant.gauge = 0;
        let duration = duration.clamp(1, self.threshold);
        self.casts.retain(|c| c.entity != entity);
        tracing::debug!(%entity, skill = %action.skill.name, duration, "cast started");
        self.casts.push(CastState {
            entity,
            action,
            start_gauge: 0,
            duration,
        });
        self.clear_active(entity);
    }

    /// Fraction of the cast completed, `0.0..=1.0`. `None` when not casting.
    pub fn cast_progress(&self, battle: &BattleState, entity: EntityId) -> Option<f32> {
        let cast = self.casts.iter().find(|c| c.entity == entity)?;
        let gauge = battle.get(entity).map_or(0, |c| c.gauge);
        Some(Self::progress(cast, gauge))
    }

    /// Removes and returns every cast that has fully charged, in the same
    /// order as [`Self::ready_entities`].
    pub fn poll_completed_casts(&mut self, battle: &BattleState) -> Vec<(EntityId, Action)> {
        let done = self.ordered(battle, |c| {
            c.is_alive()
                && self
                    .casts
                    .iter()
                    .any(|cast| cast.entity == c.id && Self::progress(cast, c.gauge) >= 1.0)
        });

        let mut completed = Vec::with_capacity(done.len());
        for entity in done {
            if let Some(index) = self.casts.iter().position(|c| c.entity == entity) {
                let cast = self.casts.remove(index);
                completed.push((entity, cast.action));
            }
        }
        completed
    }

    /// Abandons `entity`'s cast and returns the discarded action.
    ///
    /// The gauge keeps its current value and the entity rejoins normal
    /// scheduling straight away. No-op for an entity that is not casting.
    pub fn cancel_cast(&mut self, entity: EntityId) -> Option<Action> {
        let index = self.casts.iter().position(|c| c.entity == entity)?;
        let cast = self.casts.remove(index);
        tracing::debug!(%entity, skill = %cast.action.skill.name, "cast cancelled");
        Some(cast.action)
    }

    /// Drops casts and markers of combatants that are no longer alive.
    pub fn drop_dead(&mut self, battle: &BattleState) -> Vec<EntityId> {
        let alive = |id: EntityId| battle.get(id).is_some_and(Combatant::is_alive);
        let dropped: Vec<EntityId> = self
            .casts
            .iter()
            .map(|c| c.entity)
            .filter(|id| !alive(*id))
            .collect();
        self.casts.retain(|c| alive(c.entity));
        if let Some((id, _)) = self.active
            && !alive(id)
        {
            self.active = None;
        }
        dropped
    }

    pub fn phase(&self, battle: &BattleState, entity: EntityId) -> ReadinessPhase {
        let Some(combatant) = battle.get(entity) else {
            return ReadinessPhase::Dead;
        };
        if !combatant.is_alive() {
            return ReadinessPhase::Dead;
        }
        if let Some((id, phase)) = self.active
            && id == entity
        {
            return phase;
        }
        if self.is_casting(entity) {
            ReadinessPhase::Casting
        } else if combatant.gauge >= self.threshold {
            ReadinessPhase::Ready
        } else if combatant.gauge > 0 {
            ReadinessPhase::Charging
        } else {
            ReadinessPhase::Idle
        }
    }

    fn clear_active(&mut self, entity: EntityId) {
        if self.active.is_some_and(|(id, _)| id == entity) {
            self.active = None;
        }
    }

    fn progress(cast: &CastState, gauge: u32) -> f32 {
        let charged = gauge.saturating_sub(cast.start_gauge);
        (charged as f32 / cast.duration as f32).clamp(0.0, 1.0)
    }

    fn ordered(&self, battle: &BattleState, keep: impl Fn(&Combatant) -> bool) -> Vec<EntityId> {
        let (players, others): (Vec<&Combatant>, Vec<&Combatant>) =
            battle.iter().filter(|c| keep(c)).partition(|c| c.is_player());
        players.into_iter().chain(others).map(|c| c.id).collect()
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::from_config(&CombatConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionKind, SkillDescriptor, TargetSpec};
    use crate::state::{Controller, Side};
    use crate::stats::CoreStats;
    use crate::status::{StatusEffect, StatusTag};

    fn unit(id: u32, side: Side, speed: u32) -> Combatant {
        Combatant::new(EntityId(id), format!("u{id}"), side)
            .with_stats(CoreStats::uniform(10).with_speed(speed))
    }

    fn fireball(actor: EntityId, target: EntityId) -> Action {
        let skill = SkillDescriptor::new("Fireball", ActionKind::BraveAttack).with_cast_time(5_000);
        Action::new(actor, skill, TargetSpec::Single(target))
    }

    #[test]
    fn speed_fifty_needs_two_hundred_ticks() {
        let config = CombatConfig::default();
        let mut battle = BattleState::from_combatants([unit(1, Side::Party, 50)]);
        let mut scheduler = Scheduler::from_config(&config);

        for _ in 0..199 {
            scheduler.advance_tick(&mut battle, &config);
            assert!(scheduler.ready_entities(&battle).is_empty());
        }
        scheduler.advance_tick(&mut battle, &config);
        assert_eq!(scheduler.ready_entities(&battle), vec![EntityId(1)]);
        assert_eq!(scheduler.clock(), 200);
    }

    #[test]
    fn gauge_is_monotonic_and_clamped() {
        let config = CombatConfig::default();
        let mut battle = BattleState::from_combatants([unit(1, Side::Party, 999)]);
        let mut scheduler = Scheduler::from_config(&config);
        let mut last = 0;
        for _ in 0..30 {
            scheduler.advance_tick(&mut battle, &config);
            let gauge = battle.get(EntityId(1)).unwrap().gauge;
            assert!(gauge >= last);
            assert!(gauge <= config.ready_threshold);
            last = gauge;
        }
        assert_eq!(last, config.ready_threshold);
    }

    #[test]
    fn slow_status_delays_readiness() {
        let config = CombatConfig::default();
        let mut battle =
            BattleState::from_combatants([unit(1, Side::Party, 100), unit(2, Side::Enemy, 100)]);
        battle
            .get_mut(EntityId(2))
            .unwrap()
            .statuses
            .apply(StatusEffect::new(StatusTag::Slow, 5, 0.5));
        let mut scheduler = Scheduler::from_config(&config);
        for _ in 0..100 {
            scheduler.advance_tick(&mut battle, &config);
        }
        assert_eq!(scheduler.ready_entities(&battle), vec![EntityId(1)]);
        assert_eq!(battle.get(EntityId(2)).unwrap().gauge, 5_000);
    }

    #[test]
    fn dead_entities_never_charge() {
        let config = CombatConfig::default();
        let mut battle = BattleState::from_combatants([unit(1, Side::Party, 100)]);
        battle.get_mut(EntityId(1)).unwrap().mark_dead();
        let mut scheduler = Scheduler::from_config(&config);
        for _ in 0..500 {
            scheduler.advance_tick(&mut battle, &config);
        }
        assert_eq!(battle.get(EntityId(1)).unwrap().gauge, 0);
        assert_eq!(scheduler.phase(&battle, EntityId(1)), ReadinessPhase::Dead);
    }

    #[test]
    fn players_come_before_insertion_order() {
        let config = CombatConfig::default();
        let mut battle = BattleState::from_combatants([
            unit(1, Side::Enemy, 100),
            unit(2, Side::Party, 100),
            unit(3, Side::Party, 100).with_controller(Controller::Player),
        ]);
        let mut scheduler = Scheduler::from_config(&config);
        for _ in 0..100 {
            scheduler.advance_tick(&mut battle, &config);
        }
        assert_eq!(
            scheduler.ready_entities(&battle),
            vec![EntityId(3), EntityId(1), EntityId(2)]
        );
    }

    #[test]
    fn cast_completes_after_duration_and_hides_from_ready() {
        let config = CombatConfig::default();
        let mut battle =
            BattleState::from_combatants([unit(1, Side::Party, 100), unit(2, Side::Enemy, 1)]);
        let mut scheduler = Scheduler::from_config(&config);
        for _ in 0..100 {
            scheduler.advance_tick(&mut battle, &config);
        }
        scheduler.begin_cast(&mut battle, EntityId(1), fireball(EntityId(1), EntityId(2)), 5_000);
        assert_eq!(battle.get(EntityId(1)).unwrap().gauge, 0);
        assert_eq!(scheduler.phase(&battle, EntityId(1)), ReadinessPhase::Casting);

        for _ in 0..49 {
            scheduler.advance_tick(&mut battle, &config);
            assert!(scheduler.poll_completed_casts(&battle).is_empty());
        }
        assert_eq!(scheduler.cast_progress(&battle, EntityId(1)), Some(0.98));
        scheduler.advance_tick(&mut battle, &config);
        let done = scheduler.poll_completed_casts(&battle);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].0, EntityId(1));
        assert!(!scheduler.is_casting(EntityId(1)));
    }

    #[test]
    fn cancelling_a_cast_keeps_everyone_charging() {
        let config = CombatConfig::default();
        let mut battle =
            BattleState::from_combatants([unit(1, Side::Party, 100), unit(2, Side::Enemy, 100)]);
        let mut scheduler = Scheduler::from_config(&config);
        scheduler.begin_cast(&mut battle, EntityId(1), fireball(EntityId(1), EntityId(2)), 5_000);
        for _ in 0..10 {
            scheduler.advance_tick(&mut battle, &config);
        }

        let discarded = scheduler.cancel_cast(EntityId(1));
        assert_eq!(discarded.map(|a| a.skill.name), Some("Fireball".to_string()));
        assert_eq!(scheduler.cancel_cast(EntityId(1)), None);
        assert_eq!(battle.get(EntityId(1)).unwrap().gauge, 1_000);

        for _ in 0..90 {
            scheduler.advance_tick(&mut battle, &config);
        }
        assert_eq!(battle.get(EntityId(2)).unwrap().gauge, config.ready_threshold);
        assert_eq!(
            scheduler.ready_entities(&battle),
            vec![EntityId(1), EntityId(2)]
        );
    }

    #[test]
    fn duration_is_clamped_and_dead_casters_dropped() {
        let config = CombatConfig::default();
        let mut battle =
            BattleState::from_combatants([unit(1, Side::Party, 100), unit(2, Side::Enemy, 100)]);
        let mut scheduler = Scheduler::from_config(&config);
        scheduler.begin_cast(&mut battle, EntityId(1), fireball(EntityId(1), EntityId(2)), 0);
        scheduler.advance_tick(&mut battle, &config);
        assert_eq!(scheduler.cast_progress(&battle, EntityId(1)), Some(1.0));

        let slow = fireball(EntityId(2), EntityId(1));
        scheduler.begin_cast(&mut battle, EntityId(2), slow, u32::MAX);
        battle.get_mut(EntityId(2)).unwrap().mark_dead();
        assert_eq!(scheduler.drop_dead(&battle), vec![EntityId(2)]);
        assert!(!scheduler.is_casting(EntityId(2)));
    }

    #[test]
    fn phases_follow_the_turn() {
        let config = CombatConfig::default();
        let mut battle = BattleState::from_combatants([unit(1, Side::Party, 100)]);
        let mut scheduler = Scheduler::from_config(&config);
        let id = EntityId(1);
        assert_eq!(scheduler.phase(&battle, id), ReadinessPhase::Idle);
        scheduler.advance_tick(&mut battle, &config);
        assert_eq!(scheduler.phase(&battle, id), ReadinessPhase::Charging);
        for _ in 0..99 {
            scheduler.advance_tick(&mut battle, &config);
        }
        assert_eq!(scheduler.phase(&battle, id), ReadinessPhase::Ready);
        scheduler.begin_turn(id);
        assert_eq!(scheduler.phase(&battle, id), ReadinessPhase::Acting);
        scheduler.reset(&mut battle, id);
        assert_eq!(scheduler.phase(&battle, id), ReadinessPhase::Idle);
    }
}
