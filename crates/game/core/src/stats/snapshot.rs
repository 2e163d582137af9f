//! Effective stats at the moment an action resolves.
//!
//! Layering: core stats → trait/equipment bonuses → status multipliers →
//! derived ratings. The snapshot is computed fresh for every resolution step
//! so statuses applied mid-action affect later targets but never the roll
//! already taken.

use super::bonus::StatBounds;
use super::derived::{base_accuracy, base_critical, base_evasion};
use super::modifiers::{StatKind, StatModifiers};
use crate::config::CombatConfig;
use crate::state::Combatant;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectiveStats {
    pub attack: f32,
    pub magic: f32,
    pub defense: f32,
    pub magic_defense: f32,
    pub speed: f32,
    pub luck: f32,
    pub accuracy: f32,
    /// Already clamped to `[evasion_min, evasion_max]`.
    pub evasion: f32,
    /// Base critical chance in percent, before skill bonuses.
    pub critical: f32,
}

impl EffectiveStats {
    pub fn of(combatant: &Combatant, config: &CombatConfig) -> Self {
        let modifiers = combatant.statuses.stat_modifiers();
        Self::compute(combatant, &modifiers, config)
    }

    pub fn compute(
        combatant: &Combatant,
        modifiers: &StatModifiers,
        config: &CombatConfig,
    ) -> Self {
        let base = &combatant.stats;
        let bonuses = &combatant.bonuses;
        let core = |stack: &super::BonusStack, value: u32| {
            stack.apply_u32(value, StatBounds::CORE.min as u32, StatBounds::CORE.max as u32) as f32
        };

        let attack = modifiers.apply(StatKind::Attack, core(&bonuses.attack, base.attack));
        let magic = modifiers.apply(StatKind::Magic, core(&bonuses.magic, base.magic));
        let defense = modifiers.apply(StatKind::Defense, core(&bonuses.defense, base.defense));
        let magic_defense = modifiers.apply(
            StatKind::Defense,
            core(&bonuses.magic_defense, base.magic_defense),
        );
        let raw_speed = bonuses.speed.apply_u32(
            base.speed,
            StatBounds::SPEED.min as u32,
            StatBounds::SPEED.max as u32,
        ) as f32;
        let speed = modifiers.apply(StatKind::Speed, raw_speed).max(1.0);
        let luck = core(&bonuses.luck, base.luck);

        let derived = StatBounds::DERIVED.max;
        let accuracy_flat = bonuses.accuracy.apply(0, -derived, derived);
        let evasion_flat = bonuses.evasion.apply(0, -derived, derived);
        let critical_flat = bonuses.critical.apply(0, -derived, derived);

        let accuracy = modifiers.apply(
            StatKind::Accuracy,
            base_accuracy(speed, luck) + accuracy_flat as f32,
        );
        let evasion = modifiers
            .apply(
                StatKind::Evasion,
                base_evasion(speed, luck) + evasion_flat as f32,
            )
            .clamp(config.evasion_min, config.evasion_max);
        let critical = modifiers
            .apply(StatKind::Critical, base_critical(luck) + critical_flat as f32)
            .max(0.0);

        Self {
            attack,
            magic,
            defense,
            magic_defense,
            speed,
            luck,
            accuracy,
            evasion,
            critical,
        }
    }

    /// Gauge points gained per tick before the tick rate is applied.
    pub fn gauge_speed(&self) -> u32 {
        (self.speed.round() as u32).max(1)
    }
}
