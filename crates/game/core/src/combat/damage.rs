//! Damage formula.
//!
//! ```text
//! ratio   = atk / def            (pair chosen by damage kind, penetration applied)
//! raw     = power × ratio × element × (crit ? crit_multiplier : 1)
//! damage  = max(1, min(floor(raw), level × damage_cap_per_level))
//! ```

use super::element::element_multiplier;
use crate::action::{DamageKind, Penetration, SkillDescriptor};
use crate::config::CombatConfig;
use crate::state::Combatant;
use crate::stats::EffectiveStats;

/// Which half of the attack/defense pair a ratio is computed for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pair {
    Physical,
    Magical,
}

fn pair_ratio(
    attack: f32,
    defense: f32,
    pair: Pair,
    penetration: Penetration,
    config: &CombatConfig,
) -> f32 {
    let attack = attack.max(0.0);
    let mut defense = defense.max(1.0);
    match penetration {
        Penetration::None => {}
        Penetration::PhysicalPierce if pair == Pair::Physical => {
            defense *= 1.0 - config.pierce_fraction.clamp(0.0, 1.0);
        }
        Penetration::MagicalPierce if pair == Pair::Magical => {
            defense *= 1.0 - config.pierce_fraction.clamp(0.0, 1.0);
        }
        Penetration::PhysicalPierce | Penetration::MagicalPierce => {}
        Penetration::ArmorBreak(rate) => {
            defense *= 1.0 - rate.clamp(0.0, 1.0);
        }
        Penetration::TrueDamage(rate) => {
            let rate = rate.clamp(0.0, 1.0);
            return rate * attack + (1.0 - rate) * (attack / defense);
        }
    }
    attack / defense.max(1.0)
}

/// Attack/defense ratio for `kind`, with penetration applied.
///
/// Hybrid damage averages the physical and magical ratios; a pierce tag only
/// affects its matching half.
pub fn damage_ratio(
    attacker: &EffectiveStats,
    defender: &EffectiveStats,
    kind: DamageKind,
    penetration: Penetration,
    config: &CombatConfig,
) -> f32 {
    let physical = || {
        pair_ratio(
            attacker.attack,
            defender.defense,
            Pair::Physical,
            penetration,
            config,
        )
    };
    let magical = || {
        pair_ratio(
            attacker.magic,
            defender.magic_defense,
            Pair::Magical,
            penetration,
            config,
        )
    };
    match kind {
        DamageKind::Physical => physical(),
        DamageKind::Magical => magical(),
        DamageKind::Hybrid => (physical() + magical()) / 2.0,
    }
}

/// Applies power, element and critical multipliers, then the floor and the
/// per-level ceiling.
pub fn finalize_damage(
    power: u32,
    ratio: f32,
    element: f32,
    critical: bool,
    attacker_level: u32,
    config: &CombatConfig,
) -> u32 {
    let crit = if critical { config.crit_multiplier } else { 1.0 };
    let raw = power as f32 * ratio * element * crit;
    let cap = attacker_level.max(1).saturating_mul(config.damage_cap_per_level);
    let floored = if raw.is_finite() { raw.floor().max(0.0) } else { 0.0 };
    let computed = if floored >= cap as f32 { cap } else { floored as u32 };
    computed.max(1)
}

/// Brave-phase damage of `skill` from `attacker` to `defender`.
pub fn brave_damage(
    attacker: &Combatant,
    attacker_stats: &EffectiveStats,
    defender: &Combatant,
    defender_stats: &EffectiveStats,
    skill: &SkillDescriptor,
    critical: bool,
    config: &CombatConfig,
) -> u32 {
    let ratio = damage_ratio(
        attacker_stats,
        defender_stats,
        skill.damage_kind,
        skill.penetration,
        config,
    );
    let element = element_multiplier(skill.element, &defender.elements);
    finalize_damage(skill.brave_power, ratio, element, critical, attacker.level, config)
}

/// HP-phase damage: the attacker's current Brave scaled by `hp_power`.
pub fn hp_damage(attacker_brave: u32, hp_power: u32) -> u32 {
    let scaled = u64::from(attacker_brave) * u64::from(hp_power) / 100;
    u32::try_from(scaled).unwrap_or(u32::MAX).max(1)
}

/// Expected Brave damage with no crit, for planning.
pub fn estimate_brave_damage(
    attacker: &Combatant,
    defender: &Combatant,
    skill: &SkillDescriptor,
    config: &CombatConfig,
) -> u32 {
    let attacker_stats = EffectiveStats::of(attacker, config);
    let defender_stats = EffectiveStats::of(defender, config);
    brave_damage(
        attacker,
        &attacker_stats,
        defender,
        &defender_stats,
        skill,
        false,
        config,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::Element;
    use crate::state::{EntityId, Side};
    use crate::stats::CoreStats;

    fn stats(attack: f32, defense: f32) -> EffectiveStats {
        EffectiveStats {
            attack,
            magic: attack,
            defense,
            magic_defense: defense,
            speed: 10.0,
            luck: 10.0,
            accuracy: 20.0,
            evasion: 10.0,
            critical: 5.0,
        }
    }

    #[test]
    fn equal_stats_give_unit_ratio() {
        let config = CombatConfig::default();
        let even = stats(50.0, 50.0);
        let ratio = damage_ratio(&even, &even, DamageKind::Physical, Penetration::None, &config);
        assert_eq!(ratio, 1.0);
        assert_eq!(finalize_damage(100, ratio, 1.0, false, 10, &config), 100);
        assert_eq!(finalize_damage(100, ratio, 1.0, true, 10, &config), 150);
    }

    #[test]
    fn pierce_only_affects_matching_pair() {
        let config = CombatConfig::default();
        let a = stats(100.0, 0.0);
        let d = stats(0.0, 100.0);
        let phys = damage_ratio(&a, &d, DamageKind::Physical, Penetration::PhysicalPierce, &config);
        let magic = damage_ratio(&a, &d, DamageKind::Magical, Penetration::PhysicalPierce, &config);
        let hybrid = damage_ratio(&a, &d, DamageKind::Hybrid, Penetration::MagicalPierce, &config);
        assert_eq!(phys, 2.0);
        assert_eq!(magic, 1.0);
        assert_eq!(hybrid, 1.5);
    }

    #[test]
    fn true_damage_blends_toward_defense_one() {
        let config = CombatConfig::default();
        let a = stats(10.0, 0.0);
        let d = stats(0.0, 10.0);
        let ratio = |penetration| damage_ratio(&a, &d, DamageKind::Physical, penetration, &config);
        let full = ratio(Penetration::TrueDamage(1.0));
        let half = ratio(Penetration::TrueDamage(0.5));
        let broken = ratio(Penetration::ArmorBreak(0.5));
        assert_eq!(full, 10.0);
        assert_eq!(half, 5.5);
        assert_eq!(broken, 2.0);
    }

    #[test]
    fn damage_is_floored_and_capped() {
        let config = CombatConfig::default();
        assert_eq!(finalize_damage(100, 0.0, 1.0, false, 5, &config), 1);
        assert_eq!(finalize_damage(100, 50.0, 1.8, true, 3, &config), 300);
        assert_eq!(finalize_damage(100, f32::NAN, 1.0, false, 3, &config), 1);
    }

    #[test]
    fn element_multiplier_uses_defender_tags() {
        let config = CombatConfig::default();
        let attacker = Combatant::new(EntityId(1), "a", Side::Party)
            .with_level(10)
            .with_stats(CoreStats::uniform(40));
        let defender = Combatant::new(EntityId(2), "d", Side::Enemy)
            .with_stats(CoreStats::uniform(40))
            .with_elements([Element::Ice]);
        let skill = SkillDescriptor::basic_attack().with_element(Element::Fire);
        assert_eq!(estimate_brave_damage(&attacker, &defender, &skill, &config), 180);
    }

    #[test]
    fn hp_damage_scales_brave() {
        assert_eq!(hp_damage(400, 100), 400);
        assert_eq!(hp_damage(400, 50), 200);
        assert_eq!(hp_damage(0, 100), 1);
    }
}
