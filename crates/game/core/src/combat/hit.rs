//! Hit and critical chance.

use crate::config::CombatConfig;

/// Percent chance to hit.
///
/// # Formula
///
/// ```text
/// hit_chance = hit_base + 0.5 × (accuracy - evasion)
/// clamped to [hit_min, hit_max]
/// ```
pub fn calculate_hit_chance(accuracy: f32, evasion: f32, config: &CombatConfig) -> u32 {
    let raw = config.hit_base as f32 + 0.5 * (accuracy - evasion);
    (raw.round() as i64).clamp(i64::from(config.hit_min), i64::from(config.hit_max)) as u32
}

/// Percent chance to crit, clamped to `[0, crit_max]`.
///
/// `base` is the attacker's derived critical rate (bonuses already folded
/// in); `skill_bonus` comes from the skill descriptor.
pub fn calculate_crit_chance(base: f32, skill_bonus: i32, config: &CombatConfig) -> u32 {
    let raw = base + skill_bonus as f32;
    (raw.round() as i64).clamp(0, i64::from(config.crit_max)) as u32
}

/// A percentile roll succeeds when it is at most the chance.
pub fn check_roll(roll: u32, chance: u32) -> bool {
    roll <= chance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_chance_is_clamped() {
        let config = CombatConfig::default();
        assert_eq!(calculate_hit_chance(20.0, 20.0, &config), 90);
        assert_eq!(calculate_hit_chance(1_000.0, 0.0, &config), 95);
        assert_eq!(calculate_hit_chance(0.0, 1_000.0, &config), 25);
        for acc in (0..300).step_by(7) {
            for eva in (0..300).step_by(11) {
                let chance = calculate_hit_chance(acc as f32, eva as f32, &config);
                assert!((25..=95).contains(&chance));
            }
        }
    }

    #[test]
    fn crit_chance_is_clamped() {
        let config = CombatConfig::default();
        assert_eq!(calculate_crit_chance(10.0, 5, &config), 15);
        assert_eq!(calculate_crit_chance(45.0, 30, &config), 50);
        assert_eq!(calculate_crit_chance(5.0, -40, &config), 0);
    }

    #[test]
    fn roll_at_chance_succeeds() {
        assert!(check_roll(90, 90));
        assert!(!check_roll(91, 90));
    }
}
