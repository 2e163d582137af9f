//! Derived combat ratings: accuracy, evasion, critical rate.
//!
//! Formulas (before bonuses and status multipliers):
//! - accuracy = 10 + speed/10 + luck/4
//! - evasion  = 5 + speed/10 + luck/10, clamped to the configured band
//! - critical = 5 + luck/5, clamped to [0, crit_max]

use super::bonus::{Bonus, BonusStack};

/// Externally computed trait/equipment bonuses, one stack per stat.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatBonuses {
    pub attack: BonusStack,
    pub magic: BonusStack,
    pub defense: BonusStack,
    pub magic_defense: BonusStack,
    pub speed: BonusStack,
    pub luck: BonusStack,
    pub accuracy: BonusStack,
    pub evasion: BonusStack,
    /// Flat percentage points added to critical chance.
    pub critical: BonusStack,
}

impl StatBonuses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attack(mut self, bonus: Bonus) -> Self {
        self.attack.add(bonus);
        self
    }

    pub fn with_defense(mut self, bonus: Bonus) -> Self {
        self.defense.add(bonus);
        self
    }

    pub fn with_speed(mut self, bonus: Bonus) -> Self {
        self.speed.add(bonus);
        self
    }

    pub fn with_critical(mut self, bonus: Bonus) -> Self {
        self.critical.add(bonus);
        self
    }
}

pub fn base_accuracy(speed: f32, luck: f32) -> f32 {
    10.0 + speed / 10.0 + luck / 4.0
}

pub fn base_evasion(speed: f32, luck: f32) -> f32 {
    5.0 + speed / 10.0 + luck / 10.0
}

pub fn base_critical(luck: f32) -> f32 {
    5.0 + luck / 5.0
}
