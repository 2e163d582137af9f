//! Multiplicative stat modifiers produced by active status effects.

/// Stats a status effect can scale.
///
/// `Defense` scales both physical and magic defense.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter, strum::EnumCount, strum::Display,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatKind {
    Attack,
    Magic,
    Defense,
    Speed,
    Accuracy,
    Evasion,
    Critical,
}

/// One multiplier per [`StatKind`], all starting at 1.0.
///
/// Effects compose multiplicatively: two ×1.25 buffs give ×1.5625.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatModifiers {
    multipliers: [f32; <StatKind as strum::EnumCount>::COUNT],
}

impl StatModifiers {
    pub const NEUTRAL: Self = Self {
        multipliers: [1.0; <StatKind as strum::EnumCount>::COUNT],
    };

    pub fn get(&self, kind: StatKind) -> f32 {
        self.multipliers[kind as usize]
    }

    pub fn scale(&mut self, kind: StatKind, factor: f32) {
        self.multipliers[kind as usize] *= factor;
    }

    /// Applies the multiplier for `kind` to `value`.
    pub fn apply(&self, kind: StatKind, value: f32) -> f32 {
        value * self.get(kind)
    }

    pub fn is_neutral(&self) -> bool {
        self.multipliers.iter().all(|m| (*m - 1.0).abs() < f32::EPSILON)
    }
}

impl Default for StatModifiers {
    fn default() -> Self {
        Self::NEUTRAL
    }
}
