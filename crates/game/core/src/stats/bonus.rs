//! Trait/equipment bonus stacks.
//!
//! Bonuses are supplied from outside the battle core (equipment, passive
//! traits) and folded into a stat in a fixed order:
//! Flat → %Inc → More → Less → Clamp
//!
//! Status effects are not bonuses; they compose afterwards as multipliers
//! (see [`super::StatModifiers`]).

/// A single externally supplied adjustment to one stat.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bonus {
    /// Added to the base before any percentage.
    Flat(i32),

    /// Percentage increase; all `Increased` entries are summed first
    /// (20 = +20%).
    Increased(i32),

    /// Independent multiplier (50 = ×1.5).
    More(i32),

    /// Independent reduction (10 = ×0.9).
    Less(i32),
}

/// Ordered collection of [`Bonus`] values for one stat.
///
/// ```
/// # use game_core::stats::{Bonus, BonusStack};
/// let stack = BonusStack::new().flat(5).increased(20).more(50);
/// // (10 + 5) × 1.2 × 1.5 = 27
/// assert_eq!(stack.apply(10, 0, 999), 27);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BonusStack {
    bonuses: Vec<Bonus>,
}

impl BonusStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, bonus: Bonus) {
        self.bonuses.push(bonus);
    }

    pub fn extend(&mut self, bonuses: impl IntoIterator<Item = Bonus>) {
        self.bonuses.extend(bonuses);
    }

    pub fn is_empty(&self) -> bool {
        self.bonuses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bonuses.len()
    }

    /// Applies every bonus to `base` and clamps the result to `[min, max]`.
    ///
    /// Intermediate math is done in i64 so large percentage chains saturate
    /// at the clamp instead of overflowing.
    pub fn apply(&self, base: i32, min: i32, max: i32) -> i32 {
        let mut flat = 0i64;
        let mut increased = 0i64;
        for bonus in &self.bonuses {
            match bonus {
                Bonus::Flat(v) => flat += i64::from(*v),
                Bonus::Increased(p) => increased += i64::from(*p),
                Bonus::More(_) | Bonus::Less(_) => {}
            }
        }

        let mut value = (i64::from(base) + flat) * (100 + increased) / 100;

        for bonus in &self.bonuses {
            if let Bonus::More(p) = bonus {
                value = value * (100 + i64::from(*p)) / 100;
            }
        }
        for bonus in &self.bonuses {
            if let Bonus::Less(p) = bonus {
                value = value * (100 - i64::from(*p)) / 100;
            }
        }

        value.clamp(i64::from(min), i64::from(max)) as i32
    }

    /// Unsigned convenience over [`apply`](Self::apply) for pool-like stats.
    pub fn apply_u32(&self, base: u32, min: u32, max: u32) -> u32 {
        let base = i32::try_from(base).unwrap_or(i32::MAX);
        let min = i32::try_from(min).unwrap_or(i32::MAX);
        let max = i32::try_from(max).unwrap_or(i32::MAX);
        self.apply(base, min, max).max(0) as u32
    }

    pub fn flat(mut self, value: i32) -> Self {
        self.add(Bonus::Flat(value));
        self
    }

    pub fn increased(mut self, percent: i32) -> Self {
        self.add(Bonus::Increased(percent));
        self
    }

    pub fn more(mut self, percent: i32) -> Self {
        self.add(Bonus::More(percent));
        self
    }

    pub fn less(mut self, percent: i32) -> Self {
        self.add(Bonus::Less(percent));
        self
    }
}

/// Clamp bounds shared by the stat layers.
#[derive(Clone, Copy, Debug)]
pub struct StatBounds {
    pub min: i32,
    pub max: i32,
}

impl StatBounds {
    /// Attack, magic, defense and luck after bonuses.
    pub const CORE: Self = Self { min: 1, max: 9_999 };

    /// Speed after bonuses; at least 1 so every living combatant charges.
    pub const SPEED: Self = Self { min: 1, max: 999 };

    /// Flat accuracy/critical adjustments folded into derived stats.
    pub const DERIVED: Self = Self { min: 0, max: 999 };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increased_bonuses_sum_before_multiplying() {
        let stack = BonusStack::new().increased(10).increased(10);
        assert_eq!(stack.apply(100, 0, 1000), 120);
    }

    #[test]
    fn more_and_less_compose_sequentially() {
        let stack = BonusStack::new().more(50).less(10);
        // 100 × 1.5 × 0.9
        assert_eq!(stack.apply(100, 0, 1000), 135);
    }

    #[test]
    fn result_is_clamped() {
        let stack = BonusStack::new().flat(-500);
        assert_eq!(stack.apply(10, 1, 99), 1);
        assert_eq!(BonusStack::new().more(900).apply(50, 1, 99), 99);
    }
}
