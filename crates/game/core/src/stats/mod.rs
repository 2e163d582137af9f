//! Stat computation: stored core stats, external bonuses, status multipliers.
//!
//! ```text
//! CoreStats + StatBonuses ──▶ bonus-adjusted stats
//!                              │  × StatModifiers (status effects)
//!                              ▼
//!                        EffectiveStats (attack … critical)
//! ```

pub mod bonus;
pub mod core;
pub mod derived;
pub mod modifiers;
pub mod snapshot;

pub use bonus::{Bonus, BonusStack, StatBounds};
pub use core::CoreStats;
pub use derived::StatBonuses;
pub use modifiers::{StatKind, StatModifiers};
pub use snapshot::EffectiveStats;
