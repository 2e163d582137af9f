//! Combat resolution.
//!
//! Turns one [`Action`](crate::action::Action) into mutations of the
//! [`BattleState`](crate::state::BattleState) plus a [`ResolutionReport`].
//!
//! # Layout
//!
//! - [`hit`]: hit and critical chance
//! - [`damage`]: ratio, multipliers, floor and per-level cap
//! - [`element`]: elemental affinity table
//! - [`resolve`](mod@resolve): validation and the per-target pipeline
//!
//! Every roll is drawn from the environment's RNG oracle with a seed derived
//! from `(battle seed, nonce, actor, slot)`, so a battle replays exactly.

pub mod damage;
pub mod element;
pub mod hit;
pub mod report;
pub mod resolve;

pub use damage::{brave_damage, damage_ratio, estimate_brave_damage, finalize_damage, hp_damage};
pub use element::{Affinity, Element, element_multiplier};
pub use hit::{calculate_crit_chance, calculate_hit_chance, check_roll};
pub use report::{CombatEvent, ResolutionReport, TargetTotals};
pub use resolve::{resolve, validate};
