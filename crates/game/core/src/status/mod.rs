//! Status Effect Engine.
//!
//! Owns per-combatant effect collections, merge rules, per-turn processing
//! and the eligibility queries the scheduler and decision engine consult.
//!
//! ```text
//! StatusTag ─spec()─▶ StatusSpec (category, merge, caps, stat mods)
//!     │
//! StatusEffect ──apply──▶ StatusEffects (bounded, one per tag)
//!                              │
//!                 process_tick │ stat_modifiers │ can_act
//! ```

mod collection;
mod effect;
mod engine;
mod tag;

pub use collection::{ApplyOutcome, CleanseFilter, StatusEffects};
pub use effect::StatusEffect;
pub use engine::{
    StatusEvent, TickReport, active_effects, apply, can_act, can_use_skills, cleanse,
    process_tick,
};
pub use tag::{MergePolicy, Polarity, StatusCategory, StatusSpec, StatusTag};
