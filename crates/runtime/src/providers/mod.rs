//! Action provider implementations for different combatant behaviors.

pub mod ai;

pub use ai::AiDecisionEngine;
