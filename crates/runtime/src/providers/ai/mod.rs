//! Heuristic AI Decision Engine for non-player combatants.
//!
//! Decision-making runs in five steps:
//!
//! 1. **Situational analysis**: HP/Brave/MP ratios, a [`ThreatLevel`] from
//!    enemy offense versus the actor's defenses, allies in need
//! 2. **Candidate generation**: every usable skill against every legal
//!    target, scored by situational value
//! 3. **Personality**: per-archetype weights over [`ActionCategory`]
//! 4. **Adaptive memory**: learned multipliers for adaptive actors
//! 5. **Selection**: top-3 by priority, sampled proportionally with the RNG
//!    oracle
//!
//! # Core Components
//!
//! - [`AiDecisionEngine`]: entry point implementing [`crate::ActionProvider`]
//! - [`AiContext`]: the per-decision blackboard
//! - [`ActionCandidateGenerator`]: candidate enumeration and scoring
//! - [`Personality`] and [`AdaptiveMemory`]: weighting

pub mod context;
pub mod generator;
pub mod memory;
pub mod personality;
pub mod provider;
pub mod selector;
pub mod types;

pub use context::AiContext;
pub use generator::ActionCandidateGenerator;
pub use memory::{AdaptiveMemory, effectiveness};
pub use personality::{Personality, ROLE_THRESHOLD};
pub use provider::AiDecisionEngine;
pub use types::{ActionCategory, Candidate, ThreatLevel};
