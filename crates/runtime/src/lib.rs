//! Runtime orchestration for the deterministic battle core.
//!
//! This crate wires together the action provider abstraction, the heuristic
//! decision engine, content access and the event bus into a battle loop.
//! Consumers build a [`Runtime`] for one encounter, step it or run it to the
//! end, and subscribe to the topics they care about.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`providers`] holds the AI Decision Engine
pub mod api;
pub mod events;
pub mod providers;
pub mod runtime;

pub use api::{
    ActionProvider, DecisionInput, ProviderKind, Result, RuntimeError, ScriptedActionProvider,
    WaitActionProvider,
};
pub use events::{CombatEvent, Event, EventBus, EventLog, StatusEvent, Topic, TurnEvent};
pub use providers::ai::{AiDecisionEngine, ThreatLevel};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
