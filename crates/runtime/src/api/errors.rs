//! Unified error types surfaced by the runtime API.
//!
//! Wraps rule violations from the battle core and failures from action
//! providers so clients can bubble them up with consistent context.
use std::fmt;

use game_core::{CombatError, EntityId, Side};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Combat(#[from] CombatError),

    #[error("runtime requires a battle roster before building")]
    MissingBattle,

    #[error("battle has no living combatants on the {0:?} side")]
    EmptySide(Side),

    #[error("{kind} action provider failed: {message}")]
    ProviderFailed { kind: ProviderKind, message: String },

    #[error("action actor {provided} does not match current entity {expected}")]
    InvalidActionActor {
        expected: EntityId,
        provided: EntityId,
    },

    #[error("battle still undecided after {limit} ticks")]
    TickLimitExceeded { limit: u64 },

    #[error("failed to serialize event log")]
    Serialization(#[from] serde_json::Error),
}

impl RuntimeError {
    pub fn provider(kind: ProviderKind, message: impl Into<String>) -> Self {
        Self::ProviderFailed {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProviderKind {
    Player,
    Npc,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProviderKind::Player => "player",
            ProviderKind::Npc => "npc",
        };
        write!(f, "{}", label)
    }
}
