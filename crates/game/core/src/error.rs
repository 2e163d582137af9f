//! Common error infrastructure for game-core.
//!
//! Every failure the battle core can report is recoverable by the caller: the
//! resolution step returns a typed error and leaves the battle untouched, and
//! the orchestrating loop decides whether to re-prompt or re-select.
//!
//! # Design Principles
//!
//! - **Typed**: one enum variant per failure class, never a string soup
//! - **Rich Context**: errors carry actor, target, and nonce for diagnostics
//! - **Severity Classification**: errors are categorized for recovery strategies

use crate::state::EntityId;

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The same actor may retry with a different action or target.
    ///
    /// Examples: not enough MP, target already dead
    Recoverable,

    /// The request itself is malformed and must change before a retry.
    ///
    /// Examples: unknown entity, revive aimed at a living ally
    Validation,

    /// Unexpected state inconsistency inside the core.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Contextual information attached to errors for debugging and diagnostics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    /// Entity whose action failed.
    pub actor: Option<EntityId>,

    /// Entity the action was aimed at, when relevant.
    pub target: Option<EntityId>,

    /// Resolution nonce at the time of the failure.
    pub nonce: u64,

    /// Optional static message providing additional context.
    pub message: Option<&'static str>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(nonce: u64) -> Self {
        Self {
            actor: None,
            target: None,
            nonce,
            message: None,
        }
    }

    #[must_use]
    pub const fn with_actor(mut self, actor: EntityId) -> Self {
        self.actor = Some(actor);
        self
    }

    #[must_use]
    pub const fn with_target(mut self, target: EntityId) -> Self {
        self.target = Some(target);
        self
    }

    #[must_use]
    pub const fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

/// Common trait for all game-core errors.
///
/// Gives callers a uniform way to classify failures without matching on
/// every concrete enum.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Stable identifier for metrics and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Failures surfaced by action validation and resolution.
///
/// Returning any of these guarantees that no combatant was mutated.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound(deserialize = "'de: 'static")))]
pub enum CombatError {
    /// Target is dead, missing, or not a legal choice for the skill.
    #[error("invalid target: {}", .0.message.unwrap_or("target unavailable"))]
    InvalidTarget(ErrorContext),

    /// MP or a class resource is below the skill's cost.
    #[error("insufficient resource: {}", .0.message.unwrap_or("cost not met"))]
    InsufficientResource(ErrorContext),

    /// Actor cannot perform this action right now (dead, locked, casting).
    #[error("invalid state: {}", .0.message.unwrap_or("actor cannot act"))]
    InvalidState(ErrorContext),
}

impl CombatError {
    pub fn invalid_target(ctx: ErrorContext) -> Self {
        Self::InvalidTarget(ctx)
    }

    pub fn insufficient_resource(ctx: ErrorContext) -> Self {
        Self::InsufficientResource(ctx)
    }

    pub fn invalid_state(ctx: ErrorContext) -> Self {
        Self::InvalidState(ctx)
    }
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidTarget(_) | Self::InsufficientResource(_) => ErrorSeverity::Recoverable,
            Self::InvalidState(_) => ErrorSeverity::Validation,
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::InvalidTarget(ctx)
            | Self::InsufficientResource(ctx)
            | Self::InvalidState(ctx) => Some(ctx),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTarget(_) => "COMBAT_INVALID_TARGET",
            Self::InsufficientResource(_) => "COMBAT_INSUFFICIENT_RESOURCE",
            Self::InvalidState(_) => "COMBAT_INVALID_STATE",
        }
    }
}
