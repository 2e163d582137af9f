//! Event types for different topics.

use game_core::status::TickReport;
use game_core::{Action, BattleOutcome, EntityId, ResolutionReport};
use serde::{Deserialize, Serialize};

/// Events produced by action resolution and casting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CombatEvent {
    /// An action resolved; the report lists every sub-event.
    ActionResolved { report: ResolutionReport, clock: u64 },

    /// The core rejected an action. The battle state is unchanged.
    ActionRejected {
        action: Action,
        code: String,
        error: String,
        clock: u64,
    },

    CastStarted {
        actor: EntityId,
        skill: String,
        duration: u32,
        clock: u64,
    },

    /// A cast was discarded before completing and will never resolve.
    CastCancelled {
        actor: EntityId,
        skill: String,
        clock: u64,
    },
}

/// Per-turn status processing results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusEvent {
    pub report: TickReport,
    pub clock: u64,
}

/// Events related to turn management (lightweight).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TurnEvent {
    TurnStarted {
        entity: EntityId,
        round: u32,
        clock: u64,
    },

    /// The entity was ready but a control effect kept it from acting.
    TurnSkipped { entity: EntityId, clock: u64 },

    RoundEnded { round: u32, clock: u64 },

    BattleEnded {
        outcome: BattleOutcome,
        round: u32,
        clock: u64,
    },
}
