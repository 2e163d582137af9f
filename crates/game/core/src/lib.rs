//! Deterministic battle rules shared by the runtime and offline tools.
//!
//! `game-core` owns the readiness scheduler, the combat resolution engine and
//! the status effect engine, plus the data model they operate on. It performs
//! no I/O: content arrives through the oracle traits in [`env`], randomness
//! through [`env::RngOracle`], and every mutation of a
//! [`BattleState`](state::BattleState) goes through [`combat::resolve`],
//! [`status::process_tick`] or the [`scheduler::Scheduler`].
pub mod action;
pub mod combat;
pub mod config;
pub mod context;
pub mod env;
pub mod error;
pub mod scheduler;
pub mod state;
pub mod stats;
pub mod status;

pub use action::{
    Action, ActionKind, DamageKind, Penetration, ResourceAmount, SkillDescriptor, SkillFlags,
    StatusTemplate, TargetKind, TargetSpec,
};
pub use combat::{CombatEvent, Element, ResolutionReport, resolve, validate};
pub use config::CombatConfig;
pub use context::BattleContext;
pub use env::{
    ClassOracle, CombatEnv, FixedRolls, PcgRng, RngOracle, SkillOracle, Trigger, TriggerEffect,
    TriggerOracle,
};
pub use error::{CombatError, ErrorContext, ErrorSeverity, GameError};
pub use scheduler::{ReadinessPhase, Scheduler};
pub use state::{
    Archetype, BattleOutcome, BattleState, ClassTag, Combatant, Controller, EntityId,
    ResourceDefinition, Side,
};
pub use stats::{CoreStats, EffectiveStats, StatBonuses};
pub use status::{StatusEffect, StatusEvent, StatusTag};
