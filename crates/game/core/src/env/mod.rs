//! Read-only collaborators consumed by the battle core.
//!
//! Content (skills, class resources, trigger tables) and randomness are
//! supplied through oracle traits so the core never depends on a concrete
//! loader. [`CombatEnv`] bundles what a single resolution needs.
mod content;
mod rng;
mod triggers;

pub use content::{ClassOracle, SkillOracle};
pub use rng::{FixedRolls, PcgRng, RngOracle, compute_seed};
pub use triggers::{NoTriggers, Trigger, TriggerEffect, TriggerOracle};

use crate::config::CombatConfig;

static NO_TRIGGERS: NoTriggers = NoTriggers;

/// Borrowed view of everything resolution reads but never mutates.
#[derive(Clone, Copy)]
pub struct CombatEnv<'a> {
    pub config: &'a CombatConfig,
    pub rng: &'a dyn RngOracle,
    pub triggers: &'a dyn TriggerOracle,
}

impl<'a> CombatEnv<'a> {
    /// Environment with an empty trigger table.
    pub fn new(config: &'a CombatConfig, rng: &'a dyn RngOracle) -> Self {
        Self {
            config,
            rng,
            triggers: &NO_TRIGGERS,
        }
    }

    pub fn with_triggers(mut self, triggers: &'a dyn TriggerOracle) -> Self {
        self.triggers = triggers;
        self
    }
}

impl std::fmt::Debug for CombatEnv<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombatEnv")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
