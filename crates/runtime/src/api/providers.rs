//! Abstraction for sourcing player and NPC intent.
//!
//! Runtime users plug in [`ActionProvider`] implementations so the battle loop
//! can run with human input, scripted fixtures, or AI policies.
use std::collections::VecDeque;

use game_core::{
    Action, BattleContext, BattleState, Combatant, CombatConfig, EntityId, RngOracle, SkillOracle,
};

use super::errors::{ProviderKind, Result, RuntimeError};

/// Read-only view handed to a provider when `actor` becomes ready.
#[derive(Clone, Copy)]
pub struct DecisionInput<'a> {
    pub actor: EntityId,
    pub battle: &'a BattleState,
    pub ctx: &'a BattleContext,
    pub config: &'a CombatConfig,
    pub skills: &'a dyn SkillOracle,
    pub rng: &'a dyn RngOracle,
}

impl<'a> DecisionInput<'a> {
    pub fn combatant(&self) -> Option<&'a Combatant> {
        self.battle.get(self.actor)
    }
}

/// Trait for providing actions based on the current battle state.
///
/// Different implementations can handle:
/// - Player input (from UI/CLI)
/// - NPC AI decisions
/// - Scripted/replayed actions
/// - Testing fixtures
pub trait ActionProvider: Send {
    /// Provide an action for `input.actor`.
    ///
    /// Returning an error makes the runtime re-prompt once before falling
    /// back to `Wait`.
    fn provide_action(&mut self, input: &DecisionInput<'_>) -> Result<Action>;
}

/// A simple action provider that always returns Wait action.
/// Useful for testing or as a fallback.
pub struct WaitActionProvider;

impl ActionProvider for WaitActionProvider {
    fn provide_action(&mut self, input: &DecisionInput<'_>) -> Result<Action> {
        Ok(Action::wait(input.actor))
    }
}

/// Replays a fixed queue of actions in order.
///
/// Errors once the queue is empty.
#[derive(Debug, Default)]
pub struct ScriptedActionProvider {
    queue: VecDeque<Action>,
}

impl ScriptedActionProvider {
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            queue: actions.into_iter().collect(),
        }
    }

    pub fn push(&mut self, action: Action) {
        self.queue.push_back(action);
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl ActionProvider for ScriptedActionProvider {
    fn provide_action(&mut self, input: &DecisionInput<'_>) -> Result<Action> {
        let action = self
            .queue
            .pop_front()
            .ok_or_else(|| RuntimeError::provider(ProviderKind::Player, "script exhausted"))?;
        if action.actor != input.actor {
            return Err(RuntimeError::InvalidActionActor {
                expected: input.actor,
                provided: action.actor,
            });
        }
        Ok(action)
    }
}
