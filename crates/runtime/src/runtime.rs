//! High-level battle orchestrator.
//!
//! The runtime owns one encounter: the battle state, the readiness
//! scheduler, the decision engine and the event bus. Each [`Runtime::step`]
//! advances the ATB clock by one tick and plays out every turn that became
//! ready, strictly one entity at a time:
//!
//! ```text
//! advance_tick ─▶ completed casts resolve ─▶ for each ready entity:
//!     decay counters ─▶ status tick ─▶ (skip if controlled)
//!     ─▶ provider / AI chooses ─▶ begin cast | resolve ─▶ reset gauge
//! ─▶ round bookkeeping ─▶ outcome check
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use game_content::{ContentRegistry, EncounterSpec, defaults};
use game_core::{
    Action, ActionKind, BattleContext, BattleOutcome, BattleState, CombatConfig, CombatEnv,
    CombatError, Combatant, EntityId, GameError, PcgRng, ResolutionReport, RngOracle, Scheduler,
    Side, combat, status,
};
use tokio::sync::broadcast;

use crate::api::{ActionProvider, DecisionInput, Result, RuntimeError};
use crate::events::{CombatEvent, Event, EventBus, EventLog, StatusEvent, Topic, TurnEvent};
use crate::providers::AiDecisionEngine;

/// Player input is requested at most this many times per turn.
const PLAYER_ATTEMPTS: usize = 2;

/// Runtime configuration shared across the orchestrator.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub combat: CombatConfig,
    pub event_buffer_size: usize,
    /// Ticks after which an undecided battle is abandoned.
    pub max_ticks: u64,
    /// Cosmetic cue switch for presentation layers. The core only copies it
    /// into each resolution report; triggers and status templates always fire.
    pub effects_enabled: bool,
    /// Cancel a cast as soon as its caster falls under a control effect.
    pub interrupt_on_control: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            combat: CombatConfig::default(),
            event_buffer_size: 256,
            max_ticks: 200_000,
            effects_enabled: true,
            interrupt_on_control: true,
        }
    }
}

/// Main runtime that orchestrates one battle.
pub struct Runtime {
    config: RuntimeConfig,
    battle: BattleState,
    ctx: BattleContext,
    scheduler: Scheduler,
    content: Arc<ContentRegistry>,
    rng: Box<dyn RngOracle>,

    // Player input; when unset, player-controlled combatants auto-battle.
    player_provider: Option<Box<dyn ActionProvider>>,
    ai: AiDecisionEngine,

    bus: EventBus,
    log: EventLog,

    /// Entities that have taken a turn in the current round.
    acted: HashSet<EntityId>,
    outcome: Option<BattleOutcome>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn battle(&self) -> &BattleState {
        &self.battle
    }

    pub fn context(&self) -> &BattleContext {
        &self.ctx
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn ai(&self) -> &AiDecisionEngine {
        &self.ai
    }

    /// Every event published so far.
    pub fn events(&self) -> &EventLog {
        &self.log
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.bus.subscribe(topic)
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.outcome
    }

    pub fn clock(&self) -> u64 {
        self.scheduler.clock()
    }

    pub fn set_player_provider(&mut self, provider: impl ActionProvider + 'static) {
        self.player_provider = Some(Box::new(provider));
    }

    /// Abandons `entity`'s in-progress cast. The discarded action is
    /// returned and never resolves; the entity keeps its gauge.
    pub fn cancel_cast(&mut self, entity: EntityId) -> Option<Action> {
        let action = self.scheduler.cancel_cast(entity)?;
        self.publish(Event::Combat(CombatEvent::CastCancelled {
            actor: entity,
            skill: action.skill.name.clone(),
            clock: self.clock(),
        }));
        Some(action)
    }

    /// Runs until one side is defeated.
    pub fn run_to_end(&mut self) -> Result<BattleOutcome> {
        loop {
            if let Some(outcome) = self.step()? {
                return Ok(outcome);
            }
        }
    }

    /// Advances the clock by one tick and plays every turn it unlocks.
    ///
    /// Returns the outcome once the battle is decided.
    pub fn step(&mut self) -> Result<Option<BattleOutcome>> {
        if self.outcome.is_some() {
            return Ok(self.outcome);
        }
        if self.clock() >= self.config.max_ticks {
            return Err(RuntimeError::TickLimitExceeded {
                limit: self.config.max_ticks,
            });
        }

        self.scheduler.advance_tick(&mut self.battle, &self.config.combat);

        for (entity, action) in self.scheduler.poll_completed_casts(&self.battle) {
            self.scheduler.begin_resolution(entity);
            tracing::debug!(%entity, skill = %action.skill.name, "cast completed");
            if self.resolve(&action).is_err() {
                self.resolve_fallback(entity);
            }
            self.scheduler.reset(&mut self.battle, entity);
            if self.check_outcome() {
                return Ok(self.outcome);
            }
        }

        for entity in self.scheduler.ready_entities(&self.battle) {
            // Earlier turns this tick may have killed or interrupted it.
            if !self.scheduler.is_ready(&self.battle, entity) {
                continue;
            }
            self.take_turn(entity);
            if self.check_outcome() {
                return Ok(self.outcome);
            }
        }

        self.end_round_if_complete();
        Ok(None)
    }

    fn take_turn(&mut self, entity: EntityId) {
        self.scheduler.begin_turn(entity);
        self.acted.insert(entity);
        self.publish(Event::Turn(TurnEvent::TurnStarted {
            entity,
            round: self.ctx.round,
            clock: self.clock(),
        }));

        let Some(combatant) = self.battle.get_mut(entity) else {
            return;
        };
        combatant.resources.decay_turn();
        let report = status::process_tick(combatant);
        let able = status::can_act(combatant);

        if !report.events.is_empty() {
            let died = report.died;
            self.publish(Event::Status(StatusEvent {
                report,
                clock: self.clock(),
            }));
            if died {
                tracing::info!(%entity, "died to status damage");
                self.after_resolution();
                return;
            }
        }

        if !able {
            tracing::debug!(%entity, "turn skipped by control effect");
            self.publish(Event::Turn(TurnEvent::TurnSkipped {
                entity,
                clock: self.clock(),
            }));
            self.scheduler.reset(&mut self.battle, entity);
            return;
        }

        let action = self.choose(entity);
        let casting = if action.skill.cast_time > 0 {
            match combat::validate(&action, &self.battle, &self.ctx) {
                Ok(_) => {
                    self.start_cast(entity, action);
                    true
                }
                Err(error) => {
                    self.reject(&action, &error);
                    self.retry(entity)
                }
            }
        } else if self.resolve(&action).is_err() {
            self.retry(entity)
        } else {
            false
        };
        // A cast keeps the turn open until it completes.
        if !casting {
            self.scheduler.reset(&mut self.battle, entity);
        }
    }

    fn start_cast(&mut self, entity: EntityId, action: Action) {
        let duration = action.skill.cast_time;
        let skill = action.skill.name.clone();
        self.scheduler
            .begin_cast(&mut self.battle, entity, action, duration);
        self.publish(Event::Combat(CombatEvent::CastStarted {
            actor: entity,
            skill,
            duration: duration.clamp(1, self.scheduler.threshold()),
            clock: self.clock(),
        }));
    }

    /// Asks the player provider or the decision engine for `entity`'s action.
    fn choose(&mut self, entity: EntityId) -> Action {
        let is_player = self.battle.get(entity).is_some_and(Combatant::is_player);
        let input = DecisionInput {
            actor: entity,
            battle: &self.battle,
            ctx: &self.ctx,
            config: &self.config.combat,
            skills: &*self.content,
            rng: &*self.rng,
        };

        let provider = match (&mut self.player_provider, is_player) {
            (Some(provider), true) => provider,
            _ => return self.ai.choose_action(&input),
        };
        for attempt in 0..PLAYER_ATTEMPTS {
            let provided = provider.provide_action(&input).and_then(|action| {
                if action.actor == entity {
                    Ok(action)
                } else {
                    Err(RuntimeError::InvalidActionActor {
                        expected: entity,
                        provided: action.actor,
                    })
                }
            });
            match provided {
                Ok(action) => return action,
                Err(error) => tracing::warn!(%entity, attempt, %error, "player provider failed"),
            }
        }
        Action::wait(entity)
    }

    /// Second chance after a rejected action: players are asked again,
    /// AI combatants wait. Returns true when the retry began a cast.
    fn retry(&mut self, entity: EntityId) -> bool {
        let player_driven = self.player_provider.is_some()
            && self.battle.get(entity).is_some_and(Combatant::is_player);
        if player_driven {
            for attempt in 1..PLAYER_ATTEMPTS {
                let action = self.choose(entity);
                tracing::debug!(%entity, attempt, "player re-prompted");
                if action.skill.cast_time > 0 {
                    match combat::validate(&action, &self.battle, &self.ctx) {
                        Ok(_) => {
                            self.start_cast(entity, action);
                            return true;
                        }
                        Err(error) => self.reject(&action, &error),
                    }
                } else if self.resolve(&action).is_ok() {
                    return false;
                }
            }
        }
        self.resolve_fallback(entity);
        false
    }

    fn resolve_fallback(&mut self, entity: EntityId) {
        if let Err(error) = self.resolve(&Action::wait(entity)) {
            tracing::warn!(%entity, %error, "fallback wait rejected");
        }
    }

    fn resolve(&mut self, action: &Action) -> std::result::Result<(), CombatError> {
        let env = CombatEnv::new(&self.config.combat, &*self.rng).with_triggers(&*self.content);
        match combat::resolve(action, &mut self.battle, &mut self.ctx, &env) {
            Ok(report) => {
                self.record(report);
                self.after_resolution();
                Ok(())
            }
            Err(error) => {
                self.reject(action, &error);
                Err(error)
            }
        }
    }

    fn record(&mut self, report: ResolutionReport) {
        tracing::debug!(
            actor = %report.actor,
            skill = %report.skill,
            brave = report.total_brave_damage(),
            hp = report.total_hp_damage(),
            healed = report.total_healing(),
            "action resolved"
        );
        for target in report.kills() {
            tracing::info!(actor = %report.actor, %target, "combatant defeated");
        }
        if report.kind != ActionKind::Wait {
            self.ai.observe(&report);
        }
        self.publish(Event::Combat(CombatEvent::ActionResolved {
            report,
            clock: self.clock(),
        }));
    }

    fn reject(&mut self, action: &Action, error: &CombatError) {
        tracing::warn!(
            actor = %action.actor,
            skill = %action.skill.name,
            code = error.error_code(),
            %error,
            "action rejected"
        );
        self.publish(Event::Combat(CombatEvent::ActionRejected {
            action: action.clone(),
            code: error.error_code().to_string(),
            error: error.to_string(),
            clock: self.clock(),
        }));
    }

    /// Cancels casts that can no longer complete and forgets the dead.
    fn after_resolution(&mut self) {
        let doomed: Vec<EntityId> = self
            .battle
            .iter()
            .filter(|c| self.scheduler.is_casting(c.id))
            .filter(|c| {
                !c.is_alive() || (self.config.interrupt_on_control && !status::can_act(c))
            })
            .map(|c| c.id)
            .collect();
        for entity in doomed {
            self.cancel_cast(entity);
        }

        for entity in self.scheduler.drop_dead(&self.battle) {
            self.ai.forget(entity);
        }
    }

    fn end_round_if_complete(&mut self) {
        let complete = self
            .battle
            .iter()
            .filter(|c| c.is_alive())
            .all(|c| self.acted.contains(&c.id));
        if !complete || self.acted.is_empty() {
            return;
        }

        let round = self.ctx.round;
        self.ctx.round += 1;
        self.battle.clear_broken();
        self.acted.clear();
        tracing::debug!(round, "round ended");
        self.publish(Event::Turn(TurnEvent::RoundEnded {
            round,
            clock: self.clock(),
        }));
    }

    fn check_outcome(&mut self) -> bool {
        let Some(outcome) = self.battle.outcome() else {
            return false;
        };
        self.outcome = Some(outcome);
        tracing::info!(
            ?outcome,
            defeated = ?outcome.defeated(),
            round = self.ctx.round,
            clock = self.clock(),
            "battle ended"
        );
        self.publish(Event::Turn(TurnEvent::BattleEnded {
            outcome,
            round: self.ctx.round,
            clock: self.clock(),
        }));
        true
    }

    fn publish(&mut self, event: Event) {
        self.log.append(event.clone());
        self.bus.publish(event);
    }
}

/// Builder for [`Runtime`].
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    battle: Option<BattleState>,
    encounter: Option<EncounterSpec>,
    seed: Option<u64>,
    content: Option<Arc<ContentRegistry>>,
    rng: Option<Box<dyn RngOracle>>,
    player_provider: Option<Box<dyn ActionProvider>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            battle: None,
            encounter: None,
            seed: None,
            content: None,
            rng: None,
            player_provider: None,
        }
    }

    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn combat_config(mut self, combat: CombatConfig) -> Self {
        self.config.combat = combat;
        self
    }

    /// Uses a prepared roster. Takes precedence over [`Self::encounter`].
    pub fn battle(mut self, battle: BattleState) -> Self {
        self.battle = Some(battle);
        self
    }

    /// Builds the roster from `encounter` against the configured content.
    pub fn encounter(mut self, encounter: EncounterSpec) -> Self {
        self.encounter = Some(encounter);
        self
    }

    /// Battle seed; defaults to the encounter's seed, else 0.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn content(mut self, content: Arc<ContentRegistry>) -> Self {
        self.content = Some(content);
        self
    }

    pub fn rng(mut self, rng: impl RngOracle + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    pub fn player_provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.player_provider = Some(Box::new(provider));
        self
    }

    pub fn build(self) -> Result<Runtime> {
        let content = self
            .content
            .unwrap_or_else(|| Arc::new(defaults::registry()));

        let (battle, encounter_seed) = match (self.battle, self.encounter) {
            (Some(battle), _) => (battle, None),
            (None, Some(encounter)) => (encounter.build(&*content), Some(encounter.seed)),
            (None, None) => return Err(RuntimeError::MissingBattle),
        };
        for side in [Side::Party, Side::Enemy] {
            if battle.is_side_defeated(side) {
                return Err(RuntimeError::EmptySide(side));
            }
        }

        let seed = self.seed.or(encounter_seed).unwrap_or_default();
        let ctx = BattleContext::new(seed).with_effects(self.config.effects_enabled);
        let scheduler = Scheduler::from_config(&self.config.combat);
        let bus = EventBus::with_capacity(self.config.event_buffer_size);

        tracing::info!(
            seed,
            combatants = battle.len(),
            classes = content.len(),
            "battle runtime ready"
        );

        Ok(Runtime {
            config: self.config,
            battle,
            ctx,
            scheduler,
            content,
            rng: self.rng.unwrap_or_else(|| Box::new(PcgRng)),
            player_provider: self.player_provider,
            ai: AiDecisionEngine::new(),
            bus,
            log: EventLog::new(),
            acted: HashSet::new(),
            outcome: None,
        })
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
