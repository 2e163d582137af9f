//! Heuristic AI action provider.

use std::collections::HashMap;

use game_core::{Action, Archetype, Controller, EntityId, ResolutionReport, status::can_act};

use super::context::AiContext;
use super::generator::ActionCandidateGenerator;
use super::memory::{AdaptiveMemory, effectiveness};
use super::personality::Personality;
use super::selector;
use super::types::Candidate;
use crate::api::{ActionProvider, DecisionInput, Result};

/// Seed slot for the sampling roll; disjoint from resolution slots.
const DECISION_SLOT: u32 = 0xA100;

/// Heuristic decision engine for non-player combatants.
///
/// For each decision the engine:
/// 1. Builds an [`AiContext`] (ratios, threat, allies in need)
/// 2. Generates scored candidates with [`ActionCandidateGenerator`]
/// 3. Weights them by the actor's [`Personality`] and, for adaptive actors,
///    its [`AdaptiveMemory`]
/// 4. Samples one of the top candidates with the RNG oracle
///
/// It never fails: an actor that cannot act, or has nothing worth doing,
/// waits.
#[derive(Debug, Clone, Default)]
pub struct AiDecisionEngine {
    memories: HashMap<EntityId, AdaptiveMemory>,
}

impl AiDecisionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Weighted candidates for `input.actor`, best first, before sampling.
    pub fn candidates(&self, input: &DecisionInput<'_>) -> Vec<Candidate> {
        let Some(actor) = input.combatant() else {
            return Vec::new();
        };
        if !actor.is_alive() || !can_act(actor) {
            return Vec::new();
        }

        let archetype = archetype_of(actor.controller);
        let personality = Personality::of(archetype);
        let allies = input.battle.allies_of(actor.id);
        let enemies = input.battle.enemies_of(actor.id);
        let ctx = AiContext::analyze(actor, &allies, &enemies, input.config);

        let skills = input.skills.skills(&actor.class);
        let mut candidates = ActionCandidateGenerator::new(&ctx, personality).generate(skills);

        let memory = (archetype == Archetype::Adaptive)
            .then(|| self.memories.get(&actor.id))
            .flatten();
        for candidate in &mut candidates {
            let mut weight = personality.weight(candidate.category);
            if let Some(memory) = memory {
                weight *= memory.multiplier(candidate.category);
            }
            candidate.priority = candidate.base * weight;
        }
        candidates.sort_by(|a, b| b.priority.total_cmp(&a.priority));
        candidates
    }

    /// Chooses the action `input.actor` takes this turn.
    pub fn choose_action(&self, input: &DecisionInput<'_>) -> Action {
        let candidates = self.candidates(input);
        let seed = input.ctx.roll_seed(input.actor, DECISION_SLOT);
        match selector::select(candidates, input.rng, seed) {
            Some(chosen) => {
                tracing::debug!(
                    actor = %input.actor,
                    skill = %chosen.action.skill.name,
                    category = %chosen.category,
                    priority = chosen.priority,
                    "action chosen"
                );
                chosen.action
            }
            None => {
                tracing::debug!(actor = %input.actor, "no candidates, waiting");
                Action::wait(input.actor)
            }
        }
    }

    /// Records how well an action of `kind` worked for `actor`.
    pub fn learn_from_result(
        &mut self,
        actor: EntityId,
        kind: game_core::ActionKind,
        effectiveness: f32,
    ) {
        self.memories
            .entry(actor)
            .or_default()
            .learn_from_result(kind, effectiveness);
    }

    /// Scores `report` and records it for its actor.
    pub fn observe(&mut self, report: &ResolutionReport) {
        self.learn_from_result(report.actor, report.kind, effectiveness(report));
    }

    pub fn memory(&self, actor: EntityId) -> Option<&AdaptiveMemory> {
        self.memories.get(&actor)
    }

    /// Drops memory for combatants that left the battle.
    pub fn forget(&mut self, actor: EntityId) {
        self.memories.remove(&actor);
    }
}

impl ActionProvider for AiDecisionEngine {
    fn provide_action(&mut self, input: &DecisionInput<'_>) -> Result<Action> {
        Ok(self.choose_action(input))
    }
}

/// Player-controlled combatants on auto-battle use the default profile.
fn archetype_of(controller: Controller) -> Archetype {
    match controller {
        Controller::Ai(archetype) => archetype,
        Controller::Player => Archetype::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ai::types::ActionCategory;
    use game_content::{ClassDefinition, ContentRegistry};
    use game_core::{
        ActionKind, BattleContext, BattleState, Combatant, CombatConfig, CoreStats, FixedRolls,
        Side, SkillDescriptor, StatusEffect, StatusTag,
    };

    fn registry() -> ContentRegistry {
        ContentRegistry::from_classes([ClassDefinition::new("cleric")
            .with_archetype(Archetype::Support)
            .with_skill(SkillDescriptor::new("Cure", ActionKind::Heal).with_power(0, 40))])
    }

    fn battle(archetype: Archetype, healer_hp: u32) -> BattleState {
        let mut battle = BattleState::new();
        let mut healer = Combatant::new(EntityId(1), "Ilse", Side::Party)
            .with_class("cleric")
            .with_controller(Controller::Ai(archetype))
            .with_hp(400)
            .with_mp(50)
            .with_brave(150, 9_999)
            .with_stats(CoreStats::uniform(30));
        healer.hp = healer_hp;
        battle.add(healer);
        for id in 2..=4 {
            battle.add(
                Combatant::new(EntityId(id), format!("brute{id}"), Side::Enemy)
                    .with_hp(600)
                    .with_brave(300, 9_999)
                    .with_stats(CoreStats::uniform(80)),
            );
        }
        battle
    }

    fn input<'a>(
        battle: &'a BattleState,
        ctx: &'a BattleContext,
        config: &'a CombatConfig,
        content: &'a ContentRegistry,
        rng: &'a FixedRolls,
    ) -> DecisionInput<'a> {
        DecisionInput {
            actor: EntityId(1),
            battle,
            ctx,
            config,
            skills: content,
            rng,
        }
    }

    #[test]
    fn critical_threat_puts_heal_in_the_top_slot() {
        let battle = battle(Archetype::Support, 60);
        let (ctx, config, content, rng) = (
            BattleContext::new(3),
            CombatConfig::default(),
            registry(),
            FixedRolls::always(1),
        );
        let input = input(&battle, &ctx, &config, &content, &rng);
        let engine = AiDecisionEngine::new();

        let candidates = engine.candidates(&input);
        assert_eq!(candidates[0].category, ActionCategory::Heal);
        assert_eq!(engine.choose_action(&input).kind, ActionKind::Heal);
    }

    #[test]
    fn healthy_actor_attacks() {
        let battle = battle(Archetype::Aggressive, 400);
        let (ctx, config, content, rng) = (
            BattleContext::new(3),
            CombatConfig::default(),
            registry(),
            FixedRolls::always(1),
        );
        let input = input(&battle, &ctx, &config, &content, &rng);
        let action = AiDecisionEngine::new().choose_action(&input);
        assert!(action.kind.is_offensive() || action.kind == ActionKind::Defend);
        assert_ne!(action.kind, ActionKind::Heal);
    }

    #[test]
    fn stunned_actor_waits() {
        let mut battle = battle(Archetype::Support, 60);
        battle
            .get_mut(EntityId(1))
            .unwrap()
            .statuses
            .apply(StatusEffect::new(StatusTag::Stun, 2, 1.0));
        let (ctx, config, content, rng) = (
            BattleContext::new(3),
            CombatConfig::default(),
            registry(),
            FixedRolls::always(1),
        );
        let input = input(&battle, &ctx, &config, &content, &rng);
        assert!(AiDecisionEngine::new().choose_action(&input).is_wait());
    }

    #[test]
    fn memory_only_weights_adaptive_actors() {
        let (ctx, config, content, rng) = (
            BattleContext::new(3),
            CombatConfig::default(),
            registry(),
            FixedRolls::always(1),
        );
        let mut engine = AiDecisionEngine::new();
        for _ in 0..5 {
            engine.learn_from_result(EntityId(1), ActionKind::BasicAttack, 0.0);
        }

        let adaptive = battle(Archetype::Adaptive, 400);
        let tactical = battle(Archetype::Tactical, 400);
        let attack_priority = |battle: &BattleState| {
            engine
                .candidates(&input(battle, &ctx, &config, &content, &rng))
                .into_iter()
                .find(|c| c.action.kind == ActionKind::BasicAttack)
                .map(|c| c.priority / c.base)
                .unwrap()
        };

        assert!(attack_priority(&adaptive) < 1.0);
        assert_eq!(attack_priority(&tactical), 1.0);
        assert_eq!(engine.memory(EntityId(1)).unwrap().outcomes(), 5);
    }
}
