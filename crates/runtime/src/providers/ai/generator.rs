//! Candidate generation.
//!
//! Enumerates every usable skill of the actor against every legal target and
//! scores each pairing by its situational value (base score). Personality
//! and memory weighting happen later in the provider.
//!
//! # Scoring at a glance
//!
//! | category | main drivers |
//! |----------|--------------|
//! | attack / skill | Break potential, HP damage vs target HP, lethal finish, hit chance |
//! | heal     | missing HP of the target, critical allies, harmful effects to cleanse |
//! | revive   | one fallen ally |
//! | support  | buffs the target does not have yet |
//! | defend   | only at `High` / `Critical` threat |
//!
//! Skills that cannot be paid (MP, class resource) or are blocked by silence
//! are never generated, so the runtime only sees actions the core accepts.

use game_core::combat::{calculate_hit_chance, estimate_brave_damage, hp_damage};
use game_core::status::{StatusCategory, can_use_skills};
use game_core::{
    Action, ActionKind, Combatant, EffectiveStats, SkillDescriptor, SkillFlags, StatusTag,
    TargetKind, TargetSpec,
};

use super::context::{AiContext, harmful_effects};
use super::personality::Personality;
use super::types::{ActionCategory, Candidate, ThreatLevel};

/// Share of a resource's max at which spending it earns a bonus.
const NEAR_CAP: f32 = 0.8;

/// Generates scored candidates for one decision.
pub struct ActionCandidateGenerator<'c, 'a> {
    ctx: &'c AiContext<'a>,
    personality: Personality,
}

impl<'c, 'a> ActionCandidateGenerator<'c, 'a> {
    pub fn new(ctx: &'c AiContext<'a>, personality: Personality) -> Self {
        Self { ctx, personality }
    }

    /// Candidates for the innate actions plus `class_skills`.
    pub fn generate(&self, class_skills: &[SkillDescriptor]) -> Vec<Candidate> {
        let innate = [
            SkillDescriptor::basic_attack(),
            SkillDescriptor::basic_hp_attack(),
            SkillDescriptor::defend(),
        ];

        let mut candidates = Vec::new();
        for skill in innate.iter().chain(class_skills) {
            if !self.is_usable(skill) {
                continue;
            }
            let Some(category) = ActionCategory::of(skill.kind) else {
                continue;
            };
            if !self.personality.considers(category) {
                continue;
            }
            for (target, base) in self.score_targets(skill) {
                let base = self.adjust(skill, base);
                if base > 0.0 {
                    candidates.push(Candidate::new(
                        Action::new(self.ctx.actor.id, skill.clone(), target),
                        category,
                        base,
                    ));
                }
            }
        }

        tracing::debug!(
            actor = %self.ctx.actor.id,
            count = candidates.len(),
            threat = %self.ctx.threat,
            "candidates generated"
        );
        candidates
    }

    fn is_usable(&self, skill: &SkillDescriptor) -> bool {
        let actor = self.ctx.actor;
        if skill.kind == ActionKind::Wait {
            return false;
        }
        if !skill.is_innate() && !can_use_skills(actor) {
            return false;
        }
        if actor.mp < skill.mp_cost {
            return false;
        }
        if let Some(cost) = &skill.resource_cost
            && !actor.resources.can_spend(&cost.name, cost.amount)
        {
            return false;
        }
        true
    }

    /// Threat, cast time and class-resource modifiers.
    fn adjust(&self, skill: &SkillDescriptor, base: f32) -> f32 {
        let mut score = base;
        let actor = self.ctx.actor;

        if skill.kind == ActionKind::Heal {
            score *= match self.ctx.threat {
                ThreatLevel::Critical => 1.5,
                ThreatLevel::High => 1.2,
                _ => 1.0,
            };
        }
        if skill.cast_time > 0 && self.ctx.threat >= ThreatLevel::High {
            score *= 0.8;
        }
        if let Some(cost) = &skill.resource_cost
            && actor.resources.is_near_cap(&cost.name, NEAR_CAP)
        {
            score *= 1.3;
        }
        if let Some(gain) = &skill.resource_gain
            && actor.resources.contains(&gain.name)
            && !actor.resources.is_near_cap(&gain.name, NEAR_CAP)
        {
            score *= 1.1;
        }
        score
    }

    fn score_targets(&self, skill: &SkillDescriptor) -> Vec<(TargetSpec, f32)> {
        let ctx = self.ctx;
        if skill.flags.contains(SkillFlags::REVIVE) {
            if skill.target != TargetKind::DeadAlly {
                return Vec::new();
            }
            return ctx
                .fallen
                .iter()
                .map(|c| (TargetSpec::DeadAlly(c.id), 70.0))
                .collect();
        }

        match skill.kind {
            ActionKind::Wait => Vec::new(),
            ActionKind::Defend => self.defend().into_iter().collect(),
            ActionKind::Heal => {
                self.targets_among(skill, &ctx.allies, |c| self.heal_value(skill, c))
            }
            ActionKind::Buff => self.targets_among(skill, &ctx.allies, |c| buff_value(skill, c)),
            ActionKind::Field => self.field(skill).into_iter().collect(),
            _ => self.targets_among(skill, &ctx.enemies, |c| self.offense_value(skill, c)),
        }
    }

    /// Expands a skill's target shape over `pool`.
    ///
    /// Single-target shapes yield one candidate per scoring member; group
    /// shapes yield one candidate whose score grows with the members helped.
    fn targets_among(
        &self,
        skill: &SkillDescriptor,
        pool: &[&Combatant],
        value: impl Fn(&Combatant) -> f32,
    ) -> Vec<(TargetSpec, f32)> {
        match skill.target {
            TargetKind::SingleEnemy | TargetKind::SingleAlly => pool
                .iter()
                .map(|c| (TargetSpec::Single(c.id), value(c)))
                .filter(|(_, score)| *score > 0.0)
                .collect(),
            TargetKind::SelfOnly => {
                let score = value(self.ctx.actor);
                if score > 0.0 {
                    vec![(TargetSpec::SelfOnly, score)]
                } else {
                    Vec::new()
                }
            }
            TargetKind::AllEnemies | TargetKind::AllAllies => {
                let scores: Vec<f32> = pool.iter().map(|c| value(c)).filter(|s| *s > 0.0).collect();
                if scores.is_empty() {
                    return Vec::new();
                }
                let mean = scores.iter().sum::<f32>() / scores.len() as f32;
                let spread = 1.0 + 0.25 * (scores.len() - 1) as f32;
                let target = if skill.target == TargetKind::AllEnemies {
                    TargetSpec::AllEnemies
                } else {
                    TargetSpec::AllAllies
                };
                vec![(target, mean * spread)]
            }
            TargetKind::DeadAlly => Vec::new(),
        }
    }

    fn defend(&self) -> Option<(TargetSpec, f32)> {
        if self.ctx.actor.statuses.has(StatusTag::Guard) {
            return None;
        }
        match self.ctx.threat {
            ThreatLevel::Critical => Some((TargetSpec::SelfOnly, 50.0)),
            ThreatLevel::High => Some((TargetSpec::SelfOnly, 30.0)),
            _ => None,
        }
    }

    fn offense_value(&self, skill: &SkillDescriptor, target: &Combatant) -> f32 {
        let ctx = self.ctx;
        let actor = ctx.actor;
        let mut score = 0.0;

        let estimate = if skill.kind.has_brave_phase() {
            estimate_brave_damage(actor, target, skill, ctx.config)
        } else {
            0
        };

        if skill.kind.has_brave_phase() {
            score += if target.brave == 0 {
                12.0
            } else {
                let break_share = (estimate as f32 / target.brave as f32).min(1.0);
                20.0 + 30.0 * break_share
            };
        }

        if skill.kind.has_hp_phase() {
            let gained = (estimate as f32 * ctx.config.brave_transfer).floor() as u32;
            let brave = if skill.kind.has_brave_phase() {
                actor.brave.saturating_add(gained)
            } else {
                actor.brave
            };
            if brave == 0 {
                // Only the 1-damage floor would land.
                score += 2.0;
            } else {
                let damage = hp_damage(brave, skill.hp_power);
                let share = (damage as f32 / target.hp.max(1) as f32).min(1.0);
                score += 15.0 + 50.0 * share;
                if damage >= target.hp {
                    score += 25.0;
                }
            }
        }

        score += status_value(skill, target, 20.0);
        if skill.kind == ActionKind::Debuff {
            if score <= 0.0 {
                return 3.0;
            }
            score += 10.0;
        }

        if Some(target.id) == ctx.weakest_enemy {
            score += 5.0;
        }
        if Some(target.id) == ctx.strongest_enemy {
            score += 3.0;
        }

        if skill.flags.contains(SkillFlags::SURE_HIT) {
            score
        } else {
            let defender = EffectiveStats::of(target, ctx.config);
            let chance = calculate_hit_chance(ctx.stats.accuracy, defender.evasion, ctx.config);
            score * chance as f32 / 100.0
        }
    }

    fn heal_value(&self, skill: &SkillDescriptor, ally: &Combatant) -> f32 {
        let harmful = if skill.flags.contains(SkillFlags::CLEANSE) {
            harmful_effects(ally)
        } else {
            0
        };
        let injured = ally.hp_ratio() < super::context::INJURED_HP;
        if !injured && harmful == 0 {
            return 0.0;
        }

        let mut score = 20.0 + 15.0 * harmful as f32;
        if injured && (skill.hp_power > 0 || !skill.statuses.is_empty()) {
            score += 60.0 * (1.0 - ally.hp_ratio());
            if self.ctx.is_critical(ally.id) {
                score += 25.0;
            }
        }
        score + status_value(skill, ally, 5.0)
    }

    fn field(&self, skill: &SkillDescriptor) -> Option<(TargetSpec, f32)> {
        if skill.target != TargetKind::AllEnemies {
            return None;
        }
        let lacking: usize = self
            .ctx
            .enemies
            .iter()
            .map(|e| missing_statuses(skill, e))
            .sum();
        (lacking > 0).then(|| (TargetSpec::AllEnemies, 10.0 + 8.0 * lacking as f32))
    }
}

fn buff_value(skill: &SkillDescriptor, ally: &Combatant) -> f32 {
    let healthy = ally.hp_ratio() >= super::context::INJURED_HP;
    let lacking = skill
        .statuses
        .iter()
        .filter(|t| !t.on_self && !ally.statuses.has(t.tag))
        // Heal-over-time is wasted on healthy allies.
        .filter(|t| !(healthy && t.tag.category() == StatusCategory::HealOverTime))
        .count();
    if lacking == 0 {
        0.0
    } else {
        10.0 + 15.0 * lacking as f32
    }
}

/// Target-side templates the target does not have yet.
fn missing_statuses(skill: &SkillDescriptor, target: &Combatant) -> usize {
    skill
        .statuses
        .iter()
        .filter(|t| !t.on_self && !target.statuses.has(t.tag))
        .count()
}

/// Expected value of a skill's target-side templates on `target`.
fn status_value(skill: &SkillDescriptor, target: &Combatant, per_status: f32) -> f32 {
    skill
        .statuses
        .iter()
        .filter(|t| !t.on_self && !target.statuses.has(t.tag))
        .map(|t| per_status * t.chance.min(100) as f32 / 100.0)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{CombatConfig, CoreStats, EntityId, Side, StatusEffect, StatusTemplate};

    fn unit(id: u32, side: Side) -> Combatant {
        Combatant::new(EntityId(id), format!("u{id}"), side)
            .with_hp(200)
            .with_mp(30)
            .with_stats(CoreStats::uniform(50))
    }

    fn kinds(candidates: &[Candidate]) -> Vec<ActionKind> {
        candidates.iter().map(|c| c.action.kind).collect()
    }

    #[test]
    fn innate_attacks_target_every_enemy() {
        let config = CombatConfig::default();
        let me = unit(1, Side::Party).with_brave(100, 9_999);
        let a = unit(5, Side::Enemy).with_brave(100, 9_999);
        let b = unit(6, Side::Enemy).with_brave(100, 9_999);
        let ctx = AiContext::analyze(&me, &[&me], &[&a, &b], &config);

        let candidates =
            ActionCandidateGenerator::new(&ctx, Personality::neutral()).generate(&[]);
        let attacks = candidates
            .iter()
            .filter(|c| c.action.kind == ActionKind::BasicAttack)
            .count();
        let hp_attacks = candidates
            .iter()
            .filter(|c| c.action.kind == ActionKind::HpAttack)
            .count();
        assert_eq!((attacks, hp_attacks), (2, 2));
        assert!(!kinds(&candidates).contains(&ActionKind::Defend));
    }

    #[test]
    fn unaffordable_and_silenced_skills_are_skipped() {
        let config = CombatConfig::default();
        let mut me = unit(1, Side::Party);
        let foe = unit(5, Side::Enemy);
        let skills = [
            SkillDescriptor::new("Flare", ActionKind::BraveAttack).with_mp_cost(99),
            SkillDescriptor::new("Rend", ActionKind::BraveAttack).with_resource_cost("rage", 10),
            SkillDescriptor::new("Slash", ActionKind::BraveAttack),
        ];

        let ctx = AiContext::analyze(&me, &[&me], &[&foe], &config);
        let names: Vec<String> = ActionCandidateGenerator::new(&ctx, Personality::neutral())
            .generate(&skills)
            .into_iter()
            .map(|c| c.action.skill.name)
            .collect();
        assert!(names.contains(&"Slash".to_string()));
        assert!(!names.contains(&"Flare".to_string()));
        assert!(!names.contains(&"Rend".to_string()));

        me.statuses.apply(StatusEffect::new(StatusTag::Silence, 3, 1.0));
        let ctx = AiContext::analyze(&me, &[&me], &[&foe], &config);
        let silenced =
            ActionCandidateGenerator::new(&ctx, Personality::neutral()).generate(&skills);
        assert!(silenced.iter().all(|c| c.action.skill.is_innate()));
    }

    #[test]
    fn heals_only_go_to_allies_in_need() {
        let config = CombatConfig::default();
        let me = unit(1, Side::Party);
        let mut hurt = unit(2, Side::Party);
        hurt.hp = 40;
        let fine = unit(3, Side::Party);
        let foe = unit(5, Side::Enemy);
        let cure = SkillDescriptor::new("Cure", ActionKind::Heal).with_power(0, 30);

        let ctx = AiContext::analyze(&me, &[&me, &hurt, &fine], &[&foe], &config);
        let heals: Vec<Candidate> = ActionCandidateGenerator::new(&ctx, Personality::neutral())
            .generate(&[cure])
            .into_iter()
            .filter(|c| c.category == ActionCategory::Heal)
            .collect();

        assert_eq!(heals.len(), 1);
        assert_eq!(heals[0].action.target, TargetSpec::Single(EntityId(2)));
    }

    #[test]
    fn berserkers_never_heal() {
        let config = CombatConfig::default();
        let mut me = unit(1, Side::Party);
        me.hp = 10;
        let foe = unit(5, Side::Enemy);
        let cure = SkillDescriptor::new("Cure", ActionKind::Heal).with_power(0, 30);
        let ctx = AiContext::analyze(&me, &[&me], &[&foe], &config);

        let candidates = ActionCandidateGenerator::new(
            &ctx,
            Personality::of(game_core::Archetype::Berserker),
        )
        .generate(&[cure]);
        assert!(!kinds(&candidates).contains(&ActionKind::Heal));
    }

    #[test]
    fn revive_targets_fallen_allies_and_buffs_skip_owned_tags() {
        let config = CombatConfig::default();
        let mut me = unit(1, Side::Party);
        me.statuses.apply(StatusEffect::new(StatusTag::DefenseUp, 3, 0.2));
        let mut fallen = unit(2, Side::Party);
        fallen.mark_dead();
        let foe = unit(5, Side::Enemy);
        let raise = SkillDescriptor::new("Raise", ActionKind::Heal)
            .with_target(TargetKind::DeadAlly)
            .with_flags(SkillFlags::REVIVE);
        let protect = SkillDescriptor::new("Protect", ActionKind::Buff)
            .with_target(TargetKind::SelfOnly)
            .with_status(StatusTemplate::new(StatusTag::DefenseUp, 100, 3, 0.2));

        let ctx = AiContext::analyze(&me, &[&me, &fallen], &[&foe], &config);
        let candidates =
            ActionCandidateGenerator::new(&ctx, Personality::neutral()).generate(&[raise, protect]);

        let revive = candidates
            .iter()
            .find(|c| c.action.skill.name == "Raise")
            .unwrap();
        assert_eq!(revive.action.target, TargetSpec::DeadAlly(EntityId(2)));
        assert!(candidates.iter().all(|c| c.action.skill.name != "Protect"));
    }

    #[test]
    fn candidates_keep_the_declared_target_shape() {
        let config = CombatConfig::default();
        let me = unit(1, Side::Party);
        let mut fallen = unit(2, Side::Party);
        fallen.mark_dead();
        let foe = unit(5, Side::Enemy);
        let fog = StatusTemplate::new(StatusTag::Blind, 100, 3, 1.0);
        let mist = SkillDescriptor::new("Mist", ActionKind::Field).with_status(fog);
        let haze = SkillDescriptor::new("Haze", ActionKind::Field)
            .with_target(TargetKind::SingleEnemy)
            .with_status(fog);
        let lift = SkillDescriptor::new("Lift", ActionKind::Heal).with_flags(SkillFlags::REVIVE);

        let ctx = AiContext::analyze(&me, &[&me, &fallen], &[&foe], &config);
        let candidates = ActionCandidateGenerator::new(&ctx, Personality::neutral())
            .generate(&[mist, haze, lift]);

        let named = |name: &str| {
            candidates
                .iter()
                .filter(|c| c.action.skill.name == name)
                .map(|c| c.action.target)
                .collect::<Vec<_>>()
        };
        assert_eq!(named("Mist"), vec![TargetSpec::AllEnemies]);
        assert!(named("Haze").is_empty());
        assert!(named("Lift").is_empty());
    }

    #[test]
    fn lethal_hp_attack_outscores_chip_damage() {
        let config = CombatConfig::default();
        let me = unit(1, Side::Party).with_brave(500, 9_999);
        let mut nearly_dead = unit(5, Side::Enemy);
        nearly_dead.hp = 100;
        let healthy = unit(6, Side::Enemy).with_hp(5_000);
        let ctx = AiContext::analyze(&me, &[&me], &[&nearly_dead, &healthy], &config);

        let candidates =
            ActionCandidateGenerator::new(&ctx, Personality::neutral()).generate(&[]);
        let hp_score = |id: u32| {
            candidates
                .iter()
                .find(|c| {
                    c.action.kind == ActionKind::HpAttack
                        && c.action.target == TargetSpec::Single(EntityId(id))
                })
                .map(|c| c.base)
                .unwrap()
        };
        assert!(hp_score(5) > hp_score(6));
    }
}
