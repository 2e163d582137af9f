//! Action resolution.
//!
//! ```text
//! validate -> pay costs -> per target: hit -> crit -> Brave phase -> HP phase
//!                                      -> heal/revive/cleanse -> statuses
//!          -> self statuses -> resource gain -> class triggers -> nonce++
//! ```
//!
//! Validation never mutates; any error it returns leaves the battle exactly
//! as it was.

use super::damage::{brave_damage, hp_damage};
use super::hit::{calculate_crit_chance, calculate_hit_chance, check_roll};
use super::report::{CombatEvent, ResolutionReport};
use crate::action::{Action, ActionKind, SkillFlags, StatusTemplate, TargetKind, TargetSpec};
use crate::context::BattleContext;
use crate::env::{CombatEnv, Trigger, TriggerEffect};
use crate::error::{CombatError, ErrorContext};
use crate::state::{BattleState, Combatant, EntityId};
use crate::stats::EffectiveStats;
use crate::status::{self, CleanseFilter, StatusEffect, StatusTag};

/// Roll slots reserved per target (hit, crit, statuses).
const SLOTS_PER_TARGET: u32 = 16;
const SLOT_HIT: u32 = 0;
const SLOT_CRIT: u32 = 1;
const SLOT_STATUS: u32 = 2;
/// Slot base for `on_self` status templates.
const SLOT_SELF_STATUS: u32 = 0xF000;

/// Checks that `action` can resolve right now and returns its targets.
///
/// Performs no mutation.
pub fn validate(
    action: &Action,
    battle: &BattleState,
    ctx: &BattleContext,
) -> Result<Vec<EntityId>, CombatError> {
    let base = ErrorContext::new(ctx.nonce).with_actor(action.actor);
    let skill = &action.skill;

    let actor = battle
        .get(action.actor)
        .ok_or_else(|| CombatError::invalid_state(base.clone().with_message("unknown actor")))?;
    if !actor.is_alive() {
        return Err(CombatError::invalid_state(
            base.with_message("actor is dead"),
        ));
    }
    if action.kind == ActionKind::Wait {
        return Ok(Vec::new());
    }
    if !actor.statuses.can_act() {
        return Err(CombatError::invalid_state(
            base.with_message("actor is control-locked"),
        ));
    }
    if !skill.is_innate() && !actor.statuses.can_use_skills() {
        return Err(CombatError::invalid_state(
            base.with_message("actor is silenced"),
        ));
    }
    if actor.mp < skill.mp_cost {
        return Err(CombatError::insufficient_resource(
            base.with_message("mp below cost"),
        ));
    }
    if let Some(cost) = &skill.resource_cost
        && !actor.resources.can_spend(&cost.name, cost.amount)
    {
        return Err(CombatError::insufficient_resource(
            base.with_message("class resource below cost"),
        ));
    }

    if action.kind == ActionKind::Defend {
        return Ok(vec![actor.id]);
    }
    select_targets(action, actor, battle, base)
}

fn select_targets(
    action: &Action,
    actor: &Combatant,
    battle: &BattleState,
    base: ErrorContext,
) -> Result<Vec<EntityId>, CombatError> {
    let skill = &action.skill;
    if !shape_matches(action.target, skill.target) {
        return Err(CombatError::invalid_target(
            base.with_message("target shape does not match skill"),
        ));
    }
    match action.target {
        TargetSpec::Single(id) => {
            let ctx = base.with_target(id);
            let target = battle.get(id).ok_or_else(|| {
                CombatError::invalid_target(ctx.clone().with_message("unknown target"))
            })?;
            if !target.is_alive() {
                return Err(CombatError::invalid_target(
                    ctx.with_message("target is dead"),
                ));
            }
            match skill.target {
                TargetKind::SingleEnemy if target.side == actor.side => Err(
                    CombatError::invalid_target(ctx.with_message("target is not an enemy")),
                ),
                TargetKind::SingleAlly if target.side != actor.side => Err(
                    CombatError::invalid_target(ctx.with_message("target is not an ally")),
                ),
                _ => Ok(vec![id]),
            }
        }
        TargetSpec::AllEnemies => {
            let ids: Vec<EntityId> = battle
                .living(actor.side.opposite())
                .map(|c| c.id)
                .collect();
            if ids.is_empty() {
                return Err(CombatError::invalid_target(
                    base.with_message("no living enemies"),
                ));
            }
            Ok(ids)
        }
        TargetSpec::AllAllies => Ok(battle.living(actor.side).map(|c| c.id).collect()),
        TargetSpec::SelfOnly => Ok(vec![actor.id]),
        TargetSpec::DeadAlly(id) => {
            let ctx = base.with_target(id);
            if !skill.flags.contains(SkillFlags::REVIVE) {
                return Err(CombatError::invalid_target(
                    ctx.with_message("skill cannot revive"),
                ));
            }
            match battle.get(id) {
                Some(target) if target.side == actor.side && !target.is_alive() => Ok(vec![id]),
                Some(target) if target.side != actor.side => Err(CombatError::invalid_target(
                    ctx.with_message("target is not an ally"),
                )),
                Some(_) => Err(CombatError::invalid_target(
                    ctx.with_message("target is alive"),
                )),
                None => Err(CombatError::invalid_target(
                    ctx.with_message("unknown target"),
                )),
            }
        }
    }
}

/// A concrete target must have the shape the skill declares.
fn shape_matches(spec: TargetSpec, kind: TargetKind) -> bool {
    matches!(
        (spec, kind),
        (
            TargetSpec::Single(_),
            TargetKind::SingleEnemy | TargetKind::SingleAlly
        ) | (TargetSpec::AllEnemies, TargetKind::AllEnemies)
            | (TargetSpec::AllAllies, TargetKind::AllAllies)
            | (TargetSpec::SelfOnly, TargetKind::SelfOnly)
            | (TargetSpec::DeadAlly(_), TargetKind::DeadAlly)
    )
}

/// Resolves `action` against `battle`.
///
/// On success the context nonce advances by one. On error nothing changes.
pub fn resolve(
    action: &Action,
    battle: &mut BattleState,
    ctx: &mut BattleContext,
    env: &CombatEnv<'_>,
) -> Result<ResolutionReport, CombatError> {
    let targets = validate(action, battle, ctx)?;
    let skill = &action.skill;
    let mut report = ResolutionReport::new(
        action.actor,
        action.kind,
        skill.name.clone(),
        ctx.nonce,
        ctx.effects_enabled,
    );
    let mut fired: Vec<Trigger> = Vec::new();

    let Some(actor_snapshot) = battle.get(action.actor).cloned() else {
        return Err(CombatError::invalid_state(
            ErrorContext::new(ctx.nonce)
                .with_actor(action.actor)
                .with_message("unknown actor"),
        ));
    };
    let actor_stats = EffectiveStats::of(&actor_snapshot, env.config);

    if action.kind != ActionKind::Wait {
        pay_costs(action, battle, &mut report);
    }

    match action.kind {
        ActionKind::Wait => {}
        ActionKind::Defend => {
            if let Some(actor) = battle.get_mut(action.actor) {
                let guard = StatusEffect::new(
                    StatusTag::Guard,
                    env.config.guard_duration,
                    env.config.guard_intensity,
                )
                .with_source(action.actor);
                status::apply(actor, guard);
                report.push(CombatEvent::Guarding {
                    actor: action.actor,
                });
            }
        }
        _ => {
            for (index, target_id) in targets.iter().enumerate() {
                resolve_target(
                    action,
                    *target_id,
                    index as u32 * SLOTS_PER_TARGET,
                    &actor_snapshot,
                    &actor_stats,
                    battle,
                    ctx,
                    env,
                    &mut report,
                    &mut fired,
                );
            }
        }
    }

    if action.kind.has_hp_phase()
        && let Some(actor) = battle.get_mut(action.actor)
    {
        let spent = actor.brave;
        actor.brave = 0;
        report.push(CombatEvent::BraveSpent {
            actor: action.actor,
            amount: spent,
        });
    }

    let self_templates: Vec<&StatusTemplate> =
        skill.statuses.iter().filter(|t| t.on_self).collect();
    for (index, template) in self_templates.into_iter().enumerate() {
        let seed = ctx.roll_seed(action.actor, SLOT_SELF_STATUS + index as u32);
        apply_template(action.actor, action.actor, template, seed, battle, env, &mut report);
    }

    if let Some(gain) = &skill.resource_gain
        && let Some(actor) = battle.get_mut(action.actor)
        && actor.is_alive()
    {
        let amount = actor.resources.gain(&gain.name, gain.amount);
        if amount > 0 {
            report.push(CombatEvent::ResourceGained {
                actor: action.actor,
                name: gain.name.clone(),
                amount,
            });
        }
    }

    apply_triggers(action.actor, &fired, battle, env, &mut report);

    tracing::debug!(
        actor = %action.actor,
        skill = %skill.name,
        events = report.events.len(),
        nonce = ctx.nonce,
        "action resolved"
    );
    ctx.nonce += 1;
    Ok(report)
}

fn pay_costs(action: &Action, battle: &mut BattleState, report: &mut ResolutionReport) {
    let skill = &action.skill;
    let Some(actor) = battle.get_mut(action.actor) else {
        return;
    };
    if skill.mp_cost > 0 && actor.spend_mp(skill.mp_cost) {
        report.push(CombatEvent::MpSpent {
            actor: action.actor,
            amount: skill.mp_cost,
        });
    }
    if let Some(cost) = &skill.resource_cost
        && cost.amount > 0
        && actor.resources.spend(&cost.name, cost.amount).is_ok()
    {
        report.push(CombatEvent::ResourceSpent {
            actor: action.actor,
            name: cost.name.clone(),
            amount: cost.amount,
        });
    }
}

#[allow(clippy::too_many_arguments)]
fn resolve_target(
    action: &Action,
    target_id: EntityId,
    slot_base: u32,
    actor: &Combatant,
    actor_stats: &EffectiveStats,
    battle: &mut BattleState,
    ctx: &BattleContext,
    env: &CombatEnv<'_>,
    report: &mut ResolutionReport,
    fired: &mut Vec<Trigger>,
) {
    let config = env.config;
    let skill = &action.skill;
    let kind = action.kind;
    let Some(target) = battle.get(target_id) else {
        return;
    };
    let target_stats = EffectiveStats::of(target, config);
    let target_snapshot = target.clone();

    if kind.is_offensive() {
        if !skill.flags.contains(SkillFlags::SURE_HIT) {
            let chance = calculate_hit_chance(actor_stats.accuracy, target_stats.evasion, config);
            let roll = env.rng.roll_d100(ctx.roll_seed(actor.id, slot_base + SLOT_HIT));
            if !check_roll(roll, chance) {
                report.push(CombatEvent::Miss { target: target_id });
                report.totals_mut(target_id);
                return;
            }
        }
        report.push(CombatEvent::Hit { target: target_id });
        report.totals_mut(target_id).hit = true;
        fired.push(Trigger::OnHit);
    }

    if kind.has_brave_phase() {
        let chance = calculate_crit_chance(actor_stats.critical, skill.crit_bonus, config);
        let roll = env.rng.roll_d100(ctx.roll_seed(actor.id, slot_base + SLOT_CRIT));
        let critical = check_roll(roll, chance);
        if critical {
            report.push(CombatEvent::Critical { target: target_id });
            report.totals_mut(target_id).critical = true;
            fired.push(Trigger::OnCritical);
        }

        let damage = brave_damage(
            actor,
            actor_stats,
            &target_snapshot,
            &target_stats,
            skill,
            critical,
            config,
        );
        brave_phase(action.actor, target_id, damage, battle, env, report, fired);
    }

    if kind.has_hp_phase() {
        hp_phase(action, target_id, battle, env, report, fired);
    }

    if kind == ActionKind::Heal {
        heal_target(action, target_id, actor_stats, battle, report, fired);
    }

    if skill.flags.contains(SkillFlags::CLEANSE)
        && let Some(target) = battle.get_mut(target_id)
    {
        let tags = status::cleanse(target, CleanseFilter::Harmful);
        if !tags.is_empty() {
            report.push(CombatEvent::Cleansed {
                target: target_id,
                tags,
            });
        }
    }

    let on_target = skill.statuses.iter().filter(|t| !t.on_self);
    for (index, template) in on_target.enumerate() {
        let seed = ctx.roll_seed(actor.id, slot_base + SLOT_STATUS + index as u32);
        apply_template(action.actor, target_id, template, seed, battle, env, report);
    }
}

fn brave_phase(
    actor_id: EntityId,
    target_id: EntityId,
    damage: u32,
    battle: &mut BattleState,
    env: &CombatEnv<'_>,
    report: &mut ResolutionReport,
    fired: &mut Vec<Trigger>,
) {
    let Some(target) = battle.get_mut(target_id) else {
        return;
    };
    let had_brave = target.brave > 0;
    target.lose_brave(damage);
    wake_on_damage(target);
    let broke = had_brave && target.brave == 0;
    if broke {
        target.broken = true;
    }

    report.push(CombatEvent::BraveDamage {
        target: target_id,
        amount: damage,
    });
    report.totals_mut(target_id).brave_damage += damage;
    if broke {
        report.push(CombatEvent::Break { target: target_id });
        fired.push(Trigger::OnBreak);
    }

    let transfer = (damage as f32 * env.config.brave_transfer).floor() as u32;
    if let Some(actor) = battle.get_mut(actor_id) {
        let gained = actor.gain_brave(transfer);
        if gained > 0 {
            report.push(CombatEvent::BraveGained {
                actor: actor_id,
                amount: gained,
            });
        }
    }
}

fn hp_phase(
    action: &Action,
    target_id: EntityId,
    battle: &mut BattleState,
    env: &CombatEnv<'_>,
    report: &mut ResolutionReport,
    fired: &mut Vec<Trigger>,
) {
    let Some(attacker_brave) = battle.get(action.actor).map(|a| a.brave) else {
        return;
    };
    let Some(target) = battle.get_mut(target_id) else {
        return;
    };
    if !target.is_alive() {
        return;
    }

    let damage = hp_damage(attacker_brave, action.skill.hp_power);
    let dealt = target.take_hp_damage(damage);
    wake_on_damage(target);
    let killed = !target.is_alive();

    report.push(CombatEvent::HpDamage {
        target: target_id,
        amount: dealt,
    });
    fired.push(Trigger::OnHpAttack);
    {
        let totals = report.totals_mut(target_id);
        totals.hp_damage += dealt;
        totals.killed |= killed;
    }
    if killed {
        report.push(CombatEvent::Died { target: target_id });
        fired.push(Trigger::OnKill);
    }

    if action.skill.flags.contains(SkillFlags::DRAIN)
        && let Some(actor) = battle.get_mut(action.actor)
    {
        let amount = (dealt as f32 * env.config.drain_fraction).floor() as u32;
        let healed = actor.heal(amount);
        if healed > 0 {
            report.push(CombatEvent::Healed {
                target: action.actor,
                amount: healed,
            });
        }
    }
}

fn heal_target(
    action: &Action,
    target_id: EntityId,
    actor_stats: &EffectiveStats,
    battle: &mut BattleState,
    report: &mut ResolutionReport,
    fired: &mut Vec<Trigger>,
) {
    let Some(target) = battle.get_mut(target_id) else {
        return;
    };
    let amount = ((actor_stats.magic * action.skill.hp_power as f32 / 100.0).floor() as u32).max(1);

    if !target.is_alive() {
        if action.skill.flags.contains(SkillFlags::REVIVE) {
            let hp = target.revive(amount);
            report.push(CombatEvent::Revived {
                target: target_id,
                hp,
            });
            report.totals_mut(target_id).healed += hp;
            fired.push(Trigger::OnHeal);
        }
        return;
    }

    let healed = target.heal(amount);
    report.push(CombatEvent::Healed {
        target: target_id,
        amount: healed,
    });
    report.totals_mut(target_id).healed += healed;
    fired.push(Trigger::OnHeal);
}

fn apply_template(
    source: EntityId,
    target_id: EntityId,
    template: &StatusTemplate,
    seed: u64,
    battle: &mut BattleState,
    env: &CombatEnv<'_>,
    report: &mut ResolutionReport,
) {
    let Some(target) = battle.get_mut(target_id) else {
        return;
    };
    if !target.is_alive() {
        return;
    }
    if !env.rng.chance(seed, template.chance) {
        report.push(CombatEvent::StatusResisted {
            target: target_id,
            tag: template.tag,
        });
        return;
    }

    let effect =
        StatusEffect::new(template.tag, template.duration, template.intensity).with_source(source);
    let outcome = status::apply(target, effect);
    if outcome.is_applied() {
        report.push(CombatEvent::StatusApplied {
            target: target_id,
            tag: template.tag,
            outcome,
        });
    } else {
        report.push(CombatEvent::StatusResisted {
            target: target_id,
            tag: template.tag,
        });
    }
}

fn apply_triggers(
    actor_id: EntityId,
    fired: &[Trigger],
    battle: &mut BattleState,
    env: &CombatEnv<'_>,
    report: &mut ResolutionReport,
) {
    let Some(actor) = battle.get_mut(actor_id) else {
        return;
    };
    if !actor.is_alive() {
        return;
    }
    let class = actor.class.clone();

    for trigger in fired {
        for effect in env.triggers.effects(&class, *trigger) {
            match effect {
                TriggerEffect::GainResource { name, amount } => {
                    let gained = actor.resources.gain(name, *amount);
                    if gained > 0 {
                        report.push(CombatEvent::ResourceGained {
                            actor: actor_id,
                            name: name.clone(),
                            amount: gained,
                        });
                    }
                }
                TriggerEffect::ApplySelfStatus {
                    tag,
                    duration,
                    intensity,
                } => {
                    let outcome = status::apply(
                        actor,
                        StatusEffect::new(*tag, *duration, *intensity).with_source(actor_id),
                    );
                    if outcome.is_applied() {
                        report.push(CombatEvent::StatusApplied {
                            target: actor_id,
                            tag: *tag,
                            outcome,
                        });
                    }
                }
                TriggerEffect::GainBrave(amount) => {
                    let gained = actor.gain_brave(*amount);
                    if gained > 0 {
                        report.push(CombatEvent::BraveGained {
                            actor: actor_id,
                            amount: gained,
                        });
                    }
                }
            }
            tracing::trace!(actor = %actor_id, %trigger, "class trigger applied");
        }
    }
}

/// Sleep breaks when the sleeper takes damage.
fn wake_on_damage(target: &mut Combatant) {
    target.statuses.remove(StatusTag::Sleep);
}
