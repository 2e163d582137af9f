//! Built-in content so the core can run without data files.
//!
//! Four party classes (warrior, mage, cleric, rogue) and four enemy classes
//! (goblin, ogre, wraith, shaman). Loaded files are merged over these.

use game_core::action::{DamageKind, Penetration};
use game_core::combat::Element;
use game_core::env::{Trigger, TriggerEffect};
use game_core::state::DecayRule;
use game_core::{
    ActionKind, Archetype, Controller, CoreStats, ResourceDefinition, Side, SkillDescriptor,
    SkillFlags, StatusTag, StatusTemplate, TargetKind,
};

use crate::encounter::{CombatantSpec, EncounterSpec};
use crate::registry::{ClassDefinition, ContentRegistry};

/// Registry with every built-in class.
pub fn registry() -> ContentRegistry {
    ContentRegistry::from_classes([
        warrior(),
        mage(),
        cleric(),
        rogue(),
        goblin(),
        ogre(),
        wraith(),
        shaman(),
    ])
}

/// Four-versus-four skirmish between the built-in party and enemy classes.
pub fn encounter(seed: u64) -> EncounterSpec {
    let party = |name: &str, class: &str, hp, mp, stats| {
        CombatantSpec::new(name, class, Side::Party)
            .with_level(10)
            .with_pools(hp, mp, 300)
            .with_stats(stats)
    };
    let enemy = |name: &str, class: &str, hp, mp, stats| {
        CombatantSpec::new(name, class, Side::Enemy)
            .with_level(10)
            .with_pools(hp, mp, 200)
            .with_stats(stats)
    };

    EncounterSpec::new(seed)
        .with(party("Brand", "warrior", 820, 30, CoreStats::new(62, 18, 55, 30, 38, 20)))
        .with(party("Ilsa", "mage", 520, 120, CoreStats::new(22, 68, 30, 58, 44, 25)))
        .with(party("Oren", "cleric", 600, 110, CoreStats::new(28, 55, 40, 60, 40, 30)))
        .with(party("Vex", "rogue", 580, 40, CoreStats::new(55, 20, 36, 32, 62, 45)))
        .with(
            enemy("Goblin", "goblin", 480, 20, CoreStats::new(48, 15, 34, 25, 50, 30))
                .with_elements([Element::Earth]),
        )
        .with(enemy("Ogre", "ogre", 900, 0, CoreStats::new(70, 10, 58, 20, 26, 10)))
        .with(
            enemy("Wraith", "wraith", 560, 80, CoreStats::new(30, 60, 28, 55, 46, 25))
                .with_elements([Element::Dark]),
        )
        .with(enemy("Shaman", "shaman", 500, 90, CoreStats::new(24, 52, 32, 50, 42, 28)))
}

/// Same as [`encounter`] with the first party member under player control.
pub fn encounter_with_player(seed: u64) -> EncounterSpec {
    let mut spec = encounter(seed);
    if let Some(first) = spec.combatants.first_mut() {
        first.controller = Some(Controller::Player);
    }
    spec
}

fn gain(name: &str, amount: u32) -> TriggerEffect {
    TriggerEffect::GainResource {
        name: name.into(),
        amount,
    }
}

fn warrior() -> ClassDefinition {
    ClassDefinition::new("warrior")
        .with_archetype(Archetype::Aggressive)
        .with_stats(CoreStats::new(60, 15, 55, 30, 35, 20))
        .with_resource(ResourceDefinition::new("rage", 100).with_decay(DecayRule::PerTurn(5)))
        .with_skill(
            SkillDescriptor::new("Cleave", ActionKind::BraveAttack)
                .with_target(TargetKind::AllEnemies)
                .with_power(70, 0),
        )
        .with_skill(
            SkillDescriptor::new("Crushing Blow", ActionKind::BraveHpAttack)
                .with_power(90, 100)
                .with_penetration(Penetration::ArmorBreak(0.3))
                .with_resource_cost("rage", 50),
        )
        .with_skill(
            SkillDescriptor::new("Battle Cry", ActionKind::Buff)
                .with_target(TargetKind::SelfOnly)
                .with_status(StatusTemplate::new(StatusTag::AttackUp, 100, 3, 0.2)),
        )
        .on(Trigger::OnHit, gain("rage", 10))
        .on(Trigger::OnBreak, gain("rage", 25))
}

fn mage() -> ClassDefinition {
    ClassDefinition::new("mage")
        .with_archetype(Archetype::Tactical)
        .with_stats(CoreStats::new(20, 65, 30, 55, 42, 25))
        .with_resource(ResourceDefinition::new("charge", 3))
        .with_skill(
            SkillDescriptor::new("Fire", ActionKind::BraveAttack)
                .with_damage_kind(DamageKind::Magical)
                .with_element(Element::Fire)
                .with_power(130, 0)
                .with_mp_cost(8)
                .with_status(StatusTemplate::new(StatusTag::Burn, 30, 3, 8.0)),
        )
        .with_skill(
            SkillDescriptor::new("Blizzard", ActionKind::BraveAttack)
                .with_target(TargetKind::AllEnemies)
                .with_damage_kind(DamageKind::Magical)
                .with_element(Element::Ice)
                .with_power(90, 0)
                .with_mp_cost(18),
        )
        .with_skill(
            SkillDescriptor::new("Meteor", ActionKind::BraveHpAttack)
                .with_damage_kind(DamageKind::Magical)
                .with_penetration(Penetration::MagicalPierce)
                .with_power(180, 120)
                .with_mp_cost(30)
                .with_cast_time(4_000)
                .with_resource_cost("charge", 2),
        )
        .with_skill(
            SkillDescriptor::new("Slow", ActionKind::Debuff)
                .with_damage_kind(DamageKind::Magical)
                .with_mp_cost(6)
                .with_status(StatusTemplate::new(StatusTag::Slow, 80, 3, 0.3)),
        )
        .on(Trigger::OnCritical, gain("charge", 1))
        .on(Trigger::OnBreak, gain("charge", 1))
}

fn cleric() -> ClassDefinition {
    ClassDefinition::new("cleric")
        .with_archetype(Archetype::Support)
        .with_stats(CoreStats::new(25, 55, 40, 60, 40, 30))
        .with_resource(ResourceDefinition::new("faith", 5))
        .with_skill(
            SkillDescriptor::new("Cure", ActionKind::Heal)
                .with_power(0, 250)
                .with_mp_cost(6),
        )
        .with_skill(
            SkillDescriptor::new("Esuna", ActionKind::Heal)
                .with_power(0, 40)
                .with_mp_cost(5)
                .with_flags(SkillFlags::CLEANSE),
        )
        .with_skill(
            SkillDescriptor::new("Raise", ActionKind::Heal)
                .with_target(TargetKind::DeadAlly)
                .with_power(0, 300)
                .with_mp_cost(20)
                .with_cast_time(2_000)
                .with_flags(SkillFlags::REVIVE),
        )
        .with_skill(
            SkillDescriptor::new("Regen", ActionKind::Buff)
                .with_mp_cost(8)
                .with_status(StatusTemplate::new(StatusTag::Regen, 100, 5, 15.0)),
        )
        .with_skill(
            SkillDescriptor::new("Protect", ActionKind::Buff)
                .with_target(TargetKind::AllAllies)
                .with_mp_cost(12)
                .with_status(StatusTemplate::new(StatusTag::DefenseUp, 100, 4, 0.2)),
        )
        .with_skill(
            SkillDescriptor::new("Holy", ActionKind::BraveAttack)
                .with_damage_kind(DamageKind::Magical)
                .with_element(Element::Light)
                .with_power(110, 0)
                .with_mp_cost(10),
        )
        .on(Trigger::OnHeal, gain("faith", 1))
}

fn rogue() -> ClassDefinition {
    ClassDefinition::new("rogue")
        .with_archetype(Archetype::Aggressive)
        .with_stats(CoreStats::new(55, 20, 35, 30, 60, 45))
        .with_resource(ResourceDefinition::new("combo", 5))
        .with_skill(
            SkillDescriptor::new("Backstab", ActionKind::BraveAttack)
                .with_power(110, 0)
                .with_crit_bonus(25)
                .with_resource_gain("combo", 1),
        )
        .with_skill(
            SkillDescriptor::new("Venom Strike", ActionKind::BraveAttack)
                .with_power(80, 0)
                .with_status(StatusTemplate::new(StatusTag::Poison, 60, 4, 10.0)),
        )
        .with_skill(
            SkillDescriptor::new("Eviscerate", ActionKind::HpAttack)
                .with_power(0, 150)
                .with_resource_cost("combo", 3)
                .with_flags(SkillFlags::SURE_HIT),
        )
        .on(Trigger::OnCritical, gain("combo", 1))
        .on(Trigger::OnKill, TriggerEffect::GainBrave(100))
}

fn goblin() -> ClassDefinition {
    ClassDefinition::new("goblin")
        .with_archetype(Archetype::Aggressive)
        .with_stats(CoreStats::new(45, 15, 32, 25, 50, 30))
        .with_skill(SkillDescriptor::new("Stab", ActionKind::BraveAttack).with_power(110, 0))
        .with_skill(
            SkillDescriptor::new("Dirty Trick", ActionKind::Debuff)
                .with_status(StatusTemplate::new(StatusTag::Blind, 70, 3, 0.2)),
        )
}

fn ogre() -> ClassDefinition {
    ClassDefinition::new("ogre")
        .with_archetype(Archetype::Berserker)
        .with_stats(CoreStats::new(70, 10, 55, 20, 25, 10))
        .with_skill(
            SkillDescriptor::new("Smash", ActionKind::BraveHpAttack).with_power(120, 100),
        )
        .with_skill(
            SkillDescriptor::new("Roar", ActionKind::Buff)
                .with_target(TargetKind::SelfOnly)
                .with_status(StatusTemplate::new(StatusTag::Berserk, 100, 3, 0.3)),
        )
        .on(
            Trigger::OnBreak,
            TriggerEffect::ApplySelfStatus {
                tag: StatusTag::AttackUp,
                duration: 2,
                intensity: 0.1,
            },
        )
}

fn wraith() -> ClassDefinition {
    ClassDefinition::new("wraith")
        .with_archetype(Archetype::Adaptive)
        .with_stats(CoreStats::new(30, 60, 28, 55, 46, 25))
        .with_skill(
            SkillDescriptor::new("Drain Touch", ActionKind::HpAttack)
                .with_damage_kind(DamageKind::Magical)
                .with_element(Element::Dark)
                .with_power(0, 100)
                .with_mp_cost(10)
                .with_flags(SkillFlags::DRAIN),
        )
        .with_skill(
            SkillDescriptor::new("Curse", ActionKind::Debuff)
                .with_damage_kind(DamageKind::Magical)
                .with_mp_cost(8)
                .with_status(StatusTemplate::new(StatusTag::DefenseDown, 70, 3, 0.25))
                .with_status(StatusTemplate::new(StatusTag::Silence, 40, 2, 1.0)),
        )
        .with_skill(
            SkillDescriptor::new("Shadow Bolt", ActionKind::BraveAttack)
                .with_damage_kind(DamageKind::Magical)
                .with_element(Element::Dark)
                .with_power(120, 0)
                .with_mp_cost(6),
        )
}

fn shaman() -> ClassDefinition {
    ClassDefinition::new("shaman")
        .with_archetype(Archetype::Support)
        .with_stats(CoreStats::new(22, 50, 30, 50, 40, 28))
        .with_skill(
            SkillDescriptor::new("Mend", ActionKind::Heal)
                .with_power(0, 200)
                .with_mp_cost(5),
        )
        .with_skill(
            SkillDescriptor::new("Hex", ActionKind::Debuff)
                .with_damage_kind(DamageKind::Magical)
                .with_mp_cost(7)
                .with_status(StatusTemplate::new(StatusTag::Sleep, 50, 2, 1.0)),
        )
        .with_skill(
            SkillDescriptor::new("Spark", ActionKind::BraveAttack)
                .with_damage_kind(DamageKind::Magical)
                .with_element(Element::Thunder)
                .with_power(100, 0)
                .with_mp_cost(4),
        )
}
