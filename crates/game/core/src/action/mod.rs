//! Actions: what a combatant does with its turn.
//!
//! An [`Action`] pairs an actor and a concrete target choice with the
//! [`SkillDescriptor`] that defines its numbers. Actions are built by the
//! decision engine or player input, resolved once, and discarded; the only
//! exception is an action with a cast time, which the scheduler holds until
//! its charge completes.
pub mod skill;

pub use skill::{
    DamageKind, Penetration, ResourceAmount, SkillDescriptor, SkillFlags, StatusTemplate,
};

use crate::state::EntityId;

/// What an action does when it resolves.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    /// Innate Brave attack.
    #[default]
    BasicAttack,
    BraveAttack,
    HpAttack,
    /// Brave phase, then HP phase if the target survives.
    BraveHpAttack,
    Heal,
    Buff,
    Debuff,
    /// Applies its statuses to every target without a hit roll.
    Field,
    /// Brave + HP finisher.
    Ultimate,
    /// Reactive Brave attack.
    Counter,
    /// Grants Guard to the actor.
    Defend,
    /// Ends the turn with no effect.
    Wait,
}

impl ActionKind {
    /// Offensive kinds roll to hit against each target.
    pub const fn is_offensive(self) -> bool {
        matches!(
            self,
            Self::BasicAttack
                | Self::BraveAttack
                | Self::HpAttack
                | Self::BraveHpAttack
                | Self::Debuff
                | Self::Ultimate
                | Self::Counter
        )
    }

    pub const fn has_brave_phase(self) -> bool {
        matches!(
            self,
            Self::BasicAttack
                | Self::BraveAttack
                | Self::Counter
                | Self::BraveHpAttack
                | Self::Ultimate
        )
    }

    pub const fn has_hp_phase(self) -> bool {
        matches!(self, Self::HpAttack | Self::BraveHpAttack | Self::Ultimate)
    }

    pub const fn is_support(self) -> bool {
        matches!(self, Self::Heal | Self::Buff)
    }

    pub const fn default_target(self) -> TargetKind {
        match self {
            Self::Heal | Self::Buff => TargetKind::SingleAlly,
            Self::Field => TargetKind::AllEnemies,
            Self::Defend | Self::Wait => TargetKind::SelfOnly,
            _ => TargetKind::SingleEnemy,
        }
    }
}

/// Target shape a skill accepts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetKind {
    #[default]
    SingleEnemy,
    SingleAlly,
    AllEnemies,
    AllAllies,
    SelfOnly,
    DeadAlly,
}

/// Concrete target choice carried by an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetSpec {
    Single(EntityId),
    AllAllies,
    AllEnemies,
    SelfOnly,
    DeadAlly(EntityId),
}

impl TargetSpec {
    /// Default concrete target for a skill aimed at `id`.
    pub fn for_skill(kind: TargetKind, id: EntityId) -> Self {
        match kind {
            TargetKind::SingleEnemy | TargetKind::SingleAlly => Self::Single(id),
            TargetKind::AllEnemies => Self::AllEnemies,
            TargetKind::AllAllies => Self::AllAllies,
            TargetKind::SelfOnly => Self::SelfOnly,
            TargetKind::DeadAlly => Self::DeadAlly(id),
        }
    }

    pub fn single_id(self) -> Option<EntityId> {
        match self {
            Self::Single(id) | Self::DeadAlly(id) => Some(id),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    pub actor: EntityId,
    pub kind: ActionKind,
    pub target: TargetSpec,
    pub skill: SkillDescriptor,
}

impl Action {
    pub fn new(actor: EntityId, skill: SkillDescriptor, target: TargetSpec) -> Self {
        Self {
            actor,
            kind: skill.kind,
            target,
            skill,
        }
    }

    pub fn wait(actor: EntityId) -> Self {
        Self::new(actor, SkillDescriptor::wait(), TargetSpec::SelfOnly)
    }

    pub fn defend(actor: EntityId) -> Self {
        Self::new(actor, SkillDescriptor::defend(), TargetSpec::SelfOnly)
    }

    pub fn basic_attack(actor: EntityId, target: EntityId) -> Self {
        Self::new(actor, SkillDescriptor::basic_attack(), TargetSpec::Single(target))
    }

    pub fn hp_attack(actor: EntityId, target: EntityId) -> Self {
        Self::new(
            actor,
            SkillDescriptor::basic_hp_attack(),
            TargetSpec::Single(target),
        )
    }

    pub fn is_wait(&self) -> bool {
        self.kind == ActionKind::Wait
    }
}
