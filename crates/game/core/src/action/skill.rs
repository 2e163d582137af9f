//! Skill descriptors: the data record behind every action.
//!
//! Descriptors are content. The core never invents them except for the
//! innate basic attack, defend and wait actions every combatant has.

use bitflags::bitflags;

use super::{ActionKind, TargetKind};
use crate::combat::Element;
use crate::status::StatusTag;

/// Which attack/defense pair a skill uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageKind {
    #[default]
    Physical,
    Magical,
    /// Average of the physical and magical ratios.
    Hybrid,
}

/// Defense-bypassing modifier.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Penetration {
    #[default]
    None,
    /// Physical defense reduced by the configured pierce fraction.
    PhysicalPierce,
    /// Magic defense reduced by the configured pierce fraction.
    MagicalPierce,
    /// Blend weight in `[0, 1]` toward defense = 1.
    TrueDamage(f32),
    /// Defense multiplied by `1 - rate` for this calculation.
    ArmorBreak(f32),
}

/// A named class-resource amount.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceAmount {
    pub name: String,
    pub amount: u32,
}

impl ResourceAmount {
    pub fn new(name: impl Into<String>, amount: u32) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }
}

/// A status effect a skill may attach on resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusTemplate {
    pub tag: StatusTag,
    /// Application chance in percent.
    pub chance: u32,
    pub duration: u32,
    pub intensity: f32,
    /// Applied to the actor instead of the target.
    #[cfg_attr(feature = "serde", serde(default))]
    pub on_self: bool,
}

impl StatusTemplate {
    pub fn new(tag: StatusTag, chance: u32, duration: u32, intensity: f32) -> Self {
        Self {
            tag,
            chance,
            duration,
            intensity,
            on_self: false,
        }
    }

    pub fn on_self(mut self) -> Self {
        self.on_self = true;
        self
    }
}

bitflags! {
    /// Special behaviours a skill can carry.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct SkillFlags: u8 {
        /// Heals a dead ally back to life.
        const REVIVE   = 1 << 0;
        /// Removes debuffs, damage-over-time and control effects.
        const CLEANSE  = 1 << 1;
        /// Skips the hit roll.
        const SURE_HIT = 1 << 2;
        /// Heals the attacker for a fraction of HP damage dealt.
        const DRAIN    = 1 << 3;
        /// Always available; not blocked by silence.
        const INNATE   = 1 << 4;
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SkillDescriptor {
    pub name: String,
    pub kind: ActionKind,
    pub target: TargetKind,
    pub element: Element,
    pub damage_kind: DamageKind,
    pub penetration: Penetration,
    /// Brave-phase power in percent.
    pub brave_power: u32,
    /// HP-phase (and heal) power in percent.
    pub hp_power: u32,
    /// Added to the actor's critical chance, in percentage points.
    pub crit_bonus: i32,
    pub mp_cost: u32,
    pub resource_cost: Option<ResourceAmount>,
    pub resource_gain: Option<ResourceAmount>,
    /// Gauge points to charge before resolution; 0 resolves immediately.
    pub cast_time: u32,
    pub statuses: Vec<StatusTemplate>,
    pub flags: SkillFlags,
}

impl Default for SkillDescriptor {
    fn default() -> Self {
        Self {
            name: "Attack".into(),
            kind: ActionKind::BasicAttack,
            target: TargetKind::SingleEnemy,
            element: Element::Neutral,
            damage_kind: DamageKind::Physical,
            penetration: Penetration::None,
            brave_power: 100,
            hp_power: 100,
            crit_bonus: 0,
            mp_cost: 0,
            resource_cost: None,
            resource_gain: None,
            cast_time: 0,
            statuses: Vec::new(),
            flags: SkillFlags::empty(),
        }
    }
}

impl SkillDescriptor {
    pub fn new(name: impl Into<String>, kind: ActionKind) -> Self {
        Self {
            name: name.into(),
            kind,
            target: kind.default_target(),
            ..Self::default()
        }
    }

    /// The innate Brave attack every combatant can use.
    pub fn basic_attack() -> Self {
        Self::new("Attack", ActionKind::BasicAttack).with_flags(SkillFlags::INNATE)
    }

    /// The innate HP attack every combatant can use.
    pub fn basic_hp_attack() -> Self {
        Self::new("HP Attack", ActionKind::HpAttack).with_flags(SkillFlags::INNATE)
    }

    pub fn defend() -> Self {
        Self::new("Defend", ActionKind::Defend).with_flags(SkillFlags::INNATE)
    }

    pub fn wait() -> Self {
        Self::new("Wait", ActionKind::Wait).with_flags(SkillFlags::INNATE)
    }

    pub fn with_target(mut self, target: TargetKind) -> Self {
        self.target = target;
        self
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.element = element;
        self
    }

    pub fn with_damage_kind(mut self, damage_kind: DamageKind) -> Self {
        self.damage_kind = damage_kind;
        self
    }

    pub fn with_penetration(mut self, penetration: Penetration) -> Self {
        self.penetration = penetration;
        self
    }

    pub fn with_power(mut self, brave_power: u32, hp_power: u32) -> Self {
        self.brave_power = brave_power;
        self.hp_power = hp_power;
        self
    }

    pub fn with_mp_cost(mut self, mp_cost: u32) -> Self {
        self.mp_cost = mp_cost;
        self
    }

    pub fn with_resource_cost(mut self, name: impl Into<String>, amount: u32) -> Self {
        self.resource_cost = Some(ResourceAmount::new(name, amount));
        self
    }

    pub fn with_resource_gain(mut self, name: impl Into<String>, amount: u32) -> Self {
        self.resource_gain = Some(ResourceAmount::new(name, amount));
        self
    }

    pub fn with_cast_time(mut self, cast_time: u32) -> Self {
        self.cast_time = cast_time;
        self
    }

    pub fn with_crit_bonus(mut self, crit_bonus: i32) -> Self {
        self.crit_bonus = crit_bonus;
        self
    }

    pub fn with_status(mut self, template: StatusTemplate) -> Self {
        self.statuses.push(template);
        self
    }

    pub fn with_flags(mut self, flags: SkillFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Innate actions stay usable under silence.
    pub fn is_innate(&self) -> bool {
        self.flags.contains(SkillFlags::INNATE)
            || matches!(self.kind, ActionKind::Wait | ActionKind::Defend)
    }
}
