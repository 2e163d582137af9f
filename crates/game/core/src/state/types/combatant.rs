use super::common::{ClassTag, Controller, EntityId, Side};
use super::resources::{ResourceBag, ResourceDefinition};
use crate::combat::Element;
use crate::stats::{CoreStats, StatBonuses};
use crate::status::StatusEffects;

/// A participant in one encounter.
///
/// Pools are stored as current/max pairs; every mutator below keeps
/// `0 <= current <= max` with saturating arithmetic.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: EntityId,
    pub name: String,
    pub class: ClassTag,
    pub level: u32,
    pub side: Side,
    pub controller: Controller,

    pub hp: u32,
    pub max_hp: u32,
    pub brave: u32,
    pub max_brave: u32,
    pub mp: u32,
    pub max_mp: u32,

    pub stats: CoreStats,
    pub bonuses: StatBonuses,
    /// Element tags used as the defending side of the affinity table.
    pub elements: Vec<Element>,

    /// Readiness gauge, `0..=ready_threshold`.
    pub gauge: u32,
    /// Set when Brave is knocked to 0; cleared at the round boundary.
    pub broken: bool,
    pub statuses: StatusEffects,
    pub resources: ResourceBag,
}

impl Combatant {
    pub fn new(id: EntityId, name: impl Into<String>, side: Side) -> Self {
        Self {
            id,
            name: name.into(),
            class: ClassTag::default(),
            level: 1,
            side,
            controller: Controller::default(),
            hp: 100,
            max_hp: 100,
            brave: 0,
            max_brave: 9_999,
            mp: 0,
            max_mp: 0,
            stats: CoreStats::default(),
            bonuses: StatBonuses::default(),
            elements: Vec::new(),
            gauge: 0,
            broken: false,
            statuses: StatusEffects::empty(),
            resources: ResourceBag::new(),
        }
    }

    pub fn with_class(mut self, class: impl Into<ClassTag>) -> Self {
        self.class = class.into();
        self
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level.max(1);
        self
    }

    pub fn with_controller(mut self, controller: Controller) -> Self {
        self.controller = controller;
        self
    }

    /// Sets max HP and fills the pool.
    pub fn with_hp(mut self, max_hp: u32) -> Self {
        self.max_hp = max_hp.max(1);
        self.hp = self.max_hp;
        self
    }

    /// Sets starting and maximum Brave.
    pub fn with_brave(mut self, brave: u32, max_brave: u32) -> Self {
        self.max_brave = max_brave;
        self.brave = brave.min(max_brave);
        self
    }

    /// Sets max MP and fills the pool.
    pub fn with_mp(mut self, max_mp: u32) -> Self {
        self.max_mp = max_mp;
        self.mp = max_mp;
        self
    }

    pub fn with_stats(mut self, stats: CoreStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_bonuses(mut self, bonuses: StatBonuses) -> Self {
        self.bonuses = bonuses;
        self
    }

    pub fn with_elements(mut self, elements: impl IntoIterator<Item = Element>) -> Self {
        self.elements = elements.into_iter().collect();
        self
    }

    pub fn with_resources(mut self, definitions: &[ResourceDefinition]) -> Self {
        self.resources = ResourceBag::from_definitions(definitions);
        self
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn is_player(&self) -> bool {
        self.controller.is_player()
    }

    pub fn hp_ratio(&self) -> f32 {
        ratio(self.hp, self.max_hp)
    }

    pub fn brave_ratio(&self) -> f32 {
        ratio(self.brave, self.max_brave)
    }

    pub fn mp_ratio(&self) -> f32 {
        ratio(self.mp, self.max_mp)
    }

    /// Removes up to `amount` HP; returns the HP actually lost.
    ///
    /// Reaching 0 HP runs [`Self::mark_dead`].
    pub fn take_hp_damage(&mut self, amount: u32) -> u32 {
        let dealt = amount.min(self.hp);
        self.hp -= dealt;
        if self.hp == 0 && dealt > 0 {
            self.mark_dead();
        }
        dealt
    }

    /// Restores up to `amount` HP on a living combatant.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if !self.is_alive() {
            return 0;
        }
        let healed = amount.min(self.max_hp - self.hp);
        self.hp += healed;
        healed
    }

    /// Brings a dead combatant back with `hp` (at least 1, at most max).
    pub fn revive(&mut self, hp: u32) -> u32 {
        if self.is_alive() {
            return 0;
        }
        self.hp = hp.clamp(1, self.max_hp);
        self.hp
    }

    pub fn lose_brave(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.brave);
        self.brave -= lost;
        lost
    }

    pub fn gain_brave(&mut self, amount: u32) -> u32 {
        let gained = amount.min(self.max_brave.saturating_sub(self.brave));
        self.brave += gained;
        gained
    }

    pub fn spend_mp(&mut self, amount: u32) -> bool {
        if self.mp < amount {
            return false;
        }
        self.mp -= amount;
        true
    }

    /// Death transition: statuses cleared, gauge and Brave zeroed.
    pub fn mark_dead(&mut self) {
        self.hp = 0;
        self.brave = 0;
        self.gauge = 0;
        self.broken = false;
        self.statuses.clear();
    }
}

fn ratio(current: u32, max: u32) -> f32 {
    if max == 0 {
        0.0
    } else {
        current as f32 / max as f32
    }
}
