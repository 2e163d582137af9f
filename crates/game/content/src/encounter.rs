//! Encounter rosters: which combatants start a battle, and how they are built.

use game_core::{
    BattleState, ClassOracle, ClassTag, Combatant, Controller, CoreStats, EntityId, Side,
    StatBonuses, combat::Element,
};

/// One roster entry.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantSpec {
    pub name: String,
    pub class: ClassTag,
    pub side: Side,
    #[cfg_attr(feature = "serde", serde(default = "default_level"))]
    pub level: u32,
    /// `None` uses the class archetype hint (or the default profile).
    #[cfg_attr(feature = "serde", serde(default))]
    pub controller: Option<Controller>,
    pub hp: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mp: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub brave: u32,
    #[cfg_attr(feature = "serde", serde(default = "default_max_brave"))]
    pub max_brave: u32,
    /// Overrides the class base stats.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stats: Option<CoreStats>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonuses: StatBonuses,
    #[cfg_attr(feature = "serde", serde(default))]
    pub elements: Vec<Element>,
}

#[cfg(feature = "serde")]
fn default_level() -> u32 {
    1
}

#[cfg(feature = "serde")]
fn default_max_brave() -> u32 {
    9_999
}

impl CombatantSpec {
    pub fn new(name: impl Into<String>, class: impl Into<ClassTag>, side: Side) -> Self {
        Self {
            name: name.into(),
            class: class.into(),
            side,
            level: 1,
            controller: None,
            hp: 100,
            mp: 0,
            brave: 0,
            max_brave: 9_999,
            stats: None,
            bonuses: StatBonuses::default(),
            elements: Vec::new(),
        }
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn with_controller(mut self, controller: Controller) -> Self {
        self.controller = Some(controller);
        self
    }

    pub fn with_pools(mut self, hp: u32, mp: u32, brave: u32) -> Self {
        self.hp = hp;
        self.mp = mp;
        self.brave = brave;
        self
    }

    pub fn with_stats(mut self, stats: CoreStats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_elements(mut self, elements: impl IntoIterator<Item = Element>) -> Self {
        self.elements = elements.into_iter().collect();
        self
    }

    /// Builds the combatant, pulling stats, resources and AI profile from
    /// its class. Unknown classes fall back to default stats and no counters.
    pub fn build(&self, id: EntityId, classes: &dyn ClassOracle) -> Combatant {
        let base = classes.base_stats(&self.class);
        if base.is_none() {
            tracing::warn!(class = %self.class, name = %self.name, "unknown class in roster");
        }
        let stats = self.stats.or(base).unwrap_or_default();
        let controller = self.controller.unwrap_or_else(|| {
            classes
                .archetype_hint(&self.class)
                .map(Controller::Ai)
                .unwrap_or_default()
        });
        let resources = classes.resources(&self.class);

        Combatant::new(id, self.name.clone(), self.side)
            .with_class(self.class.clone())
            .with_level(self.level)
            .with_controller(controller)
            .with_hp(self.hp)
            .with_mp(self.mp)
            .with_brave(self.brave.min(self.max_brave), self.max_brave)
            .with_stats(stats)
            .with_bonuses(self.bonuses.clone())
            .with_elements(self.elements.iter().copied())
            .with_resources(resources)
    }
}

/// A full starting roster plus the seed that drives its rolls.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterSpec {
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: u64,
    pub combatants: Vec<CombatantSpec>,
}

impl EncounterSpec {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            combatants: Vec::new(),
        }
    }

    pub fn with(mut self, combatant: CombatantSpec) -> Self {
        self.combatants.push(combatant);
        self
    }

    /// Roster in declaration order; ids start at 1.
    pub fn build(&self, classes: &dyn ClassOracle) -> BattleState {
        let mut battle = BattleState::new();
        for spec in &self.combatants {
            let id = battle.next_id();
            battle.add(spec.build(id, classes));
        }
        battle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{ClassDefinition, ContentRegistry};
    use game_core::{Archetype, ResourceDefinition};

    fn content() -> ContentRegistry {
        ContentRegistry::from_classes([ClassDefinition::new("knight")
            .with_archetype(Archetype::Defensive)
            .with_stats(CoreStats::uniform(40))
            .with_resource(ResourceDefinition::new("resolve", 3))])
    }

    #[test]
    fn class_supplies_stats_resources_and_profile() {
        let spec = CombatantSpec::new("Aldric", "knight", Side::Party).with_pools(300, 20, 150);
        let unit = spec.build(EntityId(7), &content());

        assert_eq!(unit.stats, CoreStats::uniform(40));
        assert!(unit.resources.contains("resolve"));
        assert_eq!(unit.controller, Controller::Ai(Archetype::Defensive));
        assert_eq!((unit.hp, unit.mp, unit.brave), (300, 20, 150));
    }

    #[test]
    fn explicit_fields_win_over_class() {
        let spec = CombatantSpec::new("You", "knight", Side::Party)
            .with_controller(Controller::Player)
            .with_stats(CoreStats::uniform(12));
        let unit = spec.build(EntityId(1), &content());
        assert!(unit.is_player());
        assert_eq!(unit.stats, CoreStats::uniform(12));
    }

    #[test]
    fn roster_ids_follow_declaration_order() {
        let encounter = EncounterSpec::new(5)
            .with(CombatantSpec::new("a", "knight", Side::Party))
            .with(CombatantSpec::new("b", "slime", Side::Enemy));
        let battle = encounter.build(&content());
        let ids: Vec<u32> = battle.iter().map(|c| c.id.0).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(battle.get(EntityId(2)).unwrap().stats, CoreStats::default());
    }

    /// Class tables that live outside any registry.
    struct Bestiary(Vec<ResourceDefinition>);

    impl ClassOracle for Bestiary {
        fn base_stats(&self, class: &ClassTag) -> Option<CoreStats> {
            (class.as_str() == "wyrm").then(|| CoreStats::uniform(70))
        }

        fn resources(&self, class: &ClassTag) -> &[ResourceDefinition] {
            if class.as_str() == "wyrm" {
                self.0.as_slice()
            } else {
                &[]
            }
        }

        fn archetype_hint(&self, class: &ClassTag) -> Option<Archetype> {
            (class.as_str() == "wyrm").then_some(Archetype::Berserker)
        }
    }

    #[test]
    fn any_class_oracle_can_build_a_roster() {
        let bestiary = Bestiary(vec![ResourceDefinition::new("fury", 4)]);
        let battle = EncounterSpec::new(1)
            .with(CombatantSpec::new("Vyr", "wyrm", Side::Enemy))
            .with(CombatantSpec::new("Pip", "imp", Side::Enemy))
            .build(&bestiary);

        let wyrm = battle.get(EntityId(1)).unwrap();
        assert_eq!(wyrm.stats, CoreStats::uniform(70));
        assert!(wyrm.resources.contains("fury"));
        assert_eq!(wyrm.controller, Controller::Ai(Archetype::Berserker));

        let imp = battle.get(EntityId(2)).unwrap();
        assert_eq!(imp.stats, CoreStats::default());
        assert!(!imp.resources.contains("fury"));
        assert_eq!(imp.controller, Controller::default());
    }
}
