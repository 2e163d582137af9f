//! In-memory class tables implementing the core content oracles.

use std::collections::HashMap;

use game_core::env::{ClassOracle, SkillOracle, Trigger, TriggerEffect, TriggerOracle};
use game_core::{Archetype, ClassTag, CoreStats, ResourceDefinition, SkillDescriptor};

/// Everything the battle core needs to know about one class.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassDefinition {
    pub name: ClassTag,
    /// Profile used when an encounter does not pick one.
    #[cfg_attr(feature = "serde", serde(default))]
    pub archetype: Option<Archetype>,
    /// Stats at level 1; encounters may override them.
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_stats: CoreStats,
    #[cfg_attr(feature = "serde", serde(default))]
    pub resources: Vec<ResourceDefinition>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: Vec<SkillDescriptor>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub triggers: HashMap<Trigger, Vec<TriggerEffect>>,
}

impl ClassDefinition {
    pub fn new(name: impl Into<ClassTag>) -> Self {
        Self {
            name: name.into(),
            archetype: None,
            base_stats: CoreStats::default(),
            resources: Vec::new(),
            skills: Vec::new(),
            triggers: HashMap::new(),
        }
    }

    pub fn with_archetype(mut self, archetype: Archetype) -> Self {
        self.archetype = Some(archetype);
        self
    }

    pub fn with_stats(mut self, stats: CoreStats) -> Self {
        self.base_stats = stats;
        self
    }

    pub fn with_resource(mut self, definition: ResourceDefinition) -> Self {
        self.resources.push(definition);
        self
    }

    pub fn with_skill(mut self, skill: SkillDescriptor) -> Self {
        self.skills.push(skill);
        self
    }

    pub fn on(mut self, trigger: Trigger, effect: TriggerEffect) -> Self {
        self.triggers.entry(trigger).or_default().push(effect);
        self
    }
}

/// Class tables keyed by [`ClassTag`].
#[derive(Clone, Debug, Default)]
pub struct ContentRegistry {
    classes: HashMap<ClassTag, ClassDefinition>,
}

impl ContentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_classes(classes: impl IntoIterator<Item = ClassDefinition>) -> Self {
        let mut registry = Self::new();
        for class in classes {
            registry.insert(class);
        }
        registry
    }

    /// Adds or replaces a class. Returns the previous definition.
    pub fn insert(&mut self, class: ClassDefinition) -> Option<ClassDefinition> {
        let previous = self.classes.insert(class.name.clone(), class);
        if let Some(previous) = &previous {
            tracing::debug!(class = %previous.name, "class definition replaced");
        }
        previous
    }

    /// Folds `other` into `self`; classes in `other` win.
    pub fn merge(&mut self, other: ContentRegistry) {
        for (_, class) in other.classes {
            self.insert(class);
        }
    }

    pub fn class(&self, tag: &ClassTag) -> Option<&ClassDefinition> {
        self.classes.get(tag)
    }

    pub fn contains(&self, tag: &ClassTag) -> bool {
        self.classes.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Class tags in sorted order.
    pub fn class_tags(&self) -> Vec<&ClassTag> {
        let mut tags: Vec<&ClassTag> = self.classes.keys().collect();
        tags.sort();
        tags
    }
}

impl SkillOracle for ContentRegistry {
    fn skills(&self, class: &ClassTag) -> &[SkillDescriptor] {
        self.classes.get(class).map(|c| c.skills.as_slice()).unwrap_or(&[])
    }
}

impl ClassOracle for ContentRegistry {
    fn base_stats(&self, class: &ClassTag) -> Option<CoreStats> {
        self.classes.get(class).map(|c| c.base_stats)
    }

    fn resources(&self, class: &ClassTag) -> &[ResourceDefinition] {
        self.classes.get(class).map(|c| c.resources.as_slice()).unwrap_or(&[])
    }

    fn archetype_hint(&self, class: &ClassTag) -> Option<Archetype> {
        self.classes.get(class).and_then(|c| c.archetype)
    }
}

impl TriggerOracle for ContentRegistry {
    fn effects(&self, class: &ClassTag, trigger: Trigger) -> &[TriggerEffect] {
        self.classes
            .get(class)
            .and_then(|c| c.triggers.get(&trigger))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
