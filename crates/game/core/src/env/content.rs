use crate::action::SkillDescriptor;
use crate::state::{Archetype, ClassTag, ResourceDefinition};
use crate::stats::CoreStats;

/// Skill lists keyed by class.
pub trait SkillOracle: Send + Sync {
    /// Every skill the class can use. Unknown classes have none.
    fn skills(&self, class: &ClassTag) -> &[SkillDescriptor];

    fn skill(&self, class: &ClassTag, name: &str) -> Option<&SkillDescriptor> {
        self.skills(class).iter().find(|s| s.name == name)
    }
}

/// Class-level definitions other than skills.
pub trait ClassOracle: Send + Sync {
    /// Stat line for a fresh combatant of this class, `None` when the class
    /// is unknown.
    fn base_stats(&self, class: &ClassTag) -> Option<CoreStats>;

    /// Counters the class carries in its [`ResourceBag`](crate::state::ResourceBag).
    fn resources(&self, class: &ClassTag) -> &[ResourceDefinition];

    /// Suggested AI profile for enemies of this class.
    fn archetype_hint(&self, _class: &ClassTag) -> Option<Archetype> {
        None
    }
}
