pub mod combatant;
pub mod common;
pub mod resources;

pub use combatant::Combatant;
pub use common::{Archetype, ClassTag, Controller, EntityId, Side};
pub use resources::{DecayRule, ResourceBag, ResourceDefinition, ResourceSlot};
