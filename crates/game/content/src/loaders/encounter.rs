//! Encounter roster loader.

use std::path::Path;

use game_core::Side;

use crate::encounter::EncounterSpec;
use crate::loaders::{LoadResult, read_file};
use crate::registry::ContentRegistry;

/// Loader for [`EncounterSpec`] from RON files.
pub struct EncounterLoader;

impl EncounterLoader {
    pub fn load(path: &Path) -> LoadResult<EncounterSpec> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| {
            anyhow::anyhow!("Failed to load encounter from {}: {}", path.display(), e)
        })
    }

    pub fn parse(content: &str) -> LoadResult<EncounterSpec> {
        let spec: EncounterSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse encounter RON: {}", e))?;
        for side in [Side::Party, Side::Enemy] {
            anyhow::ensure!(
                spec.combatants.iter().any(|c| c.side == side),
                "encounter has no {:?} combatants",
                side
            );
        }
        Ok(spec)
    }

    /// Checks that every roster class exists in `content`.
    pub fn check_classes(spec: &EncounterSpec, content: &ContentRegistry) -> LoadResult<()> {
        for combatant in &spec.combatants {
            anyhow::ensure!(
                content.contains(&combatant.class),
                "combatant '{}' uses unknown class '{}'",
                combatant.name,
                combatant.class
            );
        }
        Ok(())
    }
}
