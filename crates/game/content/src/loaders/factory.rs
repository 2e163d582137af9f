//! Content factory for building registries and encounters from a data directory.

use std::path::{Path, PathBuf};

use game_core::CombatConfig;

use crate::defaults;
use crate::encounter::EncounterSpec;
use crate::loaders::{ClassLoader, ConfigLoader, EncounterLoader, LoadResult};
use crate::registry::ContentRegistry;

/// Content factory that loads battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── combat.toml
/// ├── classes.ron
/// └── encounters/
///     └── skirmish.ron
/// ```
///
/// Every file is optional: a missing `combat.toml` yields the default
/// tuning, and `classes.ron` is merged over the built-in classes.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load combat tuning from `combat.toml`.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("combat.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no combat.toml, using defaults");
            return Ok(CombatConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Built-in classes overlaid with `classes.ron`.
    pub fn load_registry(&self) -> LoadResult<ContentRegistry> {
        let mut registry = defaults::registry();
        let path = self.data_dir.join("classes.ron");
        if path.exists() {
            let loaded = ClassLoader::load(&path)?;
            tracing::info!(classes = loaded.len(), path = %path.display(), "class tables loaded");
            registry.merge(loaded);
        }
        Ok(registry)
    }

    /// Load `encounters/{name}.ron` and check its classes against `content`.
    pub fn load_encounter(
        &self,
        name: &str,
        content: &ContentRegistry,
    ) -> LoadResult<EncounterSpec> {
        let path = self
            .data_dir
            .join("encounters")
            .join(format!("{}.ron", name));
        let spec = EncounterLoader::load(&path)?;
        EncounterLoader::check_classes(&spec, content)?;
        Ok(spec)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::ClassTag;
    use game_core::env::SkillOracle;

    fn shipped() -> ContentFactory {
        ContentFactory::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
    }

    #[test]
    fn empty_directory_falls_back_to_builtins() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().unwrap(), CombatConfig::default());
        assert_eq!(factory.load_registry().unwrap().len(), defaults::registry().len());
        assert!(factory.load_encounter("skirmish", &defaults::registry()).is_err());
    }

    #[test]
    fn shipped_data_loads() {
        let factory = shipped();
        let config = factory.load_config().unwrap();
        assert_eq!(config.ready_threshold, 10_000);

        let registry = factory.load_registry().unwrap();
        assert!(registry.skill(&ClassTag::from("knight"), "Shield Bash").is_some());
        assert!(registry.contains(&ClassTag::from("warrior")));

        let spec = factory.load_encounter("skirmish", &registry).unwrap();
        let battle = spec.build(&registry);
        assert_eq!(battle.len(), spec.combatants.len());
    }

    #[test]
    fn factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }
}
