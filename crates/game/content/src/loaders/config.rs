//! Combat tuning loader.

use std::path::Path;

use game_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`CombatConfig`] from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load tuning from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse combat config TOML: {}", e))?;
        validate(&config)?;
        Ok(config)
    }
}

fn validate(config: &CombatConfig) -> LoadResult<()> {
    anyhow::ensure!(config.ready_threshold > 0, "ready_threshold must be positive");
    anyhow::ensure!(config.tick_rate > 0, "tick_rate must be positive");
    anyhow::ensure!(
        (0.0..=1.0).contains(&config.brave_transfer),
        "brave_transfer must be within [0, 1], got {}",
        config.brave_transfer
    );
    anyhow::ensure!(
        config.hit_min <= config.hit_max,
        "hit_min ({}) exceeds hit_max ({})",
        config.hit_min,
        config.hit_max
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config =
            ConfigLoader::parse("ready_threshold = 5000\ncrit_multiplier = 2.0\n").unwrap();
        assert_eq!(config.ready_threshold, 5_000);
        assert_eq!(config.crit_multiplier, 2.0);
        assert_eq!(config.brave_transfer, CombatConfig::default().brave_transfer);
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(ConfigLoader::parse("tick_rate = 0").is_err());
        assert!(ConfigLoader::parse("brave_transfer = 1.5").is_err());
        assert!(ConfigLoader::parse("hit_min = 99\nhit_max = 10").is_err());
    }

    #[test]
    fn reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("combat.toml");
        std::fs::write(&path, "damage_cap_per_level = 50\n").unwrap();
        assert_eq!(ConfigLoader::load(&path).unwrap().damage_cap_per_level, 50);
        assert!(ConfigLoader::load(&dir.path().join("missing.toml")).is_err());
    }
}
