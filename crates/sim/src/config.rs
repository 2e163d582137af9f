//! Simulation settings read from the environment.
use std::env;
use std::path::PathBuf;

/// Headless simulation configuration.
#[derive(Clone, Debug)]
pub struct SimConfig {
    pub seed: u64,
    /// Directory holding `combat.toml`, `classes.ron` and `encounters/`.
    /// Built-in content is used when unset.
    pub content_dir: Option<PathBuf>,
    /// Encounter file name without extension, looked up in `content_dir`.
    pub encounter: Option<String>,
    pub max_ticks: u64,
    /// Event log destination, one JSON object per line.
    pub events_out: Option<PathBuf>,
    /// First party member waits for player input instead of the AI.
    pub with_player: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            content_dir: None,
            encounter: None,
            max_ticks: 200_000,
            events_out: None,
            with_player: false,
        }
    }
}

impl SimConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SIM_SEED` - battle seed (default: 1)
    /// - `SIM_CONTENT_DIR` - data directory (default: built-in content)
    /// - `SIM_ENCOUNTER` - encounter name inside the data directory
    /// - `SIM_MAX_TICKS` - tick limit before giving up (default: 200000)
    /// - `SIM_EVENTS_OUT` - write the event log as JSON lines to this path
    /// - `SIM_WITH_PLAYER` - put the first party member under player control
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(seed) = read_env::<u64>("SIM_SEED") {
            config.seed = seed;
        }
        config.content_dir = env::var_os("SIM_CONTENT_DIR").map(PathBuf::from);
        config.encounter = env::var("SIM_ENCOUNTER").ok().filter(|s| !s.is_empty());
        if let Some(ticks) = read_env::<u64>("SIM_MAX_TICKS") {
            config.max_ticks = ticks.max(1);
        }
        config.events_out = env::var_os("SIM_EVENTS_OUT").map(PathBuf::from);
        if let Some(with_player) = read_env::<bool>("SIM_WITH_PLAYER") {
            config.with_player = with_player;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
