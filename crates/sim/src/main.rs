//! Headless battle simulator.
//!
//! Runs one encounter to completion with every combatant under AI control
//! and reports the outcome. Content comes from the built-in tables or from a
//! data directory; see [`config::SimConfig::from_env`] for the knobs.
//!
//! ```bash
//! SIM_SEED=7 RUST_LOG=runtime=debug cargo run -p battle-sim
//! SIM_CONTENT_DIR=crates/game/content/data SIM_ENCOUNTER=skirmish cargo run -p battle-sim
//! ```
mod config;

use std::fs::File;
use std::io::BufWriter;
use std::sync::Arc;

use anyhow::{Context, Result};
use game_content::{ContentFactory, ContentRegistry, EncounterSpec, defaults};
use game_core::{CombatConfig, Controller};
use runtime::{Runtime, RuntimeConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use config::SimConfig;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    let config = SimConfig::from_env();
    tracing::info!(seed = config.seed, max_ticks = config.max_ticks, "starting simulation");

    let (combat, content, encounter) = load_content(&config)?;
    let runtime_config = RuntimeConfig {
        combat,
        max_ticks: config.max_ticks,
        ..RuntimeConfig::default()
    };

    let mut runtime = Runtime::builder()
        .config(runtime_config)
        .content(Arc::new(content))
        .encounter(encounter)
        .seed(config.seed)
        .build()
        .context("failed to build runtime")?;

    let outcome = runtime.run_to_end().context("battle did not finish")?;

    tracing::info!(
        ?outcome,
        rounds = runtime.context().round,
        ticks = runtime.clock(),
        actions = runtime.context().nonce,
        "simulation finished"
    );
    for combatant in runtime.battle().iter() {
        tracing::info!(
            name = %combatant.name,
            side = ?combatant.side,
            hp = combatant.hp,
            max_hp = combatant.max_hp,
            brave = combatant.brave,
            alive = combatant.is_alive(),
            "final state"
        );
    }

    if let Some(path) = &config.events_out {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        runtime
            .events()
            .write_json_lines(BufWriter::new(file))
            .context("failed to write event log")?;
        tracing::info!(
            path = %path.display(),
            events = runtime.events().len(),
            "event log written"
        );
    }

    Ok(())
}

fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Tuning, class tables and roster for this run.
fn load_content(config: &SimConfig) -> Result<(CombatConfig, ContentRegistry, EncounterSpec)> {
    let (combat, content, mut encounter) = match &config.content_dir {
        Some(dir) => {
            let factory = ContentFactory::new(dir);
            let combat = factory.load_config()?;
            let content = factory.load_registry()?;
            let encounter = match &config.encounter {
                Some(name) => factory.load_encounter(name, &content)?,
                None => defaults::encounter(config.seed),
            };
            tracing::info!(dir = %dir.display(), classes = content.len(), "content loaded");
            (combat, content, encounter)
        }
        None => {
            if config.encounter.is_some() {
                tracing::warn!("SIM_ENCOUNTER ignored without SIM_CONTENT_DIR");
            }
            (CombatConfig::default(), defaults::registry(), defaults::encounter(config.seed))
        }
    };

    // No input device here: a player slot runs on the default AI profile.
    if config.with_player
        && let Some(first) = encounter.combatants.first_mut()
    {
        first.controller = Some(Controller::Player);
    }

    Ok((combat, content, encounter))
}
