//! Data-driven battle content and loaders.
//!
//! This crate houses the class tables the battle core consumes and provides
//! loaders for RON/TOML data files:
//! - Class tables: skills, class counters, trigger tables (RON)
//! - Encounter rosters (RON)
//! - Combat tuning (TOML)
//!
//! Content reaches the core only through the oracle traits implemented by
//! [`ContentRegistry`]; it never appears in battle state.

pub mod defaults;
pub mod encounter;
pub mod registry;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use encounter::{CombatantSpec, EncounterSpec};
pub use registry::{ClassDefinition, ContentRegistry};

#[cfg(feature = "loaders")]
pub use loaders::{ClassLoader, ConfigLoader, ContentFactory, EncounterLoader, LoadResult};
