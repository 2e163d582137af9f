//! Topic-based event bus for runtime events.
//!
//! Events are published to specific topics, and consumers subscribe only to
//! the topics they need. The runtime also keeps an ordered [`EventLog`] of
//! everything it published for post-battle inspection.

mod bus;
mod log;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use log::EventLog;
pub use types::{CombatEvent, StatusEvent, TurnEvent};
