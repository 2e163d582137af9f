//! Data-driven class reactions.
//!
//! Instead of branching on class names, resolution asks the
//! [`TriggerOracle`] what a class does on a given event and applies the
//! returned effects in order.

use crate::state::ClassTag;
use crate::status::StatusTag;

/// Resolution events a class can react to. Always reported for the actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Trigger {
    OnHit,
    OnCritical,
    OnBreak,
    OnKill,
    OnHpAttack,
    OnHeal,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TriggerEffect {
    /// Add to one of the actor's class counters.
    GainResource { name: String, amount: u32 },
    /// Apply a status to the actor.
    ApplySelfStatus {
        tag: StatusTag,
        duration: u32,
        intensity: f32,
    },
    /// Add Brave to the actor.
    GainBrave(u32),
}

/// Lookup table keyed by (class, trigger).
pub trait TriggerOracle: Send + Sync {
    fn effects(&self, class: &ClassTag, trigger: Trigger) -> &[TriggerEffect];
}

/// Table with no entries.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTriggers;

impl TriggerOracle for NoTriggers {
    fn effects(&self, _class: &ClassTag, _trigger: Trigger) -> &[TriggerEffect] {
        &[]
    }
}
