use super::tag::{MergePolicy, Polarity, StatusTag};
use crate::state::EntityId;

/// One active status on a combatant.
///
/// For over-time tags `remaining_total` is the payload still to be dealt or
/// healed; each tick releases `ceil(remaining_total / duration)` so the total
/// is delivered exactly by expiry.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub tag: StatusTag,
    /// Owner turns remaining.
    pub duration: u32,
    pub intensity: f32,
    pub stacks: u8,
    pub remaining_total: u32,
    pub source: Option<EntityId>,
}

impl StatusEffect {
    /// Creates an effect with its duration clamped to `[1, cap]`.
    ///
    /// Over-time tags treat `intensity` as the per-turn amount.
    pub fn new(tag: StatusTag, duration: u32, intensity: f32) -> Self {
        let duration = duration.clamp(1, tag.max_duration());
        let intensity = intensity.max(0.0);
        let remaining_total = if tag.is_over_time() {
            ((intensity * duration as f32).round() as u32).max(1)
        } else {
            0
        };
        Self {
            tag,
            duration,
            intensity,
            stacks: 1,
            remaining_total,
            source: None,
        }
    }

    pub fn with_source(mut self, source: EntityId) -> Self {
        self.source = Some(source);
        self
    }

    /// Payload released by the next tick.
    pub fn tick_amount(&self) -> u32 {
        if self.duration == 0 {
            return self.remaining_total;
        }
        self.remaining_total.div_ceil(self.duration)
    }

    /// Multiplier this effect contributes for a stat it touches.
    pub fn multiplier(&self, polarity: Polarity) -> f32 {
        let magnitude = self.intensity * f32::from(self.stacks);
        match polarity {
            Polarity::Up => 1.0 + magnitude,
            Polarity::Down => (1.0 - magnitude).max(0.1),
        }
    }

    /// Folds `incoming` into `self` according to the tag's merge policy.
    pub(crate) fn merge(&mut self, incoming: StatusEffect) -> MergeResult {
        let spec = self.tag.spec();
        match spec.merge {
            MergePolicy::AccumulateAndRefresh => {
                self.remaining_total =
                    self.remaining_total.saturating_add(incoming.remaining_total);
                self.duration = self.duration.max(incoming.duration).min(spec.max_duration);
                self.intensity = self.remaining_total as f32 / self.duration as f32;
                self.source = incoming.source.or(self.source);
                MergeResult::Accumulated
            }
            MergePolicy::StackUpToMax => {
                let before = self.stacks;
                self.stacks = self.stacks.saturating_add(1).min(spec.max_stacks);
                self.duration = self.duration.max(incoming.duration).min(spec.max_duration);
                self.intensity = self.intensity.max(incoming.intensity);
                if self.stacks > before {
                    MergeResult::Stacked
                } else {
                    MergeResult::Refreshed
                }
            }
            MergePolicy::ReplaceIfStronger => {
                if incoming.intensity < self.intensity {
                    return MergeResult::Weaker;
                }
                self.intensity = incoming.intensity;
                self.duration = self.duration.max(incoming.duration).min(spec.max_duration);
                self.remaining_total = incoming.remaining_total;
                self.source = incoming.source.or(self.source);
                MergeResult::Refreshed
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MergeResult {
    Accumulated,
    Stacked,
    Refreshed,
    Weaker,
}
