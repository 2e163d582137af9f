use arrayvec::ArrayVec;

use super::effect::{MergeResult, StatusEffect};
use super::tag::{StatusCategory, StatusTag};
use crate::config::CombatConfig;
use crate::stats::StatModifiers;

/// Result of [`StatusEffects::apply`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ApplyOutcome {
    /// New tag inserted.
    Added,
    /// Stack count increased.
    Stacked,
    /// Over-time payload summed into the existing instance.
    Accumulated,
    /// Duration/intensity refreshed without a new stack.
    Refreshed,
    /// Rejected: existing instance is stronger.
    Weaker,
    /// Rejected: no room for another tag.
    Full,
    /// Rejected: target is dead.
    Ignored,
}

impl ApplyOutcome {
    pub const fn is_applied(self) -> bool {
        matches!(
            self,
            Self::Added | Self::Stacked | Self::Accumulated | Self::Refreshed
        )
    }
}

/// Which effects a cleanse removes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CleanseFilter {
    /// Debuffs, damage-over-time and control effects.
    Harmful,
    Category(StatusCategory),
    Tag(StatusTag),
    All,
}

impl CleanseFilter {
    pub fn matches(self, tag: StatusTag) -> bool {
        match self {
            Self::Harmful => tag.category().is_harmful(),
            Self::Category(category) => tag.category() == category,
            Self::Tag(t) => t == tag,
            Self::All => true,
        }
    }
}

/// Bounded, insertion-ordered set of active effects. At most one instance
/// per tag.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { CombatConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Merges `effect` into the collection.
    ///
    /// Same-tag instances merge per the tag's policy; a new tag is rejected
    /// with [`ApplyOutcome::Full`] once capacity is reached.
    pub fn apply(&mut self, effect: StatusEffect) -> ApplyOutcome {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.tag == effect.tag) {
            return match existing.merge(effect) {
                MergeResult::Accumulated => ApplyOutcome::Accumulated,
                MergeResult::Stacked => ApplyOutcome::Stacked,
                MergeResult::Refreshed => ApplyOutcome::Refreshed,
                MergeResult::Weaker => ApplyOutcome::Weaker,
            };
        }

        match self.effects.try_push(effect) {
            Ok(()) => ApplyOutcome::Added,
            Err(_) => ApplyOutcome::Full,
        }
    }

    pub fn get(&self, tag: StatusTag) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.tag == tag)
    }

    pub fn has(&self, tag: StatusTag) -> bool {
        self.get(tag).is_some()
    }

    pub fn remove(&mut self, tag: StatusTag) -> Option<StatusEffect> {
        let index = self.effects.iter().position(|e| e.tag == tag)?;
        Some(self.effects.remove(index))
    }

    /// Removes every effect matching `filter`, returning the removed tags.
    pub fn cleanse(&mut self, filter: CleanseFilter) -> Vec<StatusTag> {
        let removed: Vec<StatusTag> = self
            .effects
            .iter()
            .filter(|e| filter.matches(e.tag))
            .map(|e| e.tag)
            .collect();
        self.effects.retain(|e| !filter.matches(e.tag));
        removed
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Multiplicative composition of every active stat effect.
    pub fn stat_modifiers(&self) -> StatModifiers {
        let mut modifiers = StatModifiers::NEUTRAL;
        for effect in &self.effects {
            for (stat, polarity) in effect.tag.spec().modifiers {
                modifiers.scale(*stat, effect.multiplier(*polarity));
            }
        }
        modifiers
    }

    /// False while any action-blocking control effect is active.
    pub fn can_act(&self) -> bool {
        !self.effects.iter().any(|e| e.tag.spec().blocks_action)
    }

    /// False while unable to act or silenced.
    pub fn can_use_skills(&self) -> bool {
        self.can_act() && !self.effects.iter().any(|e| e.tag.spec().blocks_skills)
    }

    pub(crate) fn at(&self, index: usize) -> Option<StatusEffect> {
        self.effects.get(index).copied()
    }

    pub(crate) fn at_mut(&mut self, index: usize) -> Option<&mut StatusEffect> {
        self.effects.get_mut(index)
    }

    pub(crate) fn remove_at(&mut self, index: usize) -> StatusEffect {
        self.effects.remove(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::StatKind;
    use strum::IntoEnumIterator;

    #[test]
    fn poison_reapplication_sums_totals_within_cap() {
        let mut set = StatusEffects::empty();
        assert_eq!(
            set.apply(StatusEffect::new(StatusTag::Poison, 5, 10.0)),
            ApplyOutcome::Added
        );
        assert_eq!(
            set.apply(StatusEffect::new(StatusTag::Poison, 5, 10.0)),
            ApplyOutcome::Accumulated
        );

        assert_eq!(set.len(), 1);
        let poison = set.get(StatusTag::Poison).copied().unwrap();
        assert_eq!(poison.remaining_total, 100);
        assert!(poison.duration <= StatusTag::Poison.max_duration());
        assert_eq!(poison.duration, 5);
        assert_eq!(poison.tick_amount(), 20);
    }

    #[test]
    fn repeated_dot_never_exceeds_duration_cap() {
        let mut set = StatusEffects::empty();
        for duration in [3, 6, 8, 8, 20] {
            set.apply(StatusEffect::new(StatusTag::Bleed, duration, 4.0));
            let bleed = set.get(StatusTag::Bleed).unwrap();
            assert!(bleed.duration <= StatusTag::Bleed.max_duration());
        }
    }

    #[test]
    fn stackable_buffs_cap_at_three() {
        let mut set = StatusEffects::empty();
        set.apply(StatusEffect::new(StatusTag::AttackUp, 2, 0.1));
        assert_eq!(
            set.apply(StatusEffect::new(StatusTag::AttackUp, 4, 0.1)),
            ApplyOutcome::Stacked
        );
        set.apply(StatusEffect::new(StatusTag::AttackUp, 1, 0.1));
        assert_eq!(
            set.apply(StatusEffect::new(StatusTag::AttackUp, 1, 0.1)),
            ApplyOutcome::Refreshed
        );

        let buff = set.get(StatusTag::AttackUp).unwrap();
        assert_eq!(buff.stacks, 3);
        assert_eq!(buff.duration, 4);
    }

    #[test]
    fn weaker_replacement_is_rejected() {
        let mut set = StatusEffects::empty();
        set.apply(StatusEffect::new(StatusTag::Regen, 3, 20.0));
        assert_eq!(
            set.apply(StatusEffect::new(StatusTag::Regen, 8, 5.0)),
            ApplyOutcome::Weaker
        );
        assert_eq!(set.get(StatusTag::Regen).unwrap().duration, 3);
    }

    #[test]
    fn modifiers_compose_multiplicatively() {
        let mut set = StatusEffects::empty();
        set.apply(StatusEffect::new(StatusTag::AttackUp, 3, 0.5));
        set.apply(StatusEffect::new(StatusTag::Berserk, 3, 0.5));
        set.apply(StatusEffect::new(StatusTag::DefenseDown, 3, 0.2));

        let modifiers = set.stat_modifiers();
        assert!((modifiers.get(StatKind::Attack) - 2.25).abs() < 1e-5);
        assert!((modifiers.get(StatKind::Defense) - 0.4).abs() < 1e-5);
        assert_eq!(modifiers.get(StatKind::Speed), 1.0);
    }

    #[test]
    fn can_act_false_exactly_for_blocking_control() {
        for tag in StatusTag::iter() {
            let mut set = StatusEffects::empty();
            set.apply(StatusEffect::new(StatusTag::Poison, 3, 1.0));
            set.apply(StatusEffect::new(StatusTag::Haste, 3, 0.2));
            set.apply(StatusEffect::new(tag, 2, 1.0));
            assert_eq!(set.can_act(), !tag.spec().blocks_action, "{tag}");
        }
    }

    #[test]
    fn silence_blocks_skills_only() {
        let mut set = StatusEffects::empty();
        set.apply(StatusEffect::new(StatusTag::Silence, 2, 1.0));
        assert!(set.can_act());
        assert!(!set.can_use_skills());
    }

    #[test]
    fn full_collection_rejects_new_tags() {
        let mut set = StatusEffects::empty();
        for tag in StatusTag::iter().take(CombatConfig::MAX_STATUS_EFFECTS) {
            assert_eq!(set.apply(StatusEffect::new(tag, 2, 1.0)), ApplyOutcome::Added);
        }
        let extra = StatusTag::iter()
            .nth(CombatConfig::MAX_STATUS_EFFECTS)
            .unwrap();
        assert_eq!(set.apply(StatusEffect::new(extra, 2, 1.0)), ApplyOutcome::Full);
    }

    #[test]
    fn cleanse_removes_only_harmful() {
        let mut set = StatusEffects::empty();
        set.apply(StatusEffect::new(StatusTag::Burn, 3, 4.0));
        set.apply(StatusEffect::new(StatusTag::Stun, 1, 1.0));
        set.apply(StatusEffect::new(StatusTag::Slow, 3, 0.2));
        set.apply(StatusEffect::new(StatusTag::Haste, 3, 0.2));

        let removed = set.cleanse(CleanseFilter::Harmful);
        assert_eq!(removed, vec![StatusTag::Burn, StatusTag::Stun, StatusTag::Slow]);
        assert!(set.has(StatusTag::Haste));
        assert_eq!(set.len(), 1);
    }
}
