//! Class-specific named counters.
//!
//! Every class declares which counters it carries (combo points, elemental
//! charges, ...) through [`ResourceDefinition`]s. The bag only ever holds
//! names its owner's class defines, so consumers query it instead of
//! probing for optional fields.

use crate::error::{CombatError, ErrorContext};

/// How a counter changes at the start of its owner's turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DecayRule {
    #[default]
    None,
    /// Lose `n` points per turn (saturating at 0).
    PerTurn(u32),
    /// Drop to 0 every turn.
    ResetEachTurn,
}

/// Declaration of one class counter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceDefinition {
    pub name: String,
    pub max: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub decay: DecayRule,
}

impl ResourceDefinition {
    pub fn new(name: impl Into<String>, max: u32) -> Self {
        Self {
            name: name.into(),
            max,
            decay: DecayRule::None,
        }
    }

    pub fn with_decay(mut self, decay: DecayRule) -> Self {
        self.decay = decay;
        self
    }
}

/// A single counter entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceSlot {
    pub name: String,
    pub value: u32,
    pub max: u32,
    pub decay: DecayRule,
}

/// Uniform name → (value, max) store.
///
/// Invariant: every slot's `value <= max`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceBag {
    slots: Vec<ResourceSlot>,
}

impl ResourceBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an empty bag holding every counter the class defines.
    pub fn from_definitions(definitions: &[ResourceDefinition]) -> Self {
        let slots = definitions
            .iter()
            .map(|def| ResourceSlot {
                name: def.name.clone(),
                value: 0,
                max: def.max,
                decay: def.decay,
            })
            .collect();
        Self { slots }
    }

    fn slot(&self, name: &str) -> Option<&ResourceSlot> {
        self.slots.iter().find(|s| s.name == name)
    }

    fn slot_mut(&mut self, name: &str) -> Option<&mut ResourceSlot> {
        self.slots.iter_mut().find(|s| s.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slot(name).is_some()
    }

    /// Current value, or 0 for a name the class does not define.
    pub fn get(&self, name: &str) -> u32 {
        self.slot(name).map_or(0, |s| s.value)
    }

    pub fn max(&self, name: &str) -> Option<u32> {
        self.slot(name).map(|s| s.max)
    }

    /// Adds `amount`, saturating at the slot's max. Unknown names are ignored.
    ///
    /// Returns the amount actually gained.
    pub fn gain(&mut self, name: &str, amount: u32) -> u32 {
        match self.slot_mut(name) {
            Some(slot) => {
                let before = slot.value;
                slot.value = slot.value.saturating_add(amount).min(slot.max);
                slot.value - before
            }
            None => 0,
        }
    }

    /// Whether `spend(name, amount)` would succeed.
    pub fn can_spend(&self, name: &str, amount: u32) -> bool {
        amount == 0 || self.slot(name).is_some_and(|s| s.value >= amount)
    }

    /// Removes `amount`, failing without mutation if the counter is short.
    pub fn spend(&mut self, name: &str, amount: u32) -> Result<(), CombatError> {
        if amount == 0 {
            return Ok(());
        }
        match self.slot_mut(name) {
            Some(slot) if slot.value >= amount => {
                slot.value -= amount;
                Ok(())
            }
            _ => Err(CombatError::insufficient_resource(
                ErrorContext::default().with_message("class resource below cost"),
            )),
        }
    }

    /// Sets a counter, clamped to its max. Unknown names are ignored.
    pub fn set(&mut self, name: &str, value: u32) {
        if let Some(slot) = self.slot_mut(name) {
            slot.value = value.min(slot.max);
        }
    }

    /// True when the counter is at or above `fraction` of its max.
    pub fn is_near_cap(&self, name: &str, fraction: f32) -> bool {
        self.slot(name).is_some_and(|s| {
            s.max > 0 && s.value as f32 >= s.max as f32 * fraction.clamp(0.0, 1.0)
        })
    }

    /// Applies each slot's decay rule once.
    pub fn decay_turn(&mut self) {
        for slot in &mut self.slots {
            match slot.decay {
                DecayRule::None => {}
                DecayRule::PerTurn(n) => slot.value = slot.value.saturating_sub(n),
                DecayRule::ResetEachTurn => slot.value = 0,
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceSlot> {
        self.slots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bag() -> ResourceBag {
        ResourceBag::from_definitions(&[
            ResourceDefinition::new("combo", 5),
            ResourceDefinition::new("focus", 3).with_decay(DecayRule::PerTurn(1)),
            ResourceDefinition::new("rage", 10).with_decay(DecayRule::ResetEachTurn),
        ])
    }

    #[test]
    fn gain_saturates_at_class_max() {
        let mut bag = bag();
        assert_eq!(bag.gain("combo", 3), 3);
        assert_eq!(bag.gain("combo", 9), 2);
        assert_eq!(bag.get("combo"), 5);
        assert_eq!(bag.gain("unknown", 4), 0);
        assert!(!bag.contains("unknown"));
    }

    #[test]
    fn spend_fails_without_mutation() {
        let mut bag = bag();
        bag.set("combo", 2);
        assert!(bag.spend("combo", 3).is_err());
        assert_eq!(bag.get("combo"), 2);
        assert!(bag.spend("combo", 2).is_ok());
        assert_eq!(bag.get("combo"), 0);
        assert!(bag.spend("missing", 1).is_err());
        assert!(bag.spend("missing", 0).is_ok());
    }

    #[test]
    fn decay_follows_each_rule() {
        let mut bag = bag();
        bag.set("combo", 4);
        bag.set("focus", 3);
        bag.set("rage", 7);
        bag.decay_turn();
        assert_eq!(bag.get("combo"), 4);
        assert_eq!(bag.get("focus"), 2);
        assert_eq!(bag.get("rage"), 0);
    }

    #[test]
    fn near_cap_uses_fraction_of_max() {
        let mut bag = bag();
        bag.set("combo", 4);
        assert!(bag.is_near_cap("combo", 0.8));
        assert!(!bag.is_near_cap("combo", 0.9));
        assert!(!bag.is_near_cap("missing", 0.0));
    }
}
