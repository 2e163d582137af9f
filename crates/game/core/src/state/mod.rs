//! Battle state: combatants and the encounter they belong to.
//!
//! The runtime owns one [`BattleState`] per encounter and mutates it only
//! through the scheduler (gauges), the resolution step (the acting
//! combatant and its targets), and status processing.
pub mod types;

pub use types::{
    Archetype, ClassTag, Combatant, Controller, DecayRule, EntityId, ResourceBag,
    ResourceDefinition, ResourceSlot, Side,
};

/// Result of a finished encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleOutcome {
    /// Every enemy is dead.
    PartyVictory,
    /// Every party member is dead.
    EnemyVictory,
}

impl BattleOutcome {
    pub const fn defeated(self) -> Side {
        match self {
            Self::PartyVictory => Side::Enemy,
            Self::EnemyVictory => Side::Party,
        }
    }
}

/// All combatants of one encounter in stable insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    combatants: Vec<Combatant>,
}

impl BattleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_combatants(combatants: impl IntoIterator<Item = Combatant>) -> Self {
        Self {
            combatants: combatants.into_iter().collect(),
        }
    }

    pub fn add(&mut self, combatant: Combatant) {
        self.combatants.push(combatant);
    }

    /// Next unused id, for callers assembling a roster incrementally.
    pub fn next_id(&self) -> EntityId {
        EntityId(
            self.combatants
                .iter()
                .map(|c| c.id.0 + 1)
                .max()
                .unwrap_or(1),
        )
    }

    pub fn get(&self, id: EntityId) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Combatant> {
        self.combatants.iter_mut().find(|c| c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Combatant> {
        self.combatants.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }

    /// Living members of `side`, in insertion order.
    pub fn living(&self, side: Side) -> impl Iterator<Item = &Combatant> {
        self.combatants
            .iter()
            .filter(move |c| c.side == side && c.is_alive())
    }

    /// Every combatant on `id`'s side, living or dead, including `id`.
    pub fn allies_of(&self, id: EntityId) -> Vec<&Combatant> {
        match self.get(id) {
            Some(actor) => self
                .combatants
                .iter()
                .filter(|c| c.side == actor.side)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Living combatants opposing `id`.
    pub fn enemies_of(&self, id: EntityId) -> Vec<&Combatant> {
        match self.get(id) {
            Some(actor) => self.living(actor.side.opposite()).collect(),
            None => Vec::new(),
        }
    }

    pub fn is_side_defeated(&self, side: Side) -> bool {
        self.living(side).next().is_none()
    }

    /// `Some` once one side has no living members.
    ///
    /// If both sides are wiped in the same action the party is
    /// considered defeated.
    pub fn outcome(&self) -> Option<BattleOutcome> {
        if self.is_side_defeated(Side::Party) {
            Some(BattleOutcome::EnemyVictory)
        } else if self.is_side_defeated(Side::Enemy) {
            Some(BattleOutcome::PartyVictory)
        } else {
            None
        }
    }

    /// Clears every `Broken` flag; called when a new round starts.
    pub fn clear_broken(&mut self) {
        for combatant in &mut self.combatants {
            combatant.broken = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> BattleState {
        BattleState::from_combatants([
            Combatant::new(EntityId(1), "hero", Side::Party),
            Combatant::new(EntityId(2), "mage", Side::Party),
            Combatant::new(EntityId(3), "slime", Side::Enemy),
        ])
    }

    #[test]
    fn queries_respect_sides_and_life() {
        let mut battle = roster();
        battle.get_mut(EntityId(2)).unwrap().mark_dead();

        assert_eq!(battle.living(Side::Party).count(), 1);
        assert_eq!(battle.allies_of(EntityId(1)).len(), 2);
        assert_eq!(battle.enemies_of(EntityId(3)).len(), 1);
        assert_eq!(battle.next_id(), EntityId(4));
    }

    #[test]
    fn outcome_marks_side_with_no_living_members() {
        let mut battle = roster();
        assert_eq!(battle.outcome(), None);

        battle.get_mut(EntityId(3)).unwrap().take_hp_damage(1_000);
        let outcome = battle.outcome();
        assert_eq!(outcome, Some(BattleOutcome::PartyVictory));
        assert_eq!(outcome.map(BattleOutcome::defeated), Some(Side::Enemy));
    }
}
