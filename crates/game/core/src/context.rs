/// Per-encounter values threaded explicitly through resolution.
///
/// Replaces any process-wide "combat active" state: callers decide whether
/// cosmetic side-effects are wanted and the core only echoes the flag into
/// its reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleContext {
    pub seed: u64,
    /// Incremented once per successfully resolved action.
    pub nonce: u64,
    /// 1-based round counter; a round ends once every living combatant acted.
    pub round: u32,
    /// Whether animation/audio cues are requested for this battle.
    pub effects_enabled: bool,
}

impl BattleContext {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            nonce: 0,
            round: 1,
            effects_enabled: true,
        }
    }

    pub fn with_effects(mut self, enabled: bool) -> Self {
        self.effects_enabled = enabled;
        self
    }

    /// Seed for roll `slot` of `actor`'s current action.
    pub fn roll_seed(&self, actor: crate::state::EntityId, slot: u32) -> u64 {
        crate::env::compute_seed(self.seed, self.nonce, actor.0, slot)
    }
}

impl Default for BattleContext {
    fn default() -> Self {
        Self::new(0)
    }
}
