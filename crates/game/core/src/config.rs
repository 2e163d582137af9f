/// Combat configuration constants and tunable parameters.
///
/// Compile-time capacities live as associated constants; everything a
/// designer may want to rebalance is a field so it can be loaded from a
/// content file. Missing fields fall back to [`CombatConfig::default`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Gauge value at which a combatant may act.
    pub ready_threshold: u32,

    /// Gauge gained per tick for each point of effective speed.
    pub tick_rate: u32,

    /// Fraction of Brave damage dealt that the attacker absorbs.
    pub brave_transfer: f32,

    /// Fraction of defense ignored by a matching pierce tag.
    pub pierce_fraction: f32,

    /// Damage multiplier applied on a critical hit.
    pub crit_multiplier: f32,

    /// Hit chance (percent) when accuracy equals evasion.
    pub hit_base: i32,
    pub hit_min: u32,
    pub hit_max: u32,

    /// Upper bound for critical chance (percent).
    pub crit_max: u32,

    pub evasion_min: f32,
    pub evasion_max: f32,

    /// Per-level ceiling for computed damage (`level * damage_cap_per_level`).
    pub damage_cap_per_level: u32,

    /// Fraction of HP damage returned to the attacker by `DRAIN` skills.
    pub drain_fraction: f32,

    /// Defense bonus granted by the Defend action.
    pub guard_intensity: f32,
    pub guard_duration: u32,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of simultaneous status effects on one combatant.
    pub const MAX_STATUS_EFFECTS: usize = 16;
    /// Maximum number of candidates the decision engine samples from.
    pub const SAMPLE_POOL: usize = 3;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_READY_THRESHOLD: u32 = 10_000;
    pub const DEFAULT_TICK_RATE: u32 = 1;

    pub fn new() -> Self {
        Self {
            ready_threshold: Self::DEFAULT_READY_THRESHOLD,
            tick_rate: Self::DEFAULT_TICK_RATE,
            brave_transfer: 0.5,
            pierce_fraction: 0.5,
            crit_multiplier: 1.5,
            hit_base: 90,
            hit_min: 25,
            hit_max: 95,
            crit_max: 50,
            evasion_min: 5.0,
            evasion_max: 75.0,
            damage_cap_per_level: 100,
            drain_fraction: 0.25,
            guard_intensity: 0.5,
            guard_duration: 1,
        }
    }

    pub fn with_ready_threshold(mut self, ready_threshold: u32) -> Self {
        self.ready_threshold = ready_threshold.max(1);
        self
    }

    pub fn with_brave_transfer(mut self, fraction: f32) -> Self {
        self.brave_transfer = fraction.clamp(0.0, 1.0);
        self
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
