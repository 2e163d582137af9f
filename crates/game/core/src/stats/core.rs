//! Raw combatant attributes as stored on the roster.

/// The six core stats every combatant carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoreStats {
    /// Physical attack.
    pub attack: u32,
    /// Magic attack.
    pub magic: u32,
    /// Physical defense.
    pub defense: u32,
    pub magic_defense: u32,
    pub speed: u32,
    pub luck: u32,
}

impl CoreStats {
    pub const fn new(
        attack: u32,
        magic: u32,
        defense: u32,
        magic_defense: u32,
        speed: u32,
        luck: u32,
    ) -> Self {
        Self {
            attack,
            magic,
            defense,
            magic_defense,
            speed,
            luck,
        }
    }

    /// Every stat set to the same value; handy for balanced test fixtures.
    pub const fn uniform(value: u32) -> Self {
        Self::new(value, value, value, value, value, value)
    }

    pub const fn with_speed(mut self, speed: u32) -> Self {
        self.speed = speed;
        self
    }
}

impl Default for CoreStats {
    fn default() -> Self {
        Self::uniform(10)
    }
}
