//! Archetype weights over action categories.

use game_core::Archetype;

use super::types::ActionCategory;

/// Role weight a personality needs before it considers healing or support.
pub const ROLE_THRESHOLD: f32 = 0.5;

/// Multipliers applied to a candidate's base score by category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Personality {
    pub attack: f32,
    pub skill: f32,
    pub defend: f32,
    pub heal: f32,
    pub support: f32,
}

impl Personality {
    pub const fn new(attack: f32, skill: f32, defend: f32, heal: f32, support: f32) -> Self {
        Self {
            attack,
            skill,
            defend,
            heal,
            support,
        }
    }

    pub const fn neutral() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0, 1.0)
    }

    pub const fn of(archetype: Archetype) -> Self {
        match archetype {
            Archetype::Aggressive => Self::new(1.4, 1.2, 0.5, 0.3, 0.4),
            Archetype::Defensive => Self::new(0.8, 0.9, 1.5, 1.0, 1.2),
            Archetype::Tactical => Self::new(1.0, 1.3, 1.0, 0.9, 1.1),
            Archetype::Berserker => Self::new(1.8, 1.0, 0.1, 0.1, 0.2),
            Archetype::Support => Self::new(0.6, 0.8, 1.0, 1.8, 1.5),
            Archetype::Adaptive => Self::neutral(),
        }
    }

    pub fn weight(&self, category: ActionCategory) -> f32 {
        match category {
            ActionCategory::Attack => self.attack,
            ActionCategory::Skill => self.skill,
            ActionCategory::Defend => self.defend,
            ActionCategory::Heal => self.heal,
            ActionCategory::Support => self.support,
        }
    }

    /// Whether this personality considers `category` at all.
    ///
    /// Offensive and defensive options are always on the table; heal and
    /// support require a role weight above [`ROLE_THRESHOLD`].
    pub fn considers(&self, category: ActionCategory) -> bool {
        match category {
            ActionCategory::Heal | ActionCategory::Support => {
                self.weight(category) > ROLE_THRESHOLD
            }
            _ => true,
        }
    }
}
