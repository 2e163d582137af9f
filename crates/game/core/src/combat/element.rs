//! Elemental affinity table.
//!
//! The six natural elements form a cycle where each is super-effective
//! against the next and effective against the one after:
//!
//! ```text
//! Fire → Ice → Wind → Earth → Thunder → Water → Fire
//! ```
//!
//! Light and Dark are super-effective against each other. An element is
//! immune to itself; an attacker is resisted by the element that is
//! super-effective against it.

/// Element tags for skills (attacking) and combatants (defending).
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::EnumIter,
    strum::Display,
    strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Element {
    #[default]
    Neutral,
    Fire,
    Ice,
    Thunder,
    Water,
    Wind,
    Earth,
    Light,
    Dark,
}

/// Five affinity tiers, ordered from least to most attacker-favorable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Affinity {
    Immune,
    Resisted,
    Neutral,
    Effective,
    SuperEffective,
}

impl Affinity {
    pub const fn multiplier(self) -> f32 {
        match self {
            Self::SuperEffective => 1.8,
            Self::Effective => 1.4,
            Self::Neutral => 1.0,
            Self::Resisted => 0.8,
            Self::Immune => 0.6,
        }
    }
}

const CYCLE: [Element; 6] = [
    Element::Fire,
    Element::Ice,
    Element::Wind,
    Element::Earth,
    Element::Thunder,
    Element::Water,
];

fn cycle_index(element: Element) -> Option<usize> {
    CYCLE.iter().position(|e| *e == element)
}

impl Element {
    /// Affinity of an attack of this element against one defending tag.
    pub fn against(self, defender: Element) -> Affinity {
        if self == Element::Neutral || defender == Element::Neutral {
            return Affinity::Neutral;
        }
        if self == defender {
            return Affinity::Immune;
        }
        match (self, defender) {
            (Element::Light, Element::Dark) | (Element::Dark, Element::Light) => {
                return Affinity::SuperEffective;
            }
            (Element::Light | Element::Dark, _) | (_, Element::Light | Element::Dark) => {
                return Affinity::Neutral;
            }
            _ => {}
        }

        let (Some(a), Some(d)) = (cycle_index(self), cycle_index(defender)) else {
            return Affinity::Neutral;
        };
        let len = CYCLE.len();
        if (a + 1) % len == d {
            Affinity::SuperEffective
        } else if (a + 2) % len == d {
            Affinity::Effective
        } else if (d + 1) % len == a {
            Affinity::Resisted
        } else {
            Affinity::Neutral
        }
    }
}

/// Most attacker-favorable tier over every defending tag.
///
/// A defender with no tags is neutral.
pub fn best_affinity(attack: Element, defender: &[Element]) -> Affinity {
    defender
        .iter()
        .map(|tag| attack.against(*tag))
        .max()
        .unwrap_or(Affinity::Neutral)
}

pub fn element_multiplier(attack: Element, defender: &[Element]) -> f32 {
    best_affinity(attack, defender).multiplier()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_relationships() {
        assert_eq!(Element::Fire.against(Element::Ice), Affinity::SuperEffective);
        assert_eq!(Element::Fire.against(Element::Wind), Affinity::Effective);
        assert_eq!(Element::Ice.against(Element::Fire), Affinity::Resisted);
        assert_eq!(Element::Water.against(Element::Fire), Affinity::SuperEffective);
        assert_eq!(Element::Fire.against(Element::Fire), Affinity::Immune);
        assert_eq!(Element::Fire.against(Element::Thunder), Affinity::Neutral);
        assert_eq!(Element::Light.against(Element::Dark), Affinity::SuperEffective);
        assert_eq!(Element::Neutral.against(Element::Fire), Affinity::Neutral);
    }

    #[test]
    fn multiple_tags_take_most_favorable() {
        let defender = [Element::Fire, Element::Ice];
        assert_eq!(best_affinity(Element::Fire, &defender), Affinity::SuperEffective);
        assert_eq!(element_multiplier(Element::Fire, &defender), 1.8);
        assert_eq!(element_multiplier(Element::Fire, &[]), 1.0);
        assert_eq!(element_multiplier(Element::Ice, &[Element::Ice]), 0.6);
    }
}
