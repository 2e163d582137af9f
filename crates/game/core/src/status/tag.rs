//! Static per-tag rules for status effects.

use crate::stats::StatKind;

/// Broad classification used for cleansing, ordering and AI heuristics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusCategory {
    Buff,
    Debuff,
    DamageOverTime,
    HealOverTime,
    Control,
    Special,
}

impl StatusCategory {
    /// Categories removed by a cleanse.
    pub const fn is_harmful(self) -> bool {
        matches!(self, Self::Debuff | Self::DamageOverTime | Self::Control)
    }
}

/// How a second application of the same tag combines with the first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MergePolicy {
    /// Refresh when the new instance is at least as strong.
    ReplaceIfStronger,
    /// Add one stack up to the tag's max and keep the later expiry.
    StackUpToMax,
    /// Sum remaining payloads and spread them over the longer duration.
    AccumulateAndRefresh,
}

/// Direction a status pushes a stat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Polarity {
    Up,
    Down,
}

/// Rules shared by every instance of a tag.
#[derive(Clone, Copy, Debug)]
pub struct StatusSpec {
    pub category: StatusCategory,
    pub merge: MergePolicy,
    pub max_stacks: u8,
    /// Longest duration (in owner turns) an instance may hold.
    pub max_duration: u32,
    pub modifiers: &'static [(StatKind, Polarity)],
    pub blocks_action: bool,
    pub blocks_skills: bool,
}

impl StatusSpec {
    const fn new(category: StatusCategory, merge: MergePolicy, max_duration: u32) -> Self {
        Self {
            category,
            merge,
            max_stacks: 1,
            max_duration,
            modifiers: &[],
            blocks_action: false,
            blocks_skills: false,
        }
    }

    const fn dot(max_duration: u32) -> Self {
        Self::new(
            StatusCategory::DamageOverTime,
            MergePolicy::AccumulateAndRefresh,
            max_duration,
        )
    }

    const fn stat(
        category: StatusCategory,
        modifiers: &'static [(StatKind, Polarity)],
    ) -> Self {
        let mut spec = Self::new(category, MergePolicy::StackUpToMax, STAT_DURATION_CAP);
        spec.max_stacks = 3;
        spec.modifiers = modifiers;
        spec
    }

    const fn control(blocks_action: bool) -> Self {
        let mut spec = Self::new(
            StatusCategory::Control,
            MergePolicy::ReplaceIfStronger,
            CONTROL_DURATION_CAP,
        );
        spec.blocks_action = blocks_action;
        spec.blocks_skills = !blocks_action;
        spec
    }
}

const STAT_DURATION_CAP: u32 = 9;
const CONTROL_DURATION_CAP: u32 = 5;

/// Every status the engine knows.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::EnumIter, strum::Display,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusTag {
    // ========================================================================
    // Damage / heal over time
    // ========================================================================
    Poison,
    Burn,
    Bleed,
    Regen,

    // ========================================================================
    // Stackable buffs
    // ========================================================================
    AttackUp,
    MagicUp,
    DefenseUp,
    Haste,
    AccuracyUp,
    EvasionUp,
    CritUp,

    // ========================================================================
    // Stackable debuffs
    // ========================================================================
    AttackDown,
    DefenseDown,
    Slow,
    Blind,

    // ========================================================================
    // Control
    // ========================================================================
    Stun,
    Sleep,
    Freeze,
    Paralysis,
    Petrify,
    /// Blocks skills but not innate actions.
    Silence,

    // ========================================================================
    // Special
    // ========================================================================
    /// Granted by Defend.
    Guard,
    /// Attack up, defense down.
    Berserk,
}

impl StatusTag {
    pub const fn spec(self) -> StatusSpec {
        use Polarity::{Down, Up};
        use StatKind::*;
        use StatusCategory::{Buff, Debuff, HealOverTime, Special};

        match self {
            Self::Poison => StatusSpec::dot(8),
            Self::Burn | Self::Bleed => StatusSpec::dot(6),
            Self::Regen => StatusSpec::new(HealOverTime, MergePolicy::ReplaceIfStronger, 8),

            Self::AttackUp => StatusSpec::stat(Buff, &[(Attack, Up)]),
            Self::MagicUp => StatusSpec::stat(Buff, &[(Magic, Up)]),
            Self::DefenseUp => StatusSpec::stat(Buff, &[(Defense, Up)]),
            Self::Haste => StatusSpec::stat(Buff, &[(Speed, Up)]),
            Self::AccuracyUp => StatusSpec::stat(Buff, &[(Accuracy, Up)]),
            Self::EvasionUp => StatusSpec::stat(Buff, &[(Evasion, Up)]),
            Self::CritUp => StatusSpec::stat(Buff, &[(Critical, Up)]),

            Self::AttackDown => StatusSpec::stat(Debuff, &[(Attack, Down)]),
            Self::DefenseDown => StatusSpec::stat(Debuff, &[(Defense, Down)]),
            Self::Slow => StatusSpec::stat(Debuff, &[(Speed, Down)]),
            Self::Blind => StatusSpec::stat(Debuff, &[(Accuracy, Down)]),

            Self::Stun | Self::Sleep | Self::Freeze | Self::Paralysis | Self::Petrify => {
                StatusSpec::control(true)
            }
            Self::Silence => StatusSpec::control(false),

            Self::Guard => {
                let mut spec =
                    StatusSpec::new(Special, MergePolicy::ReplaceIfStronger, CONTROL_DURATION_CAP);
                spec.modifiers = &[(Defense, Up)];
                spec
            }
            Self::Berserk => {
                let mut spec =
                    StatusSpec::new(Special, MergePolicy::ReplaceIfStronger, CONTROL_DURATION_CAP);
                spec.modifiers = &[(Attack, Up), (Defense, Down)];
                spec
            }
        }
    }

    pub const fn category(self) -> StatusCategory {
        self.spec().category
    }

    pub const fn max_duration(self) -> u32 {
        self.spec().max_duration
    }

    pub const fn is_over_time(self) -> bool {
        matches!(
            self.category(),
            StatusCategory::DamageOverTime | StatusCategory::HealOverTime
        )
    }

    /// Processing phase inside one tick: DoT, then HoT, then passive.
    pub(crate) const fn tick_phase(self) -> u8 {
        match self.category() {
            StatusCategory::DamageOverTime => 0,
            StatusCategory::HealOverTime => 1,
            _ => 2,
        }
    }
}
