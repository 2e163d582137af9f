//! Core types for the heuristic decision engine.
//!
//! This module defines the situational (threat) and categorical (what kind
//! of move) types shared by analysis, generation, weighting and selection.

use game_core::{Action, ActionKind};

/// How much danger the acting combatant is in.
///
/// Derived in [`super::AiContext::analyze`] from the enemies' aggregate
/// offense against the actor's defenses, scaled up as the actor loses HP.
/// Ordering follows severity so `threat >= ThreatLevel::High` reads naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ThreatLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl ThreatLevel {
    /// Pressure below which each level applies.
    const MEDIUM_AT: f32 = 2.5;
    const HIGH_AT: f32 = 5.0;
    const CRITICAL_AT: f32 = 8.0;

    pub fn from_pressure(pressure: f32) -> Self {
        if pressure >= Self::CRITICAL_AT {
            Self::Critical
        } else if pressure >= Self::HIGH_AT {
            Self::High
        } else if pressure >= Self::MEDIUM_AT {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// One level worse, saturating at `Critical`.
    pub fn escalate(self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High | Self::Critical => Self::Critical,
        }
    }
}

/// Category a candidate belongs to for personality and memory weighting.
///
/// Every [`ActionKind`] except `Wait` maps to exactly one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum ActionCategory {
    /// Plain Brave and HP attacks.
    Attack,
    /// Combo attacks, finishers, debuffs and fields.
    Skill,
    Defend,
    Heal,
    /// Buffs on allies or self.
    Support,
}

impl ActionCategory {
    pub fn of(kind: ActionKind) -> Option<Self> {
        match kind {
            ActionKind::BasicAttack | ActionKind::HpAttack | ActionKind::Counter => {
                Some(Self::Attack)
            }
            ActionKind::BraveAttack
            | ActionKind::BraveHpAttack
            | ActionKind::Ultimate
            | ActionKind::Debuff
            | ActionKind::Field => Some(Self::Skill),
            ActionKind::Defend => Some(Self::Defend),
            ActionKind::Heal => Some(Self::Heal),
            ActionKind::Buff => Some(Self::Support),
            ActionKind::Wait => None,
        }
    }
}

/// One concrete option the engine may pick.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub action: Action,
    pub category: ActionCategory,
    /// Situational score before personality and memory weighting.
    pub base: f32,
    /// Final score used for ranking and sampling.
    pub priority: f32,
}

impl Candidate {
    pub fn new(action: Action, category: ActionCategory, base: f32) -> Self {
        Self {
            action,
            category,
            base,
            priority: base,
        }
    }
}
