//! Per-actor memory of which kinds of action have been working.
//!
//! Only actors with the adaptive archetype consult their memory when
//! weighting candidates; the runtime records results for everyone so a
//! profile switch picks up history.

use std::collections::HashMap;

use game_core::{ActionKind, ResolutionReport};

use super::types::ActionCategory;

/// Results at or above this effectiveness reinforce the category.
pub const EFFECTIVE: f32 = 0.6;
/// Results below this effectiveness penalize the category.
pub const INEFFECTIVE: f32 = 0.3;

const REWARD: f32 = 1.15;
const PENALTY: f32 = 0.85;
const MAX_MULTIPLIER: f32 = 1.6;
const MIN_MULTIPLIER: f32 = 0.5;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdaptiveMemory {
    multipliers: HashMap<ActionCategory, f32>,
    outcomes: usize,
}

impl AdaptiveMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current multiplier for `category`; 1.0 when nothing was learned.
    pub fn multiplier(&self, category: ActionCategory) -> f32 {
        self.multipliers.get(&category).copied().unwrap_or(1.0)
    }

    /// Number of results recorded so far.
    pub fn outcomes(&self) -> usize {
        self.outcomes
    }

    /// Folds one result into the category of `kind`.
    ///
    /// `effectiveness` is in `0.0..=1.0`; values in between the thresholds
    /// leave the multiplier unchanged.
    pub fn learn_from_result(&mut self, kind: ActionKind, effectiveness: f32) {
        let Some(category) = ActionCategory::of(kind) else {
            return;
        };
        self.outcomes += 1;
        let entry = self.multipliers.entry(category).or_insert(1.0);
        if effectiveness >= EFFECTIVE {
            *entry = (*entry * REWARD).min(MAX_MULTIPLIER);
        } else if effectiveness < INEFFECTIVE {
            *entry = (*entry * PENALTY).max(MIN_MULTIPLIER);
        }
        tracing::debug!(%category, effectiveness, multiplier = *entry, "memory updated");
    }
}

/// Scores how well a resolved action did, in `0.0..=1.0`.
///
/// Offense is judged by hits, breaks and kills; healing by whether anything
/// was restored; support and defend by whether an effect landed.
pub fn effectiveness(report: &ResolutionReport) -> f32 {
    let targets = report.totals.len().max(1) as f32;
    match report.kind {
        ActionKind::Wait => 0.5,
        ActionKind::Defend => 0.5,
        ActionKind::Heal => {
            if report.total_healing() > 0 || report.statuses_landed() > 0 {
                0.8
            } else {
                0.2
            }
        }
        ActionKind::Buff => (report.statuses_landed() as f32 / targets).min(1.0),
        ActionKind::Debuff | ActionKind::Field => {
            (report.statuses_landed() as f32 / targets).min(1.0)
        }
        _ => {
            let hit_rate = report.hits() as f32 / targets;
            let mut score = 0.5 * hit_rate;
            if report.broke_any() {
                score += 0.25;
            }
            if !report.kills().is_empty() {
                score += 0.25;
            } else if report.total_hp_damage() > 0 {
                score += 0.15;
            }
            score.min(1.0)
        }
    }
}
