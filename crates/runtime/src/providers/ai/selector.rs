//! Final pick among weighted candidates.
//!
//! Candidates are ranked by priority and the top
//! [`CombatConfig::SAMPLE_POOL`] are sampled
//! proportionally to their priority with the RNG oracle. Ties keep
//! generation order, so the result depends only on the candidates and the
//! roll.

use game_core::{CombatConfig, RngOracle};

use super::types::Candidate;

/// Resolution of the sampling roll.
const ROLL_SCALE: u32 = 10_000;

/// Sorts `candidates` by descending priority and keeps the sampling pool.
pub fn rank(mut candidates: Vec<Candidate>) -> Vec<Candidate> {
    candidates.sort_by(|a, b| b.priority.total_cmp(&a.priority));
    candidates.truncate(CombatConfig::SAMPLE_POOL);
    candidates
}

/// Picks one candidate, or `None` when there are none.
pub fn select(candidates: Vec<Candidate>, rng: &dyn RngOracle, seed: u64) -> Option<Candidate> {
    let pool = rank(candidates);
    let total: f32 = pool.iter().map(|c| c.priority.max(0.0)).sum();
    if total <= 0.0 {
        return pool.into_iter().next();
    }

    let roll = rng.range(seed, 0, ROLL_SCALE - 1) as f32 / ROLL_SCALE as f32 * total;
    let mut cumulative = 0.0;
    let mut chosen = None;
    for (index, candidate) in pool.iter().enumerate() {
        cumulative += candidate.priority.max(0.0);
        if roll < cumulative {
            chosen = Some(index);
            break;
        }
    }
    // Float rounding can leave the roll just past the last boundary.
    let index = chosen.unwrap_or(pool.len() - 1);
    pool.into_iter().nth(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ai::types::ActionCategory;
    use game_core::{Action, EntityId, FixedRolls};

    fn candidate(priority: f32, target: u32) -> Candidate {
        let mut c = Candidate::new(
            Action::basic_attack(EntityId(1), EntityId(target)),
            ActionCategory::Attack,
            priority,
        );
        c.priority = priority;
        c
    }

    #[test]
    fn keeps_only_the_top_three() {
        let ranked = rank(vec![
            candidate(1.0, 1),
            candidate(9.0, 2),
            candidate(5.0, 3),
            candidate(7.0, 4),
        ]);
        let priorities: Vec<f32> = ranked.iter().map(|c| c.priority).collect();
        assert_eq!(priorities, vec![9.0, 7.0, 5.0]);
    }

    #[test]
    fn pool_size_follows_combat_config() {
        let many: Vec<Candidate> = (0..10).map(|i| candidate(i as f32 + 1.0, i)).collect();
        assert_eq!(rank(many).len(), CombatConfig::SAMPLE_POOL);
        assert_eq!(rank(vec![candidate(1.0, 1)]).len(), 1);
    }

    /// Always returns the same raw value.
    struct Raw(u32);

    impl RngOracle for Raw {
        fn next_u32(&self, _seed: u64) -> u32 {
            self.0
        }
    }

    #[test]
    fn samples_proportionally_within_the_pool() {
        let pool = || {
            vec![
                candidate(50.0, 2),
                candidate(30.0, 3),
                candidate(20.0, 4),
                candidate(100.0, 5),
            ]
        };
        // Pool total is 180: the top slot covers [0, 100), the second [100, 150).
        assert_eq!(select(pool(), &Raw(0), 0).unwrap().priority, 100.0);
        assert_eq!(select(pool(), &Raw(6_000), 0).unwrap().priority, 50.0);
        assert_eq!(select(pool(), &Raw(9_999), 0).unwrap().priority, 30.0);
    }

    #[test]
    fn scripted_percentile_rolls_land_in_the_top_slot() {
        let pool = vec![candidate(10.0, 2), candidate(90.0, 3)];
        let chosen = select(pool, &FixedRolls::always(100), 0).unwrap();
        assert_eq!(chosen.priority, 90.0);
    }

    #[test]
    fn empty_pool_selects_nothing() {
        assert!(select(Vec::new(), &FixedRolls::always(50), 0).is_none());
    }
}
