// Randomized split of every player into home and away.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::assignment::{AssignmentStore, Group, PlayerId};

/// Default pause before an auto-assignment is applied, so the loading state
/// is visible.
pub const DEFAULT_DELAY_MS: u64 = 500;

/// A generated split. `bench` is always empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoAssignment {
    pub home: Vec<PlayerId>,
    pub away: Vec<PlayerId>,
    pub bench: Vec<PlayerId>,
}

impl AutoAssignment {
    /// Move every player into its generated group.
    pub fn apply(&self, store: &mut AssignmentStore) {
        for (group, ids) in [
            (Group::Home, &self.home),
            (Group::Away, &self.away),
            (Group::Bench, &self.bench),
        ] {
            for id in ids {
                store.move_to(id, group);
            }
        }
    }
}

/// Shuffle `players` uniformly and split at the midpoint. With an odd count
/// the extra player goes to home.
pub fn generate<R: Rng>(players: &[PlayerId], rng: &mut R) -> AutoAssignment {
    let mut shuffled = players.to_vec();
    shuffled.shuffle(rng);
    let half = shuffled.len().div_ceil(2);
    let away = shuffled.split_off(half);
    AutoAssignment {
        home: shuffled,
        away,
        bench: Vec::new(),
    }
}

/// Tracks the loading state of an auto-assignment run and keeps the last result
/// for the result panel.
#[derive(Debug, Clone, Default)]
pub struct AutoAssigner {
    busy: bool,
    last_result: Option<AutoAssignment>,
}

impl AutoAssigner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn last_result(&self) -> Option<&AutoAssignment> {
        self.last_result.as_ref()
    }

    /// Enter the busy state. Returns `false` if a run is already in progress.
    pub fn begin(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.busy = true;
        true
    }

    /// Generate and apply a split, then leave the busy state.
    ///
    /// Returns `None` when no run was started with [`AutoAssigner::begin`].
    pub fn finish<R: Rng>(
        &mut self,
        rng: &mut R,
        store: &mut AssignmentStore,
    ) -> Option<&AutoAssignment> {
        if !self.busy {
            return None;
        }
        let ids: Vec<PlayerId> = store.players().iter().map(|p| p.id.clone()).collect();
        let assignment = generate(&ids, rng);
        assignment.apply(store);
        info!(
            "Auto-assigned {} home / {} away",
            assignment.home.len(),
            assignment.away.len()
        );
        self.busy = false;
        self.last_result = Some(assignment);
        self.last_result.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::Player;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn ids(n: usize) -> Vec<PlayerId> {
        (1..=n).map(|i| PlayerId::new(format!("p{i}"))).collect()
    }

    #[test]
    fn split_sizes_favor_home_on_odd_counts() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in 0..12 {
            let result = generate(&ids(n), &mut rng);
            assert_eq!(result.home.len(), n.div_ceil(2), "n = {n}");
            assert_eq!(result.away.len(), n / 2, "n = {n}");
            assert!(result.bench.is_empty());
        }
    }

    #[test]
    fn split_is_a_permutation_of_input() {
        let mut rng = StdRng::seed_from_u64(42);
        let input = ids(9);
        let result = generate(&input, &mut rng);
        let mut all: Vec<PlayerId> = result.home.iter().chain(&result.away).cloned().collect();
        let unique: HashSet<&PlayerId> = all.iter().collect();
        assert_eq!(unique.len(), all.len());
        all.sort();
        let mut expected = input.clone();
        expected.sort();
        assert_eq!(all, expected);
    }

    #[test]
    fn every_player_can_land_in_either_team() {
        // A uniform shuffle puts each player on home roughly half the time.
        let mut rng = StdRng::seed_from_u64(1);
        let input = ids(4);
        let mut home_hits = [0usize; 4];
        for _ in 0..2000 {
            let result = generate(&input, &mut rng);
            for (i, id) in input.iter().enumerate() {
                if result.home.contains(id) {
                    home_hits[i] += 1;
                }
            }
        }
        for hits in home_hits {
            assert!((800..1200).contains(&hits), "home hits {hits}");
        }
    }

    #[test]
    fn assigner_requires_begin_and_rejects_reentry() {
        let mut store = AssignmentStore::new(vec![
            Player::new("p1", "Ana", ""),
            Player::new("p2", "Bea", ""),
            Player::new("p3", "Cris", ""),
        ]);
        let mut rng = StdRng::seed_from_u64(3);
        let mut assigner = AutoAssigner::new();

        assert!(assigner.finish(&mut rng, &mut store).is_none());
        assert!(assigner.begin());
        assert!(assigner.is_busy());
        assert!(!assigner.begin());

        let result = assigner.finish(&mut rng, &mut store).cloned().unwrap();
        assert!(!assigner.is_busy());
        assert_eq!(store.get_group(Group::Home), result.home.as_slice());
        assert_eq!(store.get_group(Group::Away), result.away.as_slice());
        assert!(store.get_group(Group::Bench).is_empty());
        assert!(store.can_save());
        assert_eq!(assigner.last_result(), Some(&result));
    }
}
