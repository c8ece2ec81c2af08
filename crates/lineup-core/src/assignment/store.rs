// Assignment store: the single source of truth for which player is in which group.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::group::{Group, Player, PlayerId};

/// Per-group player counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCounts {
    pub home: usize,
    pub away: usize,
    pub bench: usize,
}

impl GroupCounts {
    pub fn get(&self, group: Group) -> usize {
        match group {
            Group::Home => self.home,
            Group::Away => self.away,
            Group::Bench => self.bench,
        }
    }

    pub fn total(&self) -> usize {
        self.home + self.away + self.bench
    }
}

/// Serializable copy of the three groups at a point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentSnapshot {
    pub home: Vec<PlayerId>,
    pub away: Vec<PlayerId>,
    pub bench: Vec<PlayerId>,
}

impl AssignmentSnapshot {
    pub fn get(&self, group: Group) -> &[PlayerId] {
        match group {
            Group::Home => &self.home,
            Group::Away => &self.away,
            Group::Bench => &self.bench,
        }
    }
}

/// Partition of every known player id into home, away and bench.
///
/// Every mutation goes through [`AssignmentStore::move_to`], which removes
/// the id from its current group before appending it to the target, so an id
/// can never be in two groups or in none.
#[derive(Debug, Clone)]
pub struct AssignmentStore {
    players: Vec<Player>,
    index: HashMap<PlayerId, usize>,
    groups: [Vec<PlayerId>; 3],
    revision: u64,
}

impl AssignmentStore {
    /// Create a store with every player on the bench.
    pub fn new(players: Vec<Player>) -> Self {
        Self::with_initial(players, &[])
    }

    /// Create a store, placing players according to `placements`.
    ///
    /// Players without a placement start on the bench. Placements are
    /// applied in the order given, so they also define the order inside each
    /// group. Duplicate player ids are dropped (first occurrence wins);
    /// placements for unknown ids are ignored.
    pub fn with_initial(players: Vec<Player>, placements: &[(PlayerId, Group)]) -> Self {
        let mut unique: Vec<Player> = Vec::with_capacity(players.len());
        let mut index = HashMap::with_capacity(players.len());
        for player in players {
            if index.contains_key(&player.id) {
                warn!("Dropping duplicate player id '{}'", player.id);
                continue;
            }
            index.insert(player.id.clone(), unique.len());
            unique.push(player);
        }

        let mut placed: HashSet<&PlayerId> = HashSet::new();
        let mut groups: [Vec<PlayerId>; 3] = Default::default();
        for (id, group) in placements {
            if !index.contains_key(id) {
                warn!("Ignoring placement for unknown player id '{}'", id);
                continue;
            }
            if !placed.insert(id) {
                continue;
            }
            groups[group.index()].push(id.clone());
        }
        for player in &unique {
            if !placed.contains(&player.id) {
                groups[Group::Bench.index()].push(player.id.clone());
            }
        }

        AssignmentStore {
            players: unique,
            index,
            groups,
            revision: 0,
        }
    }

    /// Ordered contents of a group.
    pub fn get_group(&self, group: Group) -> &[PlayerId] {
        &self.groups[group.index()]
    }

    /// Reassign a player, appending it to the end of `group`.
    ///
    /// Returns the group the player was in before the move, or `None` when
    /// the id is unknown (in which case nothing changes). Moving a player into
    /// the group it already occupies re-appends it at the end.
    pub fn move_to(&mut self, id: &PlayerId, group: Group) -> Option<Group> {
        let previous = self.group_of(id)?;
        let from = &mut self.groups[previous.index()];
        if let Some(pos) = from.iter().position(|p| p == id) {
            from.remove(pos);
        }
        self.groups[group.index()].push(id.clone());
        self.revision += 1;
        debug!("Moved player {} from {} to {}", id, previous, group);
        debug_assert!(self.is_partition());
        Some(previous)
    }

    /// The group currently holding `id`.
    pub fn group_of(&self, id: &PlayerId) -> Option<Group> {
        Group::ALL
            .into_iter()
            .find(|g| self.groups[g.index()].contains(id))
    }

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.index.get(id).map(|&i| &self.players[i])
    }

    /// All known players in roster order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn contains(&self, id: &PlayerId) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn counts(&self) -> GroupCounts {
        GroupCounts {
            home: self.groups[Group::Home.index()].len(),
            away: self.groups[Group::Away.index()].len(),
            bench: self.groups[Group::Bench.index()].len(),
        }
    }

    /// Saving requires at least one player on each team. The bench may be empty.
    pub fn can_save(&self) -> bool {
        !self.get_group(Group::Home).is_empty() && !self.get_group(Group::Away).is_empty()
    }

    /// Number of successful moves applied so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether every known id sits in exactly one group and nothing else does.
    pub fn is_partition(&self) -> bool {
        let mut seen: HashSet<&PlayerId> = HashSet::with_capacity(self.players.len());
        for group in &self.groups {
            for id in group {
                if !self.index.contains_key(id) || !seen.insert(id) {
                    return false;
                }
            }
        }
        seen.len() == self.players.len()
    }

    pub fn snapshot(&self) -> AssignmentSnapshot {
        AssignmentSnapshot {
            home: self.get_group(Group::Home).to_vec(),
            away: self.get_group(Group::Away).to_vec(),
            bench: self.get_group(Group::Bench).to_vec(),
        }
    }
}
