// Dropdown adapter: one three-way selector per player plus per-group
// counters and avatar previews.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::assignment::{AssignmentStore, Group, GroupCounts, PlayerId};

/// A player's selector and its current value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selector {
    pub player: PlayerId,
    pub value: Group,
}

/// Compact avatar entry shown in a group's preview strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewEntry {
    pub player: PlayerId,
    pub name: String,
    pub avatar: String,
}

/// Counters and preview strips, rebuilt in full on every change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownSummary {
    pub counts: GroupCounts,
    pub home: Vec<PreviewEntry>,
    pub away: Vec<PreviewEntry>,
    pub bench: Vec<PreviewEntry>,
}

impl DropdownSummary {
    pub fn previews(&self, group: Group) -> &[PreviewEntry] {
        match group {
            Group::Home => &self.home,
            Group::Away => &self.away,
            Group::Bench => &self.bench,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DropdownAdapter {
    selectors: Vec<Selector>,
    summary: DropdownSummary,
}

impl DropdownAdapter {
    /// Build one selector per player (roster order), set from the store.
    pub fn new(store: &AssignmentStore) -> Self {
        let mut adapter = DropdownAdapter::default();
        adapter.sync_from_store(store);
        adapter
    }

    pub fn selectors(&self) -> &[Selector] {
        &self.selectors
    }

    pub fn summary(&self) -> &DropdownSummary {
        &self.summary
    }

    pub fn value_of(&self, player: &PlayerId) -> Option<Group> {
        self.selectors
            .iter()
            .find(|s| s.player == *player)
            .map(|s| s.value)
    }

    /// Handle a selector change: reassign the player and rebuild the summary.
    ///
    /// Returns `false` when no selector exists for `player`.
    pub fn change(&mut self, player: &PlayerId, group: Group, store: &mut AssignmentStore) -> bool {
        let Some(selector) = self.selectors.iter_mut().find(|s| s.player == *player) else {
            return false;
        };
        selector.value = group;
        if store.group_of(player) != Some(group) {
            store.move_to(player, group);
        }
        self.rebuild_summary(store);
        true
    }

    /// Set every selector to the group the store holds the player in.
    pub fn sync_from_store(&mut self, store: &AssignmentStore) {
        self.selectors = store
            .players()
            .iter()
            .map(|p| Selector {
                player: p.id.clone(),
                value: store.group_of(&p.id).unwrap_or(Group::Bench),
            })
            .collect();
        self.rebuild_summary(store);
    }

    /// Push the selections into the store, relocating only players whose
    /// selection differs from where the store has them. Returns how many moved.
    pub fn apply_to_store(&self, store: &mut AssignmentStore) -> usize {
        let mut moved = 0;
        for selector in &self.selectors {
            if store.group_of(&selector.player) != Some(selector.value)
                && store.move_to(&selector.player, selector.value).is_some()
            {
                moved += 1;
            }
        }
        if moved > 0 {
            debug!("Applied {} dropdown selection(s) to the board", moved);
        }
        moved
    }

    /// Whether the selectors and summary agree with the store.
    pub fn matches(&self, store: &AssignmentStore) -> bool {
        self.selectors.len() == store.len()
            && self
                .selectors
                .iter()
                .all(|s| store.group_of(&s.player) == Some(s.value))
            && self.summary.counts == store.counts()
    }

    fn rebuild_summary(&mut self, store: &AssignmentStore) {
        let mut summary = DropdownSummary::default();
        for selector in &self.selectors {
            let (name, avatar) = store
                .player(&selector.player)
                .map(|p| (p.name.clone(), p.avatar.clone()))
                .unwrap_or_default();
            let entry = PreviewEntry {
                player: selector.player.clone(),
                name,
                avatar,
            };
            match selector.value {
                Group::Home => {
                    summary.counts.home += 1;
                    summary.home.push(entry);
                }
                Group::Away => {
                    summary.counts.away += 1;
                    summary.away.push(entry);
                }
                Group::Bench => {
                    summary.counts.bench += 1;
                    summary.bench.push(entry);
                }
            }
        }
        self.summary = summary;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::Player;

    fn store() -> AssignmentStore {
        AssignmentStore::new(vec![
            Player::new("p1", "Ana", "ana.png"),
            Player::new("p2", "Bea", "bea.png"),
            Player::new("p3", "Cris", ""),
        ])
    }

    fn id(s: &str) -> PlayerId {
        PlayerId::from(s)
    }

    #[test]
    fn new_adapter_mirrors_store() {
        let store = store();
        let adapter = DropdownAdapter::new(&store);
        assert_eq!(adapter.selectors().len(), 3);
        assert!(adapter.selectors().iter().all(|s| s.value == Group::Bench));
        assert_eq!(adapter.summary().counts.bench, 3);
        assert!(adapter.matches(&store));
    }

    #[test]
    fn change_moves_player_and_rebuilds_summary() {
        let mut store = store();
        let mut adapter = DropdownAdapter::new(&store);
        assert!(adapter.change(&id("p2"), Group::Home, &mut store));
        assert_eq!(store.get_group(Group::Home), &[id("p2")]);
        assert_eq!(adapter.value_of(&id("p2")), Some(Group::Home));
        let summary = adapter.summary();
        assert_eq!(summary.counts, GroupCounts { home: 1, away: 0, bench: 2 });
        assert_eq!(summary.previews(Group::Home)[0].avatar, "bea.png");
        assert!(adapter.matches(&store));
    }

    #[test]
    fn change_for_unknown_player_is_rejected() {
        let mut store = store();
        let mut adapter = DropdownAdapter::new(&store);
        assert!(!adapter.change(&id("p9"), Group::Home, &mut store));
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn change_to_current_group_keeps_order() {
        let mut store = store();
        let mut adapter = DropdownAdapter::new(&store);
        adapter.change(&id("p1"), Group::Bench, &mut store);
        assert_eq!(store.get_group(Group::Bench), &[id("p1"), id("p2"), id("p3")]);
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn sync_from_store_picks_up_external_moves() {
        let mut store = store();
        let mut adapter = DropdownAdapter::new(&store);
        store.move_to(&id("p3"), Group::Away);
        assert!(!adapter.matches(&store));
        adapter.sync_from_store(&store);
        assert_eq!(adapter.value_of(&id("p3")), Some(Group::Away));
        assert!(adapter.matches(&store));
    }

    #[test]
    fn apply_to_store_only_moves_changed_players() {
        let mut store = store();
        store.move_to(&id("p1"), Group::Home);
        store.move_to(&id("p2"), Group::Home);
        let adapter = DropdownAdapter::new(&store);
        let before = store.snapshot();
        assert_eq!(adapter.apply_to_store(&mut store), 0);
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn preview_order_follows_roster_order() {
        let mut store = store();
        let mut adapter = DropdownAdapter::new(&store);
        adapter.change(&id("p3"), Group::Away, &mut store);
        adapter.change(&id("p1"), Group::Away, &mut store);
        let names: Vec<&str> = adapter
            .summary()
            .previews(Group::Away)
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["Ana", "Cris"]);
    }
}
