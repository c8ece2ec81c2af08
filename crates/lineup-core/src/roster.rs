// Roster loading: the players registered for a match and where they start.
//
// CSV columns: id,name,avatar,group. `avatar` and `group` may be empty;
// a missing or unrecognized group places the player on the bench.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::assignment::{AssignmentStore, Group, Player, PlayerId};

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("failed to read roster {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("roster {path} contains no players")]
    Empty { path: String },
}

/// Players plus their initial placement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    pub players: Vec<Player>,
    pub placements: Vec<(PlayerId, Group)>,
}

impl Roster {
    /// Build the assignment store in its initial state.
    pub fn into_store(self) -> AssignmentStore {
        AssignmentStore::with_initial(self.players, &self.placements)
    }
}

#[derive(Debug, Deserialize)]
struct RawRosterRow {
    id: String,
    name: String,
    #[serde(default)]
    avatar: String,
    #[serde(default)]
    group: String,
}

/// Load a roster CSV from disk.
pub fn load_roster(path: &Path) -> Result<Roster, RosterError> {
    let display = path.display().to_string();
    let file = std::fs::File::open(path).map_err(|e| RosterError::Io {
        path: display.clone(),
        source: e,
    })?;
    let roster = load_roster_from_reader(file).map_err(|e| RosterError::Csv {
        path: display.clone(),
        source: e,
    })?;
    if roster.players.is_empty() {
        return Err(RosterError::Empty { path: display });
    }
    Ok(roster)
}

/// Parse roster rows. Malformed rows, blank ids and repeated ids are skipped.
pub fn load_roster_from_reader<R: Read>(rdr: R) -> Result<Roster, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(rdr);
    let mut roster = Roster::default();
    let mut seen: HashSet<String> = HashSet::new();

    for result in reader.deserialize::<RawRosterRow>() {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                warn!("skipping malformed roster row: {}", e);
                continue;
            }
        };
        if raw.id.is_empty() {
            warn!("skipping roster row for '{}': empty id", raw.name);
            continue;
        }
        if !seen.insert(raw.id.clone()) {
            warn!("skipping duplicate roster id '{}'", raw.id);
            continue;
        }

        let group = if raw.group.is_empty() {
            Group::Bench
        } else {
            Group::from_str_group(&raw.group).unwrap_or_else(|| {
                warn!(
                    "unknown group '{}' for player '{}', placing on bench",
                    raw.group, raw.id
                );
                Group::Bench
            })
        };

        let player = Player::new(raw.id.as_str(), raw.name, raw.avatar);
        roster.placements.push((player.id.clone(), group));
        roster.players.push(player);
    }

    Ok(roster)
}
