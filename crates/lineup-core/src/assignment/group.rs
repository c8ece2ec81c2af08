// Group designations and player identity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque player identifier as carried by the roster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        PlayerId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        PlayerId(s.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(s: String) -> Self {
        PlayerId(s)
    }
}

/// A registered player. Immutable for the whole session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Avatar reference (URL or path). Empty when the roster has none.
    #[serde(default)]
    pub avatar: String,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>, avatar: impl Into<String>) -> Self {
        Player {
            id: id.into(),
            name: name.into(),
            avatar: avatar.into(),
        }
    }
}

/// One of the three mutually exclusive player buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Group {
    Home,
    Away,
    Bench,
}

impl Group {
    /// Display and iteration order: home, away, bench.
    pub const ALL: [Group; 3] = [Group::Home, Group::Away, Group::Bench];

    /// Parse a group name. Accepts the legacy `local`/`visitante` names used
    /// by the match pages alongside `home`/`away`. Case-insensitive.
    pub fn from_str_group(s: &str) -> Option<Group> {
        match s.trim().to_ascii_lowercase().as_str() {
            "home" | "local" => Some(Group::Home),
            "away" | "visitante" => Some(Group::Away),
            "bench" => Some(Group::Bench),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Group::Home => "home",
            Group::Away => "away",
            Group::Bench => "bench",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Group::Home => "Home",
            Group::Away => "Away",
            Group::Bench => "Bench",
        }
    }

    /// Id of the container element holding this group's players.
    pub fn container_id(&self) -> &'static str {
        match self {
            Group::Home => "home-players",
            Group::Away => "away-players",
            Group::Bench => "bench-players",
        }
    }

    /// Class list a player element carries while in this group.
    pub fn element_class(&self) -> &'static str {
        match self {
            Group::Home => "field-player home-player",
            Group::Away => "field-player away-player",
            Group::Bench => "bench-player",
        }
    }

    /// Whether players in this group are on the field (home or away).
    pub fn is_field(&self) -> bool {
        !matches!(self, Group::Bench)
    }

    /// Position of this group in `Group::ALL`.
    pub fn index(&self) -> usize {
        match self {
            Group::Home => 0,
            Group::Away => 1,
            Group::Bench => 2,
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
