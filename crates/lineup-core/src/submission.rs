// Submission form: the assignment serialized as two comma-joined id lists.
//
// The bench is never sent; whoever is not on either team stays on it.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::assignment::{AssignmentStore, Group, PlayerId};
use crate::config::SubmitConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("both teams need at least one player (home: {home}, away: {away})")]
    NotReady { home: usize, away: usize },

    #[error("player {0} is not registered for this match")]
    UnknownPlayer(PlayerId),

    #[error("player {0} is assigned to both teams")]
    DuplicatePlayer(PlayerId),
}

/// Names of the two form fields receiving the id lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFieldNames {
    pub home: String,
    pub away: String,
}

impl From<&SubmitConfig> for FormFieldNames {
    fn from(submit: &SubmitConfig) -> Self {
        FormFieldNames {
            home: submit.home_field.clone(),
            away: submit.away_field.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub home: Vec<PlayerId>,
    pub away: Vec<PlayerId>,
}

impl Submission {
    /// Capture the current teams. Fails when either team is empty.
    pub fn from_store(store: &AssignmentStore) -> Result<Self, SubmissionError> {
        let submission = Submission {
            home: store.get_group(Group::Home).to_vec(),
            away: store.get_group(Group::Away).to_vec(),
        };
        submission.check_ready()?;
        Ok(submission)
    }

    /// Form fields in submission order: home, then away.
    pub fn to_form_fields(&self, names: &FormFieldNames) -> Vec<(String, String)> {
        vec![
            (names.home.clone(), encode_ids(&self.home)),
            (names.away.clone(), encode_ids(&self.away)),
        ]
    }

    /// Read a submission back from posted form fields. A missing field is an
    /// empty team.
    pub fn from_form_fields(fields: &HashMap<String, String>, names: &FormFieldNames) -> Self {
        let ids = |name: &str| fields.get(name).map(|v| parse_ids(v)).unwrap_or_default();
        Submission {
            home: ids(&names.home),
            away: ids(&names.away),
        }
    }

    /// Receiving-side checks: both teams non-empty, every id registered,
    /// nobody on both teams.
    pub fn validate(&self, registered: &HashSet<PlayerId>) -> Result<(), SubmissionError> {
        self.check_ready()?;
        for id in self.home.iter().chain(&self.away) {
            if !registered.contains(id) {
                return Err(SubmissionError::UnknownPlayer(id.clone()));
            }
        }
        let home: HashSet<&PlayerId> = self.home.iter().collect();
        if let Some(id) = self.away.iter().find(|id| home.contains(id)) {
            return Err(SubmissionError::DuplicatePlayer(id.clone()));
        }
        Ok(())
    }

    fn check_ready(&self) -> Result<(), SubmissionError> {
        if self.home.is_empty() || self.away.is_empty() {
            return Err(SubmissionError::NotReady {
                home: self.home.len(),
                away: self.away.len(),
            });
        }
        Ok(())
    }
}

/// Join ids with commas.
pub fn encode_ids(ids: &[PlayerId]) -> String {
    ids.iter()
        .map(PlayerId::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

/// Split a comma-joined list, trimming entries and skipping empty ones.
pub fn parse_ids(value: &str) -> Vec<PlayerId> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PlayerId::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::Player;

    fn names() -> FormFieldNames {
        FormFieldNames {
            home: "equipo_local_jugadores".into(),
            away: "equipo_visitante_jugadores".into(),
        }
    }

    fn ids(list: &[&str]) -> Vec<PlayerId> {
        list.iter().map(|s| PlayerId::from(*s)).collect()
    }

    fn registered(list: &[&str]) -> HashSet<PlayerId> {
        ids(list).into_iter().collect()
    }

    #[test]
    fn encode_and_parse() {
        assert_eq!(encode_ids(&ids(&["4", "9", "12"])), "4,9,12");
        assert_eq!(encode_ids(&[]), "");
        assert_eq!(parse_ids("4,9,12"), ids(&["4", "9", "12"]));
        assert_eq!(parse_ids(""), Vec::<PlayerId>::new());
        assert_eq!(parse_ids("4,,9, "), ids(&["4", "9"]));
        assert_eq!(parse_ids(" 4 , 9"), ids(&["4", "9"]));
    }

    #[test]
    fn from_store_requires_both_teams() {
        let mut store = AssignmentStore::new(vec![
            Player::new("1", "Ana", ""),
            Player::new("2", "Bea", ""),
            Player::new("3", "Cris", ""),
        ]);
        store.move_to(&PlayerId::from("1"), Group::Home);
        assert_eq!(
            Submission::from_store(&store),
            Err(SubmissionError::NotReady { home: 1, away: 0 })
        );

        store.move_to(&PlayerId::from("3"), Group::Away);
        let submission = Submission::from_store(&store).unwrap();
        assert_eq!(submission.home, ids(&["1"]));
        assert_eq!(submission.away, ids(&["3"]));
    }

    #[test]
    fn form_fields_use_configured_names() {
        let submission = Submission {
            home: ids(&["1", "2"]),
            away: ids(&["3"]),
        };
        let fields = submission.to_form_fields(&names());
        assert_eq!(
            fields,
            vec![
                ("equipo_local_jugadores".to_string(), "1,2".to_string()),
                ("equipo_visitante_jugadores".to_string(), "3".to_string()),
            ]
        );
        let posted: HashMap<String, String> = fields.into_iter().collect();
        assert_eq!(Submission::from_form_fields(&posted, &names()), submission);
    }

    #[test]
    fn missing_field_reads_as_empty_team() {
        let mut posted = HashMap::new();
        posted.insert("equipo_local_jugadores".to_string(), "1".to_string());
        let submission = Submission::from_form_fields(&posted, &names());
        assert_eq!(submission.home, ids(&["1"]));
        assert!(submission.away.is_empty());
    }

    #[test]
    fn validate_rejects_unregistered_players() {
        let submission = Submission {
            home: ids(&["1"]),
            away: ids(&["99"]),
        };
        assert_eq!(
            submission.validate(&registered(&["1", "2"])),
            Err(SubmissionError::UnknownPlayer(PlayerId::from("99")))
        );
    }

    #[test]
    fn validate_rejects_player_on_both_teams() {
        let submission = Submission {
            home: ids(&["1", "2"]),
            away: ids(&["2"]),
        };
        assert_eq!(
            submission.validate(&registered(&["1", "2"])),
            Err(SubmissionError::DuplicatePlayer(PlayerId::from("2")))
        );
    }

    #[test]
    fn validate_accepts_well_formed_submission() {
        let submission = Submission {
            home: ids(&["1"]),
            away: ids(&["2"]),
        };
        assert!(submission.validate(&registered(&["1", "2", "3"])).is_ok());
    }

    #[test]
    fn field_names_from_config() {
        let submit = SubmitConfig::default();
        let names = FormFieldNames::from(&submit);
        assert_eq!(names.home, "home_players");
        assert_eq!(names.away, "away_players");
    }
}
