// Session snapshots: a flat JSON record of settings plus pick history.
//
// `drafted` is never stored. Restoring replays `history` against the pool,
// which rebuilds `drafted` and `my_counts` through the same code path as a
// live session.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::RawDraftConfig;
use crate::draft::position::Position;
use crate::draft::roster::RosterCounts;
use crate::draft::state::{DraftEvent, DraftSession};
use crate::error::DraftError;
use crate::pool::PlayerPool;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot I/O failed for {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse snapshot {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("invalid snapshot settings: {0}")]
    Settings(#[from] DraftError),

    #[error("history entry {index} ('{name}') cannot be replayed: {source}")]
    Replay {
        index: usize,
        name: String,
        source: DraftError,
    },
}

// ---------------------------------------------------------------------------
// Snapshot record
// ---------------------------------------------------------------------------

/// History entry kind as written to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    #[serde(alias = "drafted")]
    LeagueDrafted,
    Mine,
}

/// One `(kind, name, position)` triple of the pick history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub kind: EventKind,
    pub name: String,
    pub position: Position,
}

impl From<&DraftEvent> for HistoryEntry {
    fn from(event: &DraftEvent) -> Self {
        let kind = match event {
            DraftEvent::LeagueDrafted { .. } => EventKind::LeagueDrafted,
            DraftEvent::Mine { .. } => EventKind::Mine,
        };
        HistoryEntry {
            kind,
            name: event.name().to_string(),
            position: event.position(),
        }
    }
}

fn default_teams() -> i64 {
    RawDraftConfig::default().teams
}

fn default_top_n() -> i64 {
    RawDraftConfig::default().top_n
}

fn default_starters() -> BTreeMap<String, i64> {
    RawDraftConfig::default().starters
}

fn default_weights() -> BTreeMap<String, f64> {
    RawDraftConfig::default().weights
}

/// Everything needed to rebuild a session, given the pool it came from.
///
/// Unknown fields are ignored on load; missing optional fields take the
/// same defaults as a fresh configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub csv_path: String,
    #[serde(default = "default_teams")]
    pub teams: i64,
    #[serde(default = "default_starters")]
    pub starters: BTreeMap<String, i64>,
    #[serde(default)]
    pub bench: BTreeMap<String, i64>,
    #[serde(default = "default_weights")]
    pub weights: BTreeMap<String, f64>,
    #[serde(default = "default_top_n")]
    pub top_n: i64,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    #[serde(default)]
    pub my_counts: BTreeMap<String, u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl SessionSnapshot {
    /// Capture the current state of `session`.
    pub fn capture(session: &DraftSession) -> Self {
        let raw = session.config().to_raw();
        SessionSnapshot {
            csv_path: session.pool().source().to_string(),
            teams: raw.teams,
            starters: raw.starters,
            bench: raw.bench,
            weights: raw.weights,
            top_n: raw.top_n,
            history: session.history().iter().map(HistoryEntry::from).collect(),
            my_counts: session.my_counts().to_map(),
            saved_at: Some(Utc::now()),
        }
    }

    /// The settings portion, unvalidated.
    pub fn raw_config(&self) -> RawDraftConfig {
        RawDraftConfig {
            teams: self.teams,
            top_n: self.top_n,
            starters: self.starters.clone(),
            bench: self.bench.clone(),
            weights: self.weights.clone(),
        }
    }

    /// Rebuild a session over `pool` by replaying the recorded history.
    ///
    /// The replayed roster counts are authoritative. A stored `my_counts`
    /// that disagrees with them is reported and ignored.
    pub fn restore(&self, pool: PlayerPool) -> Result<DraftSession, SnapshotError> {
        let mut session = DraftSession::from_raw(pool, &self.raw_config())?;
        let stored_counts = RosterCounts::from_map(&self.my_counts).map_err(DraftError::from)?;

        for (index, entry) in self.history.iter().enumerate() {
            let replayed = match entry.kind {
                EventKind::LeagueDrafted => session.mark_league_drafted(&entry.name),
                EventKind::Mine => session.mark_mine(&entry.name),
            };
            let event = replayed.map_err(|source| SnapshotError::Replay {
                index,
                name: entry.name.clone(),
                source,
            })?;
            if event.position() != entry.position {
                warn!(
                    "snapshot entry {} records '{}' at {}, pool has {}",
                    index,
                    entry.name,
                    entry.position,
                    event.position()
                );
            }
        }

        if session.my_counts() != &stored_counts {
            warn!(
                "stored my_counts {:?} disagree with replayed history {:?}; using replayed counts",
                self.my_counts,
                session.my_counts().to_map()
            );
        }

        Ok(session)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Write the snapshot to `path`. The file is written to a sibling temp
    /// file first and renamed into place, so readers never see a partial
    /// snapshot.
    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        let path_str = path.display().to_string();
        let json = self.to_json().map_err(|source| SnapshotError::Json {
            path: path_str.clone(),
            source,
        })?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|source| SnapshotError::Io {
            path: tmp.display().to_string(),
            source,
        })?;
        std::fs::rename(&tmp, path).map_err(|source| SnapshotError::Io {
            path: path_str.clone(),
            source,
        })?;

        info!("saved snapshot with {} picks to {}", self.history.len(), path_str);
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let path_str = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path_str.clone(),
            source,
        })?;
        let snapshot = Self::from_json(&text).map_err(|source| SnapshotError::Json {
            path: path_str.clone(),
            source,
        })?;
        info!("loaded snapshot with {} picks from {}", snapshot.history.len(), path_str);
        Ok(snapshot)
    }
}

impl DraftSession {
    /// Shorthand for `SessionSnapshot::capture(self)`.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DraftConfig;
    use crate::pool::Player;

    fn pool() -> PlayerPool {
        PlayerPool::new(
            "players.csv",
            vec![
                Player::new("John Doe", Position::RunningBack, 200.0),
                Player::new("My Guy", Position::WideReceiver, 180.0),
                Player::new("Other", Position::WideReceiver, 150.0),
            ],
        )
    }

    #[test]
    fn legacy_kind_spelling_is_accepted() {
        let json = r#"{
            "csv_path": "players.csv",
            "teams": 10,
            "starters": {"RB": 2, "WR": 2, "FLEX": 1},
            "bench": {"RB": 3},
            "weights": {"need": 1.0, "bench": 0.4, "blocked": 0.1},
            "top_n": 15,
            "history": [
                {"kind": "drafted", "name": "John Doe", "position": "RB"},
                {"kind": "mine", "name": "My Guy", "position": "WR"}
            ],
            "my_counts": {"WR": 1},
            "some_future_field": [1, 2, 3]
        }"#;
        let snapshot = SessionSnapshot::from_json(json).unwrap();
        assert_eq!(snapshot.history[0].kind, EventKind::LeagueDrafted);
        assert!(snapshot.saved_at.is_none());

        let session = snapshot.restore(pool()).unwrap();
        assert!(session.is_drafted("John Doe"));
        assert!(session.is_drafted("My Guy"));
        assert_eq!(session.my_counts().get(Position::WideReceiver), 1);
    }

    #[test]
    fn missing_optional_fields_take_defaults() {
        let snapshot = SessionSnapshot::from_json(r#"{"csv_path": "players.csv"}"#).unwrap();
        assert_eq!(snapshot.teams, 10);
        assert_eq!(snapshot.top_n, 15);
        assert!(snapshot.history.is_empty());
        let session = snapshot.restore(pool()).unwrap();
        assert_eq!(session.config(), &DraftConfig::default());
    }

    #[test]
    fn replay_failure_names_the_entry() {
        let json = r#"{
            "csv_path": "players.csv",
            "history": [
                {"kind": "league_drafted", "name": "John Doe", "position": "RB"},
                {"kind": "mine", "name": "John Doe", "position": "RB"}
            ]
        }"#;
        let err = SessionSnapshot::from_json(json)
            .unwrap()
            .restore(pool())
            .unwrap_err();
        match err {
            SnapshotError::Replay { index, name, source } => {
                assert_eq!(index, 1);
                assert_eq!(name, "John Doe");
                assert!(matches!(source, DraftError::AlreadyDrafted { .. }));
            }
            other => panic!("expected Replay error, got: {other}"),
        }
    }

    #[test]
    fn invalid_settings_are_rejected_on_restore() {
        let json = r#"{"csv_path": "players.csv", "starters": {"RB": -1}}"#;
        let err = SessionSnapshot::from_json(json)
            .unwrap()
            .restore(pool())
            .unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::Settings(DraftError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn replayed_counts_win_over_stored_counts() {
        let json = r#"{
            "csv_path": "players.csv",
            "history": [{"kind": "mine", "name": "My Guy", "position": "WR"}],
            "my_counts": {"WR": 5, "FLEX": 2}
        }"#;
        let session = SessionSnapshot::from_json(json)
            .unwrap()
            .restore(pool())
            .unwrap();
        assert_eq!(session.my_counts().get(Position::WideReceiver), 1);
        assert_eq!(session.my_counts().flex(), 0);
    }

    #[test]
    fn save_and_load_file() {
        let tmp = std::env::temp_dir().join("vorp_core_snapshot_save_load");
        let _ = std::fs::remove_dir_all(&tmp);
        std::fs::create_dir_all(&tmp).unwrap();
        let path = tmp.join("session.json");

        let mut session = DraftSession::new(pool(), DraftConfig::default());
        session.mark_league_drafted("John Doe").unwrap();
        session.mark_mine("Other").unwrap();
        let snapshot = session.snapshot();
        snapshot.save(&path).unwrap();

        assert!(!tmp.join("session.json.tmp").exists());
        let loaded = SessionSnapshot::load(&path).unwrap();
        assert_eq!(loaded, snapshot);

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("vorp_core_snapshot_missing/none.json");
        assert!(matches!(SessionSnapshot::load(&path), Err(SnapshotError::Io { .. })));
    }
}
