// Recoverable draft errors surfaced to the command layer.

use thiserror::Error;

use crate::config::ConfigError;

/// Every failure the session API can report. None of them are fatal: the
/// caller reports the error and keeps the session running.
#[derive(Debug, Error)]
pub enum DraftError {
    #[error("unknown player: {name}")]
    UnknownPlayer { name: String },

    #[error("already drafted: {name}")]
    AlreadyDrafted { name: String },

    #[error("unknown position '{position}' (expected one of QB, RB, WR, TE, K, DST)")]
    UnknownPosition { position: String },

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
}
