//! Error types for the merge engine.

use mixtape_types::{PlaylistId, UserId};
use std::path::PathBuf;
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors raised while parsing the change log.
///
/// Any of these aborts the run before a single byte of output exists:
/// the change log is parsed in full before merging begins.
#[derive(Debug, Error)]
pub enum ChangeLogError {
    /// The line carries none of the recognized action keywords.
    #[error("line {line_no}: unrecognized action: {line}")]
    MalformedAction { line_no: usize, line: String },

    /// A recognized line whose field is missing, mis-keyed, or not an
    /// integer at its expected position.
    #[error("line {line_no}: malformed `{field}` field: {value}")]
    MalformedField {
        line_no: usize,
        field: &'static str,
        value: String,
    },

    /// Reading the change log failed.
    #[error("i/o error reading change log: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while applying a user's queued actions.
#[derive(Debug, Error)]
pub enum ApplyError {
    /// An `ADD_SONG` targeted a playlist the user does not have.
    /// Fails the whole run; there is no per-user skip.
    #[error("no playlist with id {playlist_id} for user {user_id}")]
    UnknownPlaylist {
        user_id: UserId,
        playlist_id: PlaylistId,
    },

    /// An action kind the applier does not handle. Unreachable while
    /// `ActionKind` stays a closed enum.
    #[error("unrecognized action kind: {0}")]
    UnrecognizedAction(String),
}

/// Top-level error for a merge run.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The change log could not be parsed.
    #[error("change log: {0}")]
    ChangeLog(#[from] ChangeLogError),

    /// A queued action could not be applied.
    #[error("applying actions: {0}")]
    Apply(#[from] ApplyError),

    /// The original document is not a valid array of users, or a user
    /// could not be serialized to the output.
    #[error("document error: {0}")]
    Document(#[from] serde_json::Error),

    /// A required input file does not exist.
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    /// Reading the document or writing the output failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
