//! The change-action model.
//!
//! An [`ActionSpec`] is one requested mutation decoded from a change-log
//! line. Specs are immutable once parsed; a [`ChangeBatch`] groups them
//! by owning user while preserving the order they appeared in the log,
//! because later actions may depend on earlier ones (an `ADD_PLAYLIST`
//! followed by an `ADD_SONG` into that same playlist must be applied in
//! that order against the in-memory aggregate).

use crate::{PlaylistId, SongId, UserId};
use std::collections::HashMap;

/// The closed set of supported mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Append songs to an existing playlist.
    AddSong,
    /// Append a new playlist with an initial set of songs.
    AddPlaylist,
    /// Remove the first playlist with a matching id.
    RemovePlaylist,
}

impl ActionKind {
    /// The literal keyword identifying this action in a change-log line.
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::AddSong => "ADD_SONG",
            Self::AddPlaylist => "ADD_PLAYLIST",
            Self::RemovePlaylist => "REMOVE_PLAYLIST",
        }
    }
}

/// One requested mutation against one user's aggregate.
///
/// `song_ids` is empty for [`ActionKind::RemovePlaylist`] and holds one
/// or more ids for the add actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSpec {
    pub kind: ActionKind,
    pub user_id: UserId,
    pub playlist_id: PlaylistId,
    pub song_ids: Vec<SongId>,
}

impl ActionSpec {
    /// Creates an action spec.
    #[must_use]
    pub fn new(
        kind: ActionKind,
        user_id: UserId,
        playlist_id: PlaylistId,
        song_ids: Vec<SongId>,
    ) -> Self {
        Self {
            kind,
            user_id,
            playlist_id,
            song_ids,
        }
    }
}

/// All parsed actions for one run, grouped by user.
///
/// The per-user lists preserve change-log file order; nothing is
/// reordered or deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeBatch {
    by_user: HashMap<UserId, Vec<ActionSpec>>,
}

impl ChangeBatch {
    /// Creates an empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an action at the end of its user's list.
    pub fn push(&mut self, spec: ActionSpec) {
        self.by_user.entry(spec.user_id).or_default().push(spec);
    }

    /// Returns the ordered actions queued for a user; empty when the
    /// user appears nowhere in the change log.
    #[must_use]
    pub fn actions_for(&self, user_id: UserId) -> &[ActionSpec] {
        self.by_user.get(&user_id).map_or(&[], Vec::as_slice)
    }

    /// Whether the batch contains no actions at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_user.is_empty()
    }

    /// Number of distinct users with queued actions.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.by_user.len()
    }
}
