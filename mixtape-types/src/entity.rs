//! The per-user entity aggregate: a user owning playlists owning songs.
//!
//! Ownership is strictly tree-shaped, so the aggregate is plain owned
//! containers with no shared references. During a merge exactly one
//! `User` is alive at a time, which bounds peak memory to the largest
//! single user rather than the whole document.
//!
//! Wire representation is camelCase JSON (`userId`, `playlistId`,
//! `songId`). Any fields beyond the ids and the nested arrays are
//! ignored on deserialization and therefore absent from the re-emitted
//! document; the schema is intentionally minimal.

use crate::{PlaylistId, SongId, UserId};
use serde::{Deserialize, Serialize};

/// A single song. Leaf entity, equality by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub song_id: SongId,
}

impl Song {
    /// Creates a song with the given id.
    #[must_use]
    pub const fn new(song_id: SongId) -> Self {
        Self { song_id }
    }
}

/// An ordered collection of songs owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub playlist_id: PlaylistId,
    #[serde(default)]
    pub songs: Vec<Song>,
}

impl Playlist {
    /// Creates an empty playlist with the given id.
    #[must_use]
    pub fn new(playlist_id: PlaylistId) -> Self {
        Self {
            playlist_id,
            songs: Vec::new(),
        }
    }

    /// Creates a playlist pre-populated with songs, preserving order.
    #[must_use]
    pub fn with_songs(playlist_id: PlaylistId, song_ids: impl IntoIterator<Item = SongId>) -> Self {
        Self {
            playlist_id,
            songs: song_ids.into_iter().map(Song::new).collect(),
        }
    }

    /// Appends a song. Duplicate song ids are permitted and retained.
    pub fn add_song(&mut self, song: Song) {
        self.songs.push(song);
    }
}

/// One user and their playlists. The in-memory aggregate the merge
/// engine reconstructs, mutates, and serializes, one user at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: UserId,
    #[serde(default)]
    pub playlists: Vec<Playlist>,
}

impl User {
    /// Creates a user with no playlists.
    #[must_use]
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            playlists: Vec::new(),
        }
    }

    /// Appends a playlist at the end of the user's sequence.
    /// No uniqueness check: a duplicate playlist id is kept alongside
    /// the existing one.
    pub fn add_playlist(&mut self, playlist: Playlist) {
        self.playlists.push(playlist);
    }

    /// Removes the first playlist with the given id, keeping the
    /// relative order of the rest. Returns whether a playlist was
    /// removed; a missing id is not an error.
    pub fn remove_playlist(&mut self, playlist_id: PlaylistId) -> bool {
        match self.playlists.iter().position(|p| p.playlist_id == playlist_id) {
            Some(idx) => {
                self.playlists.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Returns the first playlist with the given id, if any.
    pub fn playlist_mut(&mut self, playlist_id: PlaylistId) -> Option<&mut Playlist> {
        self.playlists
            .iter_mut()
            .find(|p| p.playlist_id == playlist_id)
    }
}
