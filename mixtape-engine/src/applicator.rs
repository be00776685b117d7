//! Action application.
//!
//! Applies one user's queued actions, strictly in change-log order,
//! against the freshly reconstructed aggregate. Ordering matters: an
//! `ADD_PLAYLIST` followed by an `ADD_SONG` into that same playlist
//! within one batch only works because the full list runs against the
//! in-memory aggregate before the user is serialized.

use crate::error::ApplyError;
use mixtape_types::{ActionKind, ActionSpec, Playlist, Song, User};
use tracing::debug;

/// Applies the ordered action list to the user, mutating it in place.
///
/// Fails fast on the first inconsistent action; the caller treats that
/// as fatal for the whole run. An empty list leaves the user untouched.
pub fn apply_actions(user: &mut User, actions: &[ActionSpec]) -> Result<(), ApplyError> {
    for action in actions {
        apply_one(user, action)?;
    }
    Ok(())
}

fn apply_one(user: &mut User, action: &ActionSpec) -> Result<(), ApplyError> {
    match action.kind {
        ActionKind::RemovePlaylist => {
            // Missing id is a no-op, not an error.
            let removed = user.remove_playlist(action.playlist_id);
            debug!(
                user_id = %user.user_id,
                playlist_id = %action.playlist_id,
                removed,
                "remove playlist"
            );
        }
        ActionKind::AddPlaylist => {
            // Duplicate playlist ids are permitted; both are retained.
            user.add_playlist(Playlist::with_songs(
                action.playlist_id,
                action.song_ids.iter().copied(),
            ));
            debug!(
                user_id = %user.user_id,
                playlist_id = %action.playlist_id,
                songs = action.song_ids.len(),
                "add playlist"
            );
        }
        ActionKind::AddSong => {
            let user_id = user.user_id;
            let playlist = user.playlist_mut(action.playlist_id).ok_or(
                ApplyError::UnknownPlaylist {
                    user_id,
                    playlist_id: action.playlist_id,
                },
            )?;
            for song_id in &action.song_ids {
                playlist.add_song(Song::new(*song_id));
            }
            debug!(
                user_id = %user_id,
                playlist_id = %action.playlist_id,
                songs = action.song_ids.len(),
                "add songs"
            );
        }
    }
    Ok(())
}
