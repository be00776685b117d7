//! Change-log parsing.
//!
//! The change log is line-oriented text. Each non-empty line describes
//! one action as slash-delimited `key=value` pairs, classified by the
//! literal keyword `ADD_SONG`, `ADD_PLAYLIST`, or `REMOVE_PLAYLIST`
//! appearing anywhere in the line:
//!
//! ```text
//! userId=1/playlistId=11/songId=102/action=ADD_SONG
//! userId=1/playlistId=13/songId=200,201/action=ADD_PLAYLIST
//! userId=2/playlistId=21/action=REMOVE_PLAYLIST
//! ```
//!
//! The `songId` value of the add actions holds one or more
//! comma-separated ids. Lines are processed in file order and the
//! resulting per-user lists preserve that order; the full log is parsed
//! before any merging starts, so a malformed line aborts the run before
//! output exists.

use crate::error::ChangeLogError;
use mixtape_types::{ActionKind, ActionSpec, ChangeBatch, PlaylistId, SongId, UserId};
use std::io::BufRead;
use std::str::FromStr;

/// Parses a change log into a batch of actions grouped by user.
pub fn parse_change_log(reader: impl BufRead) -> Result<ChangeBatch, ChangeLogError> {
    let mut batch = ChangeBatch::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        batch.push(parse_line(&line, line_no)?);
    }
    Ok(batch)
}

/// Classifies one line by keyword and decodes it per the kind's field
/// template.
fn parse_line(line: &str, line_no: usize) -> Result<ActionSpec, ChangeLogError> {
    let kind = classify(line).ok_or_else(|| ChangeLogError::MalformedAction {
        line_no,
        line: line.to_string(),
    })?;

    let mut fields = line.trim().split('/');
    let user_id: UserId = parse_field(fields.next(), "userId", line_no)?;
    let playlist_id: PlaylistId = parse_field(fields.next(), "playlistId", line_no)?;
    let song_ids = match kind {
        ActionKind::RemovePlaylist => Vec::new(),
        ActionKind::AddSong | ActionKind::AddPlaylist => {
            parse_song_ids(fields.next(), line_no)?
        }
    };

    Ok(ActionSpec::new(kind, user_id, playlist_id, song_ids))
}

fn classify(line: &str) -> Option<ActionKind> {
    [
        ActionKind::AddSong,
        ActionKind::AddPlaylist,
        ActionKind::RemovePlaylist,
    ]
    .into_iter()
    .find(|kind| line.contains(kind.keyword()))
}

/// Decodes a positional `key=value` pair, requiring the expected key.
fn parse_field<T: FromStr>(
    part: Option<&str>,
    field: &'static str,
    line_no: usize,
) -> Result<T, ChangeLogError> {
    let malformed = |value: &str| ChangeLogError::MalformedField {
        line_no,
        field,
        value: value.to_string(),
    };
    let part = part.ok_or_else(|| malformed("<missing>"))?;
    let value = part
        .strip_prefix(field)
        .and_then(|rest| rest.strip_prefix('='))
        .ok_or_else(|| malformed(part))?;
    value.parse().map_err(|_| malformed(value))
}

/// Decodes the comma-separated `songId=` value; one bad id fails the
/// whole line.
fn parse_song_ids(part: Option<&str>, line_no: usize) -> Result<Vec<SongId>, ChangeLogError> {
    let raw: String = parse_field(part, "songId", line_no)?;
    raw.split(',')
        .map(|id| {
            id.parse().map_err(|_| ChangeLogError::MalformedField {
                line_no,
                field: "songId",
                value: id.to_string(),
            })
        })
        .collect()
}
