use mixtape_types::{ActionKind, ActionSpec, ChangeBatch, PlaylistId, SongId, UserId};
use pretty_assertions::assert_eq;

fn make_spec(kind: ActionKind, user_id: i64, playlist_id: i64, song_ids: &[i64]) -> ActionSpec {
    ActionSpec::new(
        kind,
        UserId::new(user_id),
        PlaylistId::new(playlist_id),
        song_ids.iter().copied().map(SongId::new).collect(),
    )
}

// ── ActionKind ────────────────────────────────────────────────────

#[test]
fn keywords_match_change_log_literals() {
    assert_eq!(ActionKind::AddSong.keyword(), "ADD_SONG");
    assert_eq!(ActionKind::AddPlaylist.keyword(), "ADD_PLAYLIST");
    assert_eq!(ActionKind::RemovePlaylist.keyword(), "REMOVE_PLAYLIST");
}

// ── ChangeBatch ───────────────────────────────────────────────────

#[test]
fn empty_batch_has_no_users() {
    let batch = ChangeBatch::new();
    assert!(batch.is_empty());
    assert_eq!(batch.user_count(), 0);
    assert!(batch.actions_for(UserId::new(1)).is_empty());
}

#[test]
fn push_preserves_per_user_order() {
    let mut batch = ChangeBatch::new();
    batch.push(make_spec(ActionKind::AddPlaylist, 1, 13, &[200]));
    batch.push(make_spec(ActionKind::RemovePlaylist, 2, 21, &[]));
    batch.push(make_spec(ActionKind::AddSong, 1, 13, &[201]));

    let user1 = batch.actions_for(UserId::new(1));
    assert_eq!(user1.len(), 2);
    assert_eq!(user1[0].kind, ActionKind::AddPlaylist);
    assert_eq!(user1[1].kind, ActionKind::AddSong);
    assert_eq!(batch.user_count(), 2);
}

#[test]
fn duplicate_actions_are_not_deduplicated() {
    let mut batch = ChangeBatch::new();
    let spec = make_spec(ActionKind::AddSong, 1, 11, &[102]);
    batch.push(spec.clone());
    batch.push(spec);
    assert_eq!(batch.actions_for(UserId::new(1)).len(), 2);
}
