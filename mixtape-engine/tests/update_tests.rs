use mixtape_engine::{run_update, EngineError};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn sample_data() -> String {
    json!([
        {"userId": 1, "playlists": [{"playlistId": 11, "songs": [{"songId": 100}]}]},
        {"userId": 2, "playlists": [{"playlistId": 21, "songs": []}]}
    ])
    .to_string()
}

// ── Successful run ────────────────────────────────────────────────

#[test]
fn run_update_writes_output_next_to_change_log() {
    let dir = TempDir::new().unwrap();
    let data = write_file(dir.path(), "library.json", &sample_data());
    let changes = write_file(
        dir.path(),
        "changes.txt",
        "userId=1/playlistId=11/songId=101/action=ADD_SONG\n",
    );

    let output = run_update(&data, &changes).unwrap();

    assert_eq!(output.parent(), changes.parent());
    let name = output.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("changes_"), "got {name}");
    assert!(name.ends_with(".txt"), "got {name}");

    let merged: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(
        merged[0]["playlists"][0]["songs"],
        json!([{"songId": 100}, {"songId": 101}])
    );
}

#[test]
fn run_update_with_empty_change_log_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let data = write_file(dir.path(), "library.json", &sample_data());
    let changes = write_file(dir.path(), "changes.txt", "\n");

    let output = run_update(&data, &changes).unwrap();
    let merged: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let original: serde_json::Value = serde_json::from_str(&sample_data()).unwrap();
    assert_eq!(merged, original);
}

// ── Failure modes ─────────────────────────────────────────────────

#[test]
fn missing_data_file_fails_before_output_exists() {
    let dir = TempDir::new().unwrap();
    let changes = write_file(dir.path(), "changes.txt", "\n");

    let err = run_update(&dir.path().join("nope.json"), &changes).unwrap_err();
    assert!(matches!(err, EngineError::FileNotFound(_)), "got {err:?}");
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn malformed_change_log_fails_before_output_exists() {
    let dir = TempDir::new().unwrap();
    let data = write_file(dir.path(), "library.json", &sample_data());
    let changes = write_file(dir.path(), "changes.txt", "gibberish\n");

    let err = run_update(&data, &changes).unwrap_err();
    assert!(matches!(err, EngineError::ChangeLog(_)), "got {err:?}");
    // Only the two input files; no output was created.
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
}

#[test]
fn unknown_playlist_fails_the_run() {
    let dir = TempDir::new().unwrap();
    let data = write_file(dir.path(), "library.json", &sample_data());
    let changes = write_file(
        dir.path(),
        "changes.txt",
        "userId=1/playlistId=99/songId=5/action=ADD_SONG\n",
    );

    let err = run_update(&data, &changes).unwrap_err();
    assert!(matches!(err, EngineError::Apply(_)), "got {err:?}");
}
