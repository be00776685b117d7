//! The end-to-end update run: parse the change log, stream the
//! document through the merger, and produce the output file.

use crate::changelog::parse_change_log;
use crate::error::{EngineError, EngineResult};
use crate::merger::StreamingMerger;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

/// Merges the change log at `change_file` into the document at
/// `data_file`, writing a new document next to the change log.
///
/// The change log is parsed in full before any output exists, so a
/// malformed log never leaves a file behind. Returns the path of the
/// written document. On a merge failure the partially written output is
/// left in an indeterminate state; discard it.
pub fn run_update(data_file: &Path, change_file: &Path) -> EngineResult<PathBuf> {
    for path in [data_file, change_file] {
        if !path.exists() {
            return Err(EngineError::FileNotFound(path.to_path_buf()));
        }
    }

    let changes = File::open(change_file)?;
    let batch = parse_change_log(BufReader::new(changes))?;

    let output_path = derive_output_path(change_file, unix_millis());
    let reader = BufReader::new(File::open(data_file)?);
    let writer = BufWriter::new(File::create(&output_path)?);

    let summary = StreamingMerger::new(&batch).merge(reader, writer)?;
    info!(
        users = summary.users,
        users_changed = summary.users_changed,
        output = %output_path.display(),
        "update complete"
    );
    Ok(output_path)
}

/// Derives the output filename from the change log's: the stem plus a
/// millisecond timestamp, keeping the extension.
fn derive_output_path(change_file: &Path, timestamp_millis: u128) -> PathBuf {
    let stem = change_file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "changes".to_string());
    let name = match change_file.extension() {
        Some(ext) => format!("{stem}_{timestamp_millis}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{timestamp_millis}"),
    };
    change_file.with_file_name(name)
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before Unix epoch")
        .as_millis()
}
