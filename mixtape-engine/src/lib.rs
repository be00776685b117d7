//! Streaming merge engine for the Mixtape batch updater.
//!
//! Takes a large library document (a JSON array of users, each with
//! playlists of songs) plus a line-oriented change log, and produces an
//! updated document without ever holding more than one user in memory.
//!
//! # Components
//!
//! - **changelog**: parses the change log into per-user action lists
//! - **applicator**: applies one user's actions against its aggregate
//! - **merger**: streams the document, merging each user as it passes
//! - **update**: the file-to-file run tying the pieces together
//!
//! # Example
//!
//! ```
//! use mixtape_engine::{parse_change_log, StreamingMerger};
//! use std::io::Cursor;
//!
//! let batch = parse_change_log(Cursor::new(
//!     "userId=1/playlistId=7/songId=42/action=ADD_PLAYLIST\n",
//! ))
//! .unwrap();
//!
//! let doc = br#"[{"userId": 1, "playlists": []}]"#;
//! let mut out = Vec::new();
//! let summary = StreamingMerger::new(&batch)
//!     .merge(Cursor::new(doc), &mut out)
//!     .unwrap();
//! assert_eq!(summary.users_changed, 1);
//! ```

mod applicator;
mod changelog;
mod error;
mod merger;
mod update;

pub use applicator::apply_actions;
pub use changelog::parse_change_log;
pub use error::{ApplyError, ChangeLogError, EngineError, EngineResult};
pub use merger::{MergeSummary, StreamingMerger};
pub use update::run_update;
