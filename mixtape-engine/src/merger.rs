//! The streaming merge engine.
//!
//! Consumes the original document — a JSON array of user records — as a
//! forward-only stream, reconstructs one user aggregate at a time,
//! applies that user's queued actions, writes the merged user to the
//! output, and drops the aggregate before touching the next one. Peak
//! memory is O(largest single user), never O(document).
//!
//! serde_json does not expose a raw field-ordered token stream, so the
//! incremental walk is realized with a [`DeserializeSeed`] over the
//! top-level sequence: each array element is deserialized into a full
//! `User` and flushed before the next element is read. The document's
//! ids-before-children field ordering is subsumed by whole-element
//! deserialization; everything outside the id fields and the nested
//! arrays is dropped on re-emission (minimal schema, intentional).
//!
//! Application and output failures arising inside the serde visitor are
//! stashed on the sink and surfaced as typed [`EngineError`]s rather
//! than being flattened into `serde_json::Error`.

use crate::applicator::apply_actions;
use crate::error::{EngineError, EngineResult};
use mixtape_types::{ChangeBatch, User};
use serde::de::{self, DeserializeSeed, SeqAccess, Visitor};
use std::fmt;
use std::io::{Read, Write};
use tracing::debug;

/// Counters reported by a completed merge run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSummary {
    /// Users read from the document and written to the output.
    pub users: u64,
    /// Users that had at least one queued action applied.
    pub users_changed: u64,
}

/// One-shot merge of a change batch into a streamed document.
///
/// Construct a fresh merger per run; it is not reentrant and processes
/// exactly one document.
pub struct StreamingMerger<'a> {
    batch: &'a ChangeBatch,
}

impl<'a> StreamingMerger<'a> {
    /// Creates a merger over a parsed change batch.
    #[must_use]
    pub fn new(batch: &'a ChangeBatch) -> Self {
        Self { batch }
    }

    /// Streams the document from `reader`, merging queued actions into
    /// each user, and writes the updated document to `writer`.
    ///
    /// The output is flushed on success. On failure the partially
    /// written output is indeterminate and must be discarded by the
    /// caller; there is no per-user skip-and-continue.
    pub fn merge(&self, reader: impl Read, writer: impl Write) -> EngineResult<MergeSummary> {
        let mut sink = UserSink {
            batch: self.batch,
            out: writer,
            summary: MergeSummary::default(),
            failure: None,
        };
        let mut de = serde_json::Deserializer::from_reader(reader);
        match (UserArraySeed { sink: &mut sink }).deserialize(&mut de) {
            Ok(()) => {
                de.end()?;
                Ok(sink.summary)
            }
            Err(json_err) => match sink.failure.take() {
                Some(err) => Err(err),
                None => Err(EngineError::Document(json_err)),
            },
        }
    }
}

/// Receives users one at a time and emits them as array elements.
struct UserSink<'a, W: Write> {
    batch: &'a ChangeBatch,
    out: W,
    summary: MergeSummary,
    /// Typed error stashed when a failure has to cross the serde
    /// visitor boundary.
    failure: Option<EngineError>,
}

impl<W: Write> UserSink<'_, W> {
    fn begin(&mut self) -> EngineResult<()> {
        self.out.write_all(b"[")?;
        Ok(())
    }

    /// Applies the user's queued actions and writes the merged user,
    /// preceded by a separator for every element after the first.
    fn emit(&mut self, mut user: User) -> EngineResult<()> {
        let actions = self.batch.actions_for(user.user_id);
        if !actions.is_empty() {
            apply_actions(&mut user, actions)?;
            self.summary.users_changed += 1;
        }
        let lead: &[u8] = if self.summary.users == 0 { b"\n" } else { b",\n" };
        self.out.write_all(lead)?;
        serde_json::to_writer_pretty(&mut self.out, &user)?;
        self.summary.users += 1;
        debug!(user_id = %user.user_id, actions = actions.len(), "flushed user");
        Ok(())
    }

    fn finish(&mut self) -> EngineResult<()> {
        let close: &[u8] = if self.summary.users == 0 { b"]" } else { b"\n]" };
        self.out.write_all(close)?;
        self.out.flush()?;
        Ok(())
    }

    /// Records the typed error and returns the placeholder serde error
    /// that aborts deserialization.
    fn fail<E: de::Error>(&mut self, err: EngineError) -> E {
        self.failure = Some(err);
        E::custom("merge aborted")
    }
}

/// Drives deserialization of the top-level user array through the sink.
struct UserArraySeed<'s, 'a, W: Write> {
    sink: &'s mut UserSink<'a, W>,
}

impl<'de, W: Write> DeserializeSeed<'de> for UserArraySeed<'_, '_, W> {
    type Value = ();

    fn deserialize<D>(self, deserializer: D) -> Result<(), D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_seq(self)
    }
}

impl<'de, W: Write> Visitor<'de> for UserArraySeed<'_, '_, W> {
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an array of user records")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<(), A::Error>
    where
        A: SeqAccess<'de>,
    {
        let sink = self.sink;
        if let Err(err) = sink.begin() {
            return Err(sink.fail(err));
        }
        while let Some(user) = seq.next_element::<User>()? {
            if let Err(err) = sink.emit(user) {
                return Err(sink.fail(err));
            }
        }
        if let Err(err) = sink.finish() {
            return Err(sink.fail(err));
        }
        Ok(())
    }
}
