//! Core type definitions for the Mixtape batch updater.
//!
//! This crate defines the types shared by the engine and the CLI:
//! - User/Playlist/Song identifiers (integer newtypes)
//! - The per-user entity aggregate with its mutation operations
//! - Change actions and the per-user change batch
//!
//! Parsing of the change log and the streaming merge itself live in
//! `mixtape-engine`, not here.

mod action;
mod entity;
mod ids;

pub use action::{ActionKind, ActionSpec, ChangeBatch};
pub use entity::{Playlist, Song, User};
pub use ids::{PlaylistId, SongId, UserId};
