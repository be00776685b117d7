//! Identifier types used throughout the Mixtape engine.
//!
//! Plain integer newtypes matching the ids carried by the library
//! document and the change log. The wrappers exist so a playlist id can
//! never be handed to a function expecting a user id.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates an id from a raw integer.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the underlying integer.
            #[must_use]
            pub const fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

id_type! {
    /// Unique identifier for a user in the library document.
    UserId
}

id_type! {
    /// Identifier for a playlist within a user. Uniqueness is not
    /// enforced by the engine; the document owner is responsible for it.
    PlaylistId
}

id_type! {
    /// Identifier for a song within a playlist.
    SongId
}
