//! Typed row identifiers.
//!
//! Every table keys on a 64-bit integer. Wrapping each in its own newtype
//! keeps a `PostId` from being passed where a `ThreadId` is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! row_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        #[cfg_attr(feature = "sqlx-types", derive(sqlx::Type))]
        #[cfg_attr(feature = "sqlx-types", sqlx(transparent))]
        pub struct $name(pub i64);

        impl $name {
            /// Raw integer value as stored in the database.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

row_id!(
    /// Forum user.
    UserId
);
row_id!(
    /// Category grouping threads.
    CategoryId
);
row_id!(
    /// Thread inside a category.
    ThreadId
);
row_id!(
    /// Single post (message) inside a thread.
    PostId
);
