//! Branded ID newtypes for type safety.
//!
//! The two identities in the system are deliberately distinct types so a
//! stable client identity can never be passed where a per-socket connection
//! identity is expected (and vice versa):
//!
//! - [`ClientId`] — supplied by the browser at connect time, stable across
//!   reconnects. Never generated server-side.
//! - [`ConnectionId`] — assigned by the transport layer when a socket is
//!   accepted, unique per physical connection, never reused.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! branded_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create from an existing string value.
            #[must_use]
            pub fn from_string(s: String) -> Self {
                Self(s)
            }

            /// Return the inner string as a slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume self and return the inner `String`.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;
            fn deref(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

branded_id! {
    /// Stable logical identity of a browser session, supplied by the client.
    ClientId
}

branded_id! {
    /// Transport-assigned identity of one physical duplex connection.
    ConnectionId
}

impl ClientId {
    /// Whether the supplied identifier is usable (non-empty after trimming).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.0.trim().is_empty()
    }
}

impl ConnectionId {
    /// Generate a fresh connection ID (`conn_` + UUID v7, time-ordered).
    ///
    /// UUID v7 keeps ids unique across the process lifetime and sortable by
    /// accept time, which makes the registry tie-break stable.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("conn_{}", Uuid::now_v7()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
