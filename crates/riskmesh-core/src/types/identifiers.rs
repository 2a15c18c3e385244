//! Numeric ID types for catalog records.
//!
//! Each ID wraps the raw `u64` used on the wire so that an `EventId` cannot
//! be passed where a `RiskId` is expected. All three serialize transparently.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Create a new ID from its raw value.
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Get the raw value.
            pub const fn get(self) -> u64 {
                self.0
            }

            /// Record kind this ID refers to (`"event"`, `"risk"`, `"mitigation"`).
            pub const fn label() -> &'static str {
                $label
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{} {}", $label, self.0)
            }
        }
    };
}

define_id!(
    /// Event identifier, unique within a catalog.
    EventId,
    "event"
);

define_id!(
    /// Risk identifier, unique within a catalog.
    RiskId,
    "risk"
);

define_id!(
    /// Mitigation identifier, unique within a catalog.
    MitigationId,
    "mitigation"
);
