//! # Domain Identity Newtypes
//!
//! Newtype wrappers for the platform's identifiers. They serialize as the
//! bare UUID so the wire format stays flat, but the type system keeps the
//! namespaces apart.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub Uuid);

/// Unique identifier for a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewId(pub Uuid);

/// Unique identifier for an account (consumer, promoter, reviewer or admin).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub Uuid);

macro_rules! uuid_newtype {
    ($ty:ident, $prefix:literal) => {
        impl $ty {
            /// Generate a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Access the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $ty {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $ty {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, ":{}"), self.0)
            }
        }
    };
}

uuid_newtype!(EventId, "event");
uuid_newtype!(ReviewId, "review");
uuid_newtype!(AccountId, "account");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_namespace_prefix() {
        let raw = Uuid::nil();
        assert_eq!(
            EventId(raw).to_string(),
            "event:00000000-0000-0000-0000-000000000000"
        );
        assert!(ReviewId(raw).to_string().starts_with("review:"));
        assert!(AccountId(raw).to_string().starts_with("account:"));
    }

    #[test]
    fn new_ids_are_distinct() {
        assert_ne!(EventId::new(), EventId::new());
    }

    #[test]
    fn serializes_as_bare_uuid() {
        let id = AccountId(Uuid::nil());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"00000000-0000-0000-0000-000000000000\"");
        let parsed: AccountId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
