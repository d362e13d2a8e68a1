//! Strongly-typed identifiers for domain entities
//!
//! Using newtype wrappers around UUIDs provides type safety and prevents
//! accidental mixing of client and record identifiers. On the wire and in
//! the store an identifier is its bare hyphenated UUID; the prefixed form
//! is only used for display in logs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates a new time-ordered identifier (v7)
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates from an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Returns the storage key (bare hyphenated UUID)
            pub fn key(&self) -> String {
                self.0.hyphenated().to_string()
            }

            /// Returns the identifier prefix for display
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid_str = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Ok(Self(Uuid::parse_str(uuid_str)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

define_id!(ClientId, "CLI");
define_id!(RecordId, "REC");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_id_display() {
        let id = ClientId::new();
        assert!(id.to_string().starts_with("CLI-"));
    }

    #[test]
    fn test_id_parsing_accepts_prefixed_and_bare() {
        let original = RecordId::new();
        let prefixed: RecordId = original.to_string().parse().unwrap();
        let bare: RecordId = original.key().parse().unwrap();
        assert_eq!(original, prefixed);
        assert_eq!(original, bare);
    }

    #[test]
    fn test_key_is_bare_uuid() {
        let uuid = Uuid::new_v4();
        let id = ClientId::from(uuid);
        assert_eq!(id.key(), uuid.to_string());
    }

    #[test]
    fn test_serializes_transparently() {
        let id = ClientId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.key()));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!("not-an-id".parse::<ClientId>().is_err());
    }
}
