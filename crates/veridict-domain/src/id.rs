//! Identifier newtypes backed by UUIDv7
//!
//! UUIDv7 provides chronological sortability, 128-bit uniqueness, and
//! coordination-free generation: extraction upstream can mint identifiers
//! without talking to anything.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u128);

        impl $name {
            /// Generate a new UUIDv7-based identifier
            pub fn new() -> Self {
                Self(uuid::Uuid::now_v7().as_u128())
            }

            /// Create an identifier from a raw u128 value (test fixtures,
            /// deserialization)
            pub fn from_value(value: u128) -> Self {
                Self(value)
            }

            /// Parse an identifier from its UUID string form
            pub fn from_string(s: &str) -> Result<Self, String> {
                uuid::Uuid::parse_str(s)
                    .map(|u| Self(u.as_u128()))
                    .map_err(|e| format!("Invalid UUID string: {}", e))
            }

            /// Get the raw u128 value
            pub fn value(&self) -> u128 {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", uuid::Uuid::from_u128(self.0))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(&uuid::Uuid::from_u128(self.0))
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Self::from_string(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

define_id! {
    /// Unique identifier for an atomic claim
    ClaimId
}

define_id! {
    /// Unique identifier for an evidence item
    ///
    /// Evidence identifiers are what debate prompts expose to the model and
    /// what challenge/reconcile responses must cite; the grounding check in
    /// the debate engine strips citations that do not resolve to a known id.
    EvidenceId
}

define_id! {
    /// Unique identifier for a claim boundary (evidence cluster)
    BoundaryId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_ordering() {
        let a = ClaimId::from_value(1000);
        let b = ClaimId::from_value(2000);
        assert!(a < b);
    }

    #[test]
    fn test_id_chronological() {
        let a = EvidenceId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = EvidenceId::new();
        assert!(a < b, "Earlier UUIDv7 should be less than later UUIDv7");
    }

    #[test]
    fn test_id_display_and_parse() {
        let id = EvidenceId::new();
        let s = id.to_string();
        assert_eq!(s.len(), 36);
        assert_eq!(EvidenceId::from_string(&s).unwrap(), id);
    }

    #[test]
    fn test_id_invalid_string() {
        assert!(ClaimId::from_string("not-a-uuid").is_err());
        assert!(BoundaryId::from_string("").is_err());
    }

    #[test]
    fn test_id_serde_string_form() {
        let id = ClaimId::from_value(42);
        let json = serde_json::to_string(&id).unwrap();
        assert!(json.starts_with('"'));
        let back: ClaimId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: identifier ordering matches u128 ordering
        #[test]
        fn test_id_ordering_property(a: u128, b: u128) {
            let id_a = ClaimId::from_value(a);
            let id_b = ClaimId::from_value(b);
            prop_assert_eq!(id_a < id_b, a < b);
            prop_assert_eq!(id_a == id_b, a == b);
        }

        /// Property: round-trip through the string form preserves the id
        #[test]
        fn test_id_string_roundtrip(value: u128) {
            let id = EvidenceId::from_value(value);
            let parsed = EvidenceId::from_string(&id.to_string());
            prop_assert_eq!(parsed, Ok(id));
        }
    }
}
