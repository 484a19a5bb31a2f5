//! Registry-scoped sequential identifiers.

use serde::{Deserialize, Serialize};

/// Per-registry id counter.
///
/// Each registry owns its own sequences, so two registries never share
/// numbering and can be exercised in isolation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    next: u32,
}

impl Sequence {
    /// Sequence whose first issued value is `first`.
    pub fn starting_at(first: u32) -> Self {
        Self { next: first }
    }

    /// Returns the current value and moves past it.
    pub fn advance(&mut self) -> u32 {
        let value = self.next;
        self.next = self
            .next
            .checked_add(1)
            .expect("id sequence exhausted u32 range");
        value
    }

    /// Value the next call to [`Sequence::advance`] will return.
    pub fn peek(&self) -> u32 {
        self.next
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

/// Declares a strongly-typed sequential identifier.
///
/// The generated type is a transparent `u32` newtype with `Display`,
/// `FromStr` (failures map to [`DomainError::InvalidId`](crate::DomainError))
/// and lossless conversions to and from `u32`.
#[macro_export]
macro_rules! define_id {
    ($(#[$meta:meta])* $t:ident, $name:literal) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Copy,
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $t(u32);

        impl $t {
            pub const fn new(value: u32) -> Self {
                Self(value)
            }

            pub const fn value(self) -> u32 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<u32> for $t {
            fn from(value: u32) -> Self {
                Self(value)
            }
        }

        impl From<$t> for u32 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl core::str::FromStr for $t {
            type Err = $crate::DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<u32>()
                    .map(Self)
                    .map_err(|e| $crate::DomainError::invalid_id(format!("{}: {}", $name, e)))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DomainError;
    use proptest::prelude::*;

    define_id!(WidgetId, "WidgetId");

    #[test]
    fn default_sequence_is_one_based() {
        let mut seq = Sequence::default();
        assert_eq!(seq.advance(), 1);
        assert_eq!(seq.advance(), 2);
        assert_eq!(seq.peek(), 3);
    }

    #[test]
    fn sequence_can_start_at_custom_offset() {
        let mut seq = Sequence::starting_at(1001);
        assert_eq!(seq.advance(), 1001);
        assert_eq!(seq.peek(), 1002);
    }

    #[test]
    fn id_parses_and_rejects_garbage() {
        assert_eq!(" 42 ".parse::<WidgetId>().unwrap(), WidgetId::new(42));
        match "abc".parse::<WidgetId>() {
            Err(DomainError::InvalidId(msg)) => assert!(msg.starts_with("WidgetId")),
            other => panic!("expected InvalidId, got {other:?}"),
        }
        assert!("-1".parse::<WidgetId>().is_err());
    }

    #[test]
    fn id_serializes_as_bare_number() {
        let json = serde_json::to_string(&WidgetId::new(7)).unwrap();
        assert_eq!(json, "7");
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: issued values are strictly increasing and never repeat.
        #[test]
        fn advance_is_strictly_increasing(first in 0u32..1_000_000, n in 1usize..200) {
            let mut seq = Sequence::starting_at(first);
            let mut previous: Option<u32> = None;
            for _ in 0..n {
                let v = seq.advance();
                if let Some(p) = previous {
                    prop_assert!(v > p);
                }
                previous = Some(v);
            }
        }
    }
}
