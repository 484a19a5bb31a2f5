//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Ord + core::hash::Hash + core::fmt::Debug + core::fmt::Display + From<u32>;

    /// Human-readable entity name used in not-found errors (e.g. "patient").
    const KIND: &'static str;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
