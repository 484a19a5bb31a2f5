//! Registry building blocks shared by every domain.
//!
//! This crate contains **pure domain** primitives (no IO, no logging).

pub mod entity;
pub mod error;
pub mod id;
pub mod lifecycle;
pub mod registry;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::Sequence;
pub use lifecycle::Lifecycle;
pub use registry::Registry;
