//! Value objects
//!
//! Immutable descriptions of where a type's factories live in the factory
//! array.

pub mod index;
pub mod range;

pub use index::{Index, IndexEntry};
pub use range::{Range, normalize_qualifier};
