//! Implementation registry
//!
//! ```text
//! caller ──► get_many::<T>(qualifier, scope)
//!               │
//!               ▼
//!          Index::resolve(TypeId<T>, qualifier) ──► start..end
//!               │
//!               ▼
//!          factories[start..end].create(scope) ──► Vec<Arc<T>>
//! ```
//!
//! `get_single` and `require_single` delegate to `get_many` and apply their
//! cardinality contract to the result.

pub mod global;
pub mod implementation;

pub use global::global;
pub use implementation::ImplementationRegistry;
