//! # Magnet Domain
//!
//! Core types shared by every layer of the Magnet registry:
//!
//! - [`value_objects`]: `Range`, `IndexEntry` and `Index`, the precomputed
//!   description of which slice of the factory array serves a type
//! - [`ports`]: the `Factory` port, its type-erased `FactoryBinding` and the
//!   opaque `DependencyScope` handed to every factory
//! - [`error`]: the error taxonomy of registration and lookup
//!
//! This crate performs no I/O and holds no global state.

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::{DependencyScope, Factory, FactoryBinding, FactoryError, FactoryResult, Instance};
pub use value_objects::{Index, IndexEntry, Range};
