//! Application Layer - Magnet
//!
//! Turns a precomputed factory array and type index into instances.
//!
//! ## Components
//!
//! - `registry::ImplementationRegistry`: `register` once, then answer
//!   `get_many`, `get_single` and `require_single` queries
//! - `registry::global`: the process-wide registry instance
//! - `bindings::BINDINGS`: binding declarations collected at link time
//! - `bindings::IndexBuilder`: lays declarations out into a factory array
//!   and an index the registry accepts
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `magnet-domain`: ranges, index entries, factory ports and errors
//! - `tracing`, `once_cell` and `linkme`

pub mod bindings;
pub mod registry;

pub use bindings::{
    BINDINGS, BindingCatalog, BindingDescriptor, BindingEntry, IndexBuilder, list_bindings,
};
pub use registry::{ImplementationRegistry, global};
