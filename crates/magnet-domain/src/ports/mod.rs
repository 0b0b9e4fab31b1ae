//! Domain ports
//!
//! Abstractions the registry consumes without knowing their concrete types:
//! factories that construct implementations and the dependency scope those
//! factories receive.

pub mod factory;
pub mod scope;

pub use factory::{Factory, FactoryBinding, FactoryError, FactoryResult, Instance};
pub use scope::DependencyScope;
