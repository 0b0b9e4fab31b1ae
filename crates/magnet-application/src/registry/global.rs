//! The process-wide implementation registry

use crate::registry::implementation::ImplementationRegistry;

static GLOBAL_REGISTRY: ImplementationRegistry = ImplementationRegistry::new();

/// Provides a reference to the process-wide registry
///
/// The registry starts unregistered. Call
/// [`ImplementationRegistry::register`] once during startup, before any
/// thread queries it; every query afterwards reads immutable state.
pub fn global() -> &'static ImplementationRegistry {
    &GLOBAL_REGISTRY
}
