//! Binding declarations
//!
//! Bindings are declared next to the implementations they construct and
//! collected at link time with `linkme`, so the catalog is complete before
//! `main` runs and no registration call has to be written by hand.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Binding Registration Flow                  │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  1. Implementation:   #[linkme::distributed_slice(BINDINGS)]    │
//! │                       static ENTRY: BindingEntry = ...          │
//! │                              ↓                                  │
//! │  2. Builder:          IndexBuilder::bind_entry(&ENTRY)          │
//! │                              ↓                                  │
//! │  3. Catalog:          factories + Index (contiguous ranges)     │
//! │                              ↓                                  │
//! │  4. Registry:         ImplementationRegistry::register(..)      │
//! │                                                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use magnet_application::bindings::{BindingEntry, BINDINGS};
//! use magnet_domain::ports::FactoryBinding;
//!
//! #[linkme::distributed_slice(BINDINGS)]
//! static SMTP_MAILER: BindingEntry = BindingEntry {
//!     implementation: "smtp",
//!     qualifier: "outbound",
//!     factory: || FactoryBinding::new::<dyn Mailer, _>(SmtpMailerFactory),
//! };
//! ```

pub mod builder;

pub use builder::{BindingCatalog, BindingDescriptor, IndexBuilder};

use magnet_domain::ports::FactoryBinding;

/// Declaration of one implementation bound to a type
pub struct BindingEntry {
    /// Implementation name, unique among bindings (e.g., "smtp")
    pub implementation: &'static str,
    /// Qualifier group, empty for the default group
    pub qualifier: &'static str,
    /// Creates the erased factory; the factory decides the bound type
    pub factory: fn() -> FactoryBinding,
}

// Auto-collection via linkme distributed slices - implementations submit entries at compile time
#[linkme::distributed_slice]
pub static BINDINGS: [BindingEntry] = [..];

/// List all linked bindings
///
/// Returns `(type name, qualifier, implementation)` tuples sorted in that
/// order. Useful for diagnostics and startup reports.
pub fn list_bindings() -> Vec<(&'static str, &'static str, &'static str)> {
    let mut bindings: Vec<_> = BINDINGS
        .iter()
        .map(|entry| ((entry.factory)().type_name(), entry.qualifier, entry.implementation))
        .collect();
    bindings.sort_unstable();
    bindings
}
