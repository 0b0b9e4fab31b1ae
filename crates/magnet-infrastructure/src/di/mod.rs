//! Registry bootstrap
//!
//! ```text
//! BINDINGS (linkme)  ──►  build_catalog(&RegistryConfig)  ──►  BindingCatalog
//!                                                                   │
//!                                  install(global(), catalog)  ◄────┘
//! ```

pub mod bootstrap;

pub use bootstrap::{bootstrap, build_catalog, install};
