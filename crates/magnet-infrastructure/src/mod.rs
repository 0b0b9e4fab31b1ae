//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns around the Magnet registry.
//!
//! ## Module Categories
//!
//! ### Configuration & DI
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment-backed configuration (defaults, TOML, `MAGNET_*` env) |
//! | [`di`] | Builds the binding catalog and installs it into the registry |
//! | [`constants`] | Centralized configuration constants |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |

pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod logging;

// Re-export commonly used types
pub use config::{AppConfig, ConfigLoader, LoggingConfig, RegistryConfig};
pub use di::{bootstrap, build_catalog, install};
pub use error_ext::ErrorContext;
