//! Configuration
//!
//! Typed configuration sections and the loader merging defaults, the TOML
//! file and `MAGNET_*` environment variables.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, LoggingConfig, RegistryConfig};
