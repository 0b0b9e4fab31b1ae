//! Main application configuration

use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::registry::RegistryConfig;

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Registry bootstrap configuration
    #[serde(default)]
    pub registry: RegistryConfig,
}
