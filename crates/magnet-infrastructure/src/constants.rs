//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Domain-specific constants are defined in `magnet_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "magnet.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "magnet";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "MAGNET";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "MAGNET_LOG";

/// File stem of rolling log files when the configured path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "magnet";
