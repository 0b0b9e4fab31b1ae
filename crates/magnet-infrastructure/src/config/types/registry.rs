//! Registry bootstrap configuration types

use serde::{Deserialize, Serialize};

/// Controls how linked bindings become the registry catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Accept a catalog without any binding
    ///
    /// An empty catalog usually means the crates declaring bindings were
    /// not linked, so bootstrap refuses it unless this is set.
    pub allow_empty: bool,

    /// Implementation names left out of the catalog
    pub disabled: Vec<String>,
}

impl RegistryConfig {
    /// Whether the named implementation is disabled
    pub fn is_disabled(&self, implementation: &str) -> bool {
        self.disabled.iter().any(|name| name == implementation)
    }
}
