//! Error handling types

use thiserror::Error;

use crate::constants::DEFAULT_QUALIFIER_LABEL;
use crate::ports::FactoryError;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Magnet registry
#[derive(Error, Debug)]
pub enum Error {
    /// A single required implementation is not bound
    #[error("Missing binding: no implementation of {type_name} for qualifier {}", qualifier_label(.qualifier))]
    MissingBinding {
        /// Name of the requested type
        type_name: String,
        /// Requested qualifier, `None` for the default lookup
        qualifier: Option<String>,
    },

    /// A single-cardinality lookup matched more than one implementation
    #[error(
        "Multiple bindings: {count} implementations of {type_name} match qualifier {}, expected at most one",
        qualifier_label(.qualifier)
    )]
    MultipleBindings {
        /// Name of the requested type
        type_name: String,
        /// Requested qualifier, `None` for the default lookup
        qualifier: Option<String>,
        /// Number of matching implementations
        count: usize,
    },

    /// Failure raised by a factory while constructing its instance
    #[error(transparent)]
    Factory(FactoryError),

    /// The registry was queried before `register` completed
    #[error("Implementation registry is not registered yet")]
    NotRegistered,

    /// `register` was called on an already registered registry
    #[error("Implementation registry is already registered")]
    AlreadyRegistered,

    /// The factory array and index disagree
    #[error("Invalid index: {message}")]
    InvalidIndex {
        /// Description of the inconsistency
        message: String,
    },

    /// A factory slot produced an instance of another type
    #[error("Type mismatch at slot {slot}: expected {expected}, factory produces {actual}")]
    TypeMismatch {
        /// Requested type
        expected: String,
        /// Type declared by the factory in the slot
        actual: String,
        /// Offset of the slot in the factory array
        slot: usize,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

fn qualifier_label(qualifier: &Option<String>) -> String {
    match qualifier {
        Some(q) => format!("'{q}'"),
        None => DEFAULT_QUALIFIER_LABEL.to_string(),
    }
}

// Lookup error creation methods
impl Error {
    /// Create a missing binding error
    pub fn missing_binding<S: Into<String>>(type_name: S, qualifier: Option<&str>) -> Self {
        Self::MissingBinding {
            type_name: type_name.into(),
            qualifier: qualifier.map(str::to_string),
        }
    }

    /// Create a multiple bindings error
    pub fn multiple_bindings<S: Into<String>>(
        type_name: S,
        qualifier: Option<&str>,
        count: usize,
    ) -> Self {
        Self::MultipleBindings {
            type_name: type_name.into(),
            qualifier: qualifier.map(str::to_string),
            count,
        }
    }

    /// Create an invalid index error
    pub fn invalid_index<S: Into<String>>(message: S) -> Self {
        Self::InvalidIndex {
            message: message.into(),
        }
    }
}

// Configuration and I/O error creation methods
impl Error {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn config_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
