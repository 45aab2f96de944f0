//! Error types for tablekit
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! The definition-related variants form one family: see
//! [`Error::is_invalid_definition`].

use thiserror::Error;

/// Result type alias for tablekit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for contract dispatch and model assembly
#[derive(Debug, Error)]
pub enum Error {
    /// Contract is empty, malformed, or misses an entry the dependency
    /// closure requires
    #[error("Invalid contract: {0}")]
    InvalidContract(String),

    /// A definition is unusable for a reason not covered by a narrower variant
    #[error("Invalid definition: {0}")]
    InvalidDefinition(String),

    /// A definition name was registered twice while the registry is strict
    #[error("Definition '{name}' is already registered")]
    DefinitionNameConflict {
        /// Conflicting definition name
        name: String,
    },

    /// A contract entry has neither a registered definition nor an inline model
    #[error("Definition '{name}' not found (registered: {registered:?})")]
    DefinitionNotFound {
        /// Requested definition name
        name: String,
        /// Names that were registered at lookup time
        registered: Vec<String>,
    },

    /// Declared dependencies loop back on themselves
    #[error("Cyclic dependency: {}", path.join(" -> "))]
    CyclicDependency {
        /// Names along the cycle, first and last entries are equal
        path: Vec<String>,
    },

    /// Configuration could not be read, parsed or written
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Build an [`Error::InvalidContract`]
    pub fn invalid_contract(msg: impl Into<String>) -> Self {
        Error::InvalidContract(msg.into())
    }

    /// Build an [`Error::InvalidDefinition`]
    pub fn invalid_definition(msg: impl Into<String>) -> Self {
        Error::InvalidDefinition(msg.into())
    }

    /// Build an [`Error::Config`]
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// True for every definition-related failure
    ///
    /// Covers the base `InvalidDefinition` as well as name conflicts,
    /// missing definitions and dependency cycles.
    pub fn is_invalid_definition(&self) -> bool {
        matches!(
            self,
            Error::InvalidDefinition(_)
                | Error::DefinitionNameConflict { .. }
                | Error::DefinitionNotFound { .. }
                | Error::CyclicDependency { .. }
        )
    }

    /// True for contract validation failures
    pub fn is_invalid_contract(&self) -> bool {
        matches!(self, Error::InvalidContract(_))
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}
