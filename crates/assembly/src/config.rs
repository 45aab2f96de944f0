//! Assembly configuration
//!
//! All fields are optional; empty TOML text yields the defaults.

use serde::{Deserialize, Serialize};
use tablekit_core::{Error, Result};

/// Module name used for namespaces when none is configured.
pub const DEFAULT_MODULE_NAME: &str = "models";

/// Order in which contract entries are built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssemblyOrder {
    /// Prerequisites before dependents, following declared dependencies
    #[default]
    Dependency,
    /// Contract iteration order
    Contract,
}

/// Assembly configuration, usually parsed from TOML.
///
/// # Example
///
/// ```toml
/// module_name = "models"
/// strict = false
/// order = "dependency"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyConfig {
    /// Module name given to assembled namespaces.
    #[serde(default = "default_module_name")]
    pub module_name: String,
    /// Reject registering the same definition name twice.
    #[serde(default)]
    pub strict: bool,
    /// Build order for contract entries.
    #[serde(default)]
    pub order: AssemblyOrder,
}

fn default_module_name() -> String {
    DEFAULT_MODULE_NAME.to_string()
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            module_name: default_module_name(),
            strict: false,
            order: AssemblyOrder::default(),
        }
    }
}

impl AssemblyConfig {
    /// Set the module name.
    pub fn with_module_name(mut self, module_name: impl Into<String>) -> Self {
        self.module_name = module_name.into();
        self
    }

    /// Set strict registration.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set the build order.
    pub fn with_order(mut self, order: AssemblyOrder) -> Self {
        self.order = order;
        self
    }

    /// Check field values.
    ///
    /// # Errors
    ///
    /// Returns an error if the module name is blank.
    pub fn validate(&self) -> Result<()> {
        if self.module_name.trim().is_empty() {
            return Err(Error::config("module_name must not be empty"));
        }
        Ok(())
    }

    /// Parse and validate config from TOML text.
    ///
    /// Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `Config` when the text does not parse or fails validation.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AssemblyConfig = toml::from_str(content)?;
        config.validate()?;
        tracing::debug!(target: "tablekit::config", ?config, "Parsed config");
        Ok(config)
    }
}
