//! Configuration file schema.

use crate::bootstrap::PROPERTY;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Root configuration structure for locator-guard.
///
/// ```toml
/// [properties]
/// "locator_guard.allowed_locations" = "/srv/xsl,/srv/docs"
///
/// [logging]
/// level = "warn"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GuardConfig {
    /// Named properties made visible through the process environment.
    #[serde(default)]
    pub properties: HashMap<String, String>,

    /// Diagnostic logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GuardConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a property.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Returns the allowed-locations property, if the file sets it.
    #[must_use]
    pub fn allowed_locations(&self) -> Option<&str> {
        self.properties.get(PROPERTY).map(String::as_str)
    }
}
