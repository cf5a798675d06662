//! Process environment seen by the filter and its bootstrap.
//!
//! The filter never reads global state on its own. Everything it needs from
//! the process (home directory, working directory, named properties and
//! environment variables) is asked of an [`Environment`].

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

/// Source of process-level facts used while building a filter.
pub trait Environment {
    /// Returns the invoking user's home directory, if known.
    fn home_dir(&self) -> Option<PathBuf>;

    /// Returns the current working directory.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the working directory cannot be determined.
    fn current_dir(&self) -> io::Result<PathBuf>;

    /// Looks up a named property.
    fn property(&self, key: &str) -> Option<String>;

    /// Looks up an environment variable.
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
///
/// Properties are the Rust counterpart of JVM-style `-Dkey=value` settings:
/// an explicit map filled from the configuration file and the command line.
#[derive(Debug, Clone, Default)]
pub struct SystemEnvironment {
    properties: HashMap<String, String>,
}

impl SystemEnvironment {
    /// Creates a system environment with no properties set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a property, replacing any earlier value for the same key.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Sets several properties; later entries win.
    #[must_use]
    pub fn with_properties<I, K, V>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.properties
            .extend(properties.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }
}

impl Environment for SystemEnvironment {
    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        std::env::current_dir()
    }

    fn property(&self, key: &str) -> Option<String> {
        self.properties.get(key).cloned()
    }

    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// An environment with every value given explicitly.
///
/// Useful for embedding the filter in a host that manages its own notion of
/// home and working directory, and for deterministic tests.
#[derive(Debug, Clone, Default)]
pub struct FixedEnvironment {
    home_dir: Option<PathBuf>,
    current_dir: Option<PathBuf>,
    properties: HashMap<String, String>,
    vars: HashMap<String, String>,
}

impl FixedEnvironment {
    /// Creates an environment with nothing set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the home directory.
    #[must_use]
    pub fn with_home_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.home_dir = Some(path.into());
        self
    }

    /// Sets the working directory.
    #[must_use]
    pub fn with_current_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(path.into());
        self
    }

    /// Sets a property.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Sets an environment variable.
    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl Environment for FixedEnvironment {
    fn home_dir(&self) -> Option<PathBuf> {
        self.home_dir.clone()
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        self.current_dir.clone().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "no working directory configured")
        })
    }

    fn property(&self, key: &str) -> Option<String> {
        self.properties.get(key).cloned()
    }

    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}
