//! Error types for locator-guard.
//!
//! Each error type implements Display, Debug, Clone, PartialEq, Eq, and
//! std::error::Error. Display messages end with a hint on how to fix the
//! problem.
//!
//! A denied reference is not an error at the filter level: `check` returns
//! `false`. [`AccessDenied`] only exists for collaborators that need to turn
//! a denial into a refusal of their own operation.

use crate::resolver::Operation;
use std::fmt;

/// Errors raised while building an [`AccessFilter`](crate::AccessFilter) or
/// loading its configuration.
///
/// A `ConfigError` aborts the whole `build` call; no partially configured
/// filter is ever returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The specific error that occurred
    pub kind: ConfigErrorKind,
}

/// Specific configuration error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigErrorKind {
    /// A configured location was the empty string
    EmptyLocation {
        /// Position of the entry in the configured list
        index: usize,
    },
    /// A configured location was written as a `file:` URI instead of a path
    FileSchemeLocation {
        /// Position of the entry in the configured list
        index: usize,
        /// The offending entry
        location: String,
    },
    /// A `~` location was configured but no home directory is known
    NoHomeDirectory {
        /// The offending entry
        location: String,
    },
    /// A relative location was configured but the working directory is unknown
    NoWorkingDirectory {
        /// The offending entry
        location: String,
        /// Why the working directory could not be determined
        reason: String,
    },
    /// The location could not be turned into a canonical locator path
    InvalidPath {
        /// The offending entry
        location: String,
        /// Why it was rejected
        reason: String,
    },
    /// A configuration file could not be read or parsed
    InvalidConfigFile {
        /// Where the file was looked up
        path: String,
        /// Why it was rejected
        reason: String,
    },
}

impl ConfigError {
    /// Creates a new ConfigError with the given kind.
    #[must_use]
    pub fn new(kind: ConfigErrorKind) -> Self {
        Self { kind }
    }

    /// Creates an empty location error.
    #[must_use]
    pub fn empty_location(index: usize) -> Self {
        Self::new(ConfigErrorKind::EmptyLocation { index })
    }

    /// Creates an error for a location given as a `file:` URI.
    #[must_use]
    pub fn file_scheme_location(index: usize, location: impl Into<String>) -> Self {
        Self::new(ConfigErrorKind::FileSchemeLocation {
            index,
            location: location.into(),
        })
    }

    /// Creates a missing home directory error.
    #[must_use]
    pub fn no_home_directory(location: impl Into<String>) -> Self {
        Self::new(ConfigErrorKind::NoHomeDirectory {
            location: location.into(),
        })
    }

    /// Creates a missing working directory error.
    #[must_use]
    pub fn no_working_directory(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ConfigErrorKind::NoWorkingDirectory {
            location: location.into(),
            reason: reason.into(),
        })
    }

    /// Creates an invalid path error.
    #[must_use]
    pub fn invalid_path(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ConfigErrorKind::InvalidPath {
            location: location.into(),
            reason: reason.into(),
        })
    }

    /// Creates an invalid configuration file error.
    #[must_use]
    pub fn invalid_config_file(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ConfigErrorKind::InvalidConfigFile {
            path: path.into(),
            reason: reason.into(),
        })
    }

    /// Returns true if this error concerns a configured allowed location.
    #[must_use]
    pub fn is_location_error(&self) -> bool {
        !self.is_config_file_error()
    }

    /// Returns true if this error concerns a configuration file.
    #[must_use]
    pub fn is_config_file_error(&self) -> bool {
        matches!(self.kind, ConfigErrorKind::InvalidConfigFile { .. })
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ConfigErrorKind::EmptyLocation { index } => {
                write!(
                    f,
                    "configuration error: allowed location #{} is the empty string; \
                     remove the entry or give a directory path",
                    index
                )
            }
            ConfigErrorKind::FileSchemeLocation { index, location } => {
                write!(
                    f,
                    "configuration error: allowed location #{} ('{}') starts with 'file:'; \
                     configure a plain filesystem path instead of a URI",
                    index, location
                )
            }
            ConfigErrorKind::NoHomeDirectory { location } => {
                write!(
                    f,
                    "configuration error: cannot expand '~' in '{}': home directory is unknown; \
                     use an absolute path",
                    location
                )
            }
            ConfigErrorKind::NoWorkingDirectory { location, reason } => {
                write!(
                    f,
                    "configuration error: cannot make '{}' absolute: {}; \
                     use an absolute path",
                    location, reason
                )
            }
            ConfigErrorKind::InvalidPath { location, reason } => {
                write!(
                    f,
                    "invalid path configured for the filesystem filter '{}': {}",
                    location, reason
                )
            }
            ConfigErrorKind::InvalidConfigFile { path, reason } => {
                write!(
                    f,
                    "invalid configuration file '{}': {}; fix or remove the file",
                    path, reason
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// A collaborator refused an operation because the filter denied its reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessDenied {
    /// The reference as the caller supplied it
    pub reference: String,
    /// The operation that was refused
    pub operation: Operation,
}

impl AccessDenied {
    /// Creates a new access denied error.
    #[must_use]
    pub fn new(reference: impl Into<String>, operation: Operation) -> Self {
        Self {
            reference: reference.into(),
            operation,
        }
    }
}

impl fmt::Display for AccessDenied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "path not allowed: {} ({}); add its directory to the allowed locations if access is intended",
            self.reference, self.operation
        )
    }
}

impl std::error::Error for AccessDenied {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_location_display() {
        let error = ConfigError::empty_location(2);
        let message = error.to_string();
        assert!(message.contains("#2"));
        assert!(message.contains("empty string"));
    }

    #[test]
    fn file_scheme_location_display() {
        let error = ConfigError::file_scheme_location(0, "file:/application/xsl");
        let message = error.to_string();
        assert!(message.contains("file:/application/xsl"));
        assert!(message.contains("plain filesystem path"));
    }

    #[test]
    fn no_home_directory_display() {
        let error = ConfigError::no_home_directory("~/xsl");
        assert!(error.to_string().contains("~/xsl"));
        assert!(error.to_string().contains("home directory"));
    }

    #[test]
    fn no_working_directory_display() {
        let error = ConfigError::no_working_directory("xsl", "directory was removed");
        let message = error.to_string();
        assert!(message.contains("'xsl'"));
        assert!(message.contains("directory was removed"));
    }

    #[test]
    fn location_and_file_predicates() {
        let location = ConfigError::invalid_path("/x", "not UTF-8");
        assert!(location.is_location_error());
        assert!(!location.is_config_file_error());

        let file = ConfigError::invalid_config_file("locator-guard.toml", "invalid TOML");
        assert!(file.is_config_file_error());
        assert!(!file.is_location_error());
    }

    #[test]
    fn config_errors_are_clone_and_eq() {
        let error1 = ConfigError::empty_location(0);
        let error2 = error1.clone();
        assert_eq!(error1, error2);
        assert_ne!(error1, ConfigError::empty_location(1));
    }

    #[test]
    fn access_denied_names_reference_and_operation() {
        let error = AccessDenied::new("/etc/passwd", Operation::UnparsedText);
        let message = error.to_string();
        assert!(message.starts_with("path not allowed: /etc/passwd"));
        assert!(message.contains("unparsed text"));
    }
}
