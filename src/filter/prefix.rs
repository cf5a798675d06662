//! Canonical allowed locations.

use crate::environment::Environment;
use crate::error::ConfigError;
use serde::Serialize;
use std::ffi::OsString;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// One permitted filesystem subtree in canonical form.
///
/// Invariants:
/// - absolute, starting with `/` (Windows drives render as `/C:/...`)
/// - terminated by exactly one `/`
/// - no scheme, no `.` or `..` segments, segments joined by `/`
/// - decoded form: a literal `%` in a directory name stays a literal `%`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AllowedPrefix(String);

impl AllowedPrefix {
    /// Normalizes one configured location.
    ///
    /// `index` is the entry's position in the configured list and only
    /// appears in error messages.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the entry is empty, is written as a `file:`
    /// URI, needs a home or working directory the environment cannot supply,
    /// or has a component that is not valid UTF-8.
    pub fn from_location(
        index: usize,
        location: &str,
        env: &dyn Environment,
    ) -> Result<Self, ConfigError> {
        if location.is_empty() {
            return Err(ConfigError::empty_location(index));
        }
        if location
            .get(..5)
            .is_some_and(|head| head.eq_ignore_ascii_case("file:"))
        {
            return Err(ConfigError::file_scheme_location(index, location));
        }

        let expanded = match location.strip_prefix('~') {
            Some(rest) => {
                let home = env
                    .home_dir()
                    .ok_or_else(|| ConfigError::no_home_directory(location))?;
                let mut joined = OsString::from(home);
                joined.push(rest);
                PathBuf::from(joined)
            }
            None => PathBuf::from(location),
        };

        let absolute = if expanded.is_absolute() {
            expanded
        } else {
            env.current_dir()
                .map_err(|e| ConfigError::no_working_directory(location, e.to_string()))?
                .join(expanded)
        };

        canonical_directory(&absolute)
            .map(Self)
            .map_err(|reason| ConfigError::invalid_path(location, reason))
    }

    /// Returns the canonical prefix string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if `path` (decoded and normalized) lies under this prefix.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        path.starts_with(&self.0)
    }
}

impl AsRef<str> for AllowedPrefix {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AllowedPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Renders an absolute path as a `/`-joined, `/`-terminated string with `.`
/// and `..` removed lexically.
fn canonical_directory(path: &Path) -> Result<String, String> {
    if !path.is_absolute() {
        return Err("path is not absolute after resolution".to_string());
    }

    let mut root = String::new();
    let mut segments: Vec<&str> = Vec::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => {
                let drive = prefix
                    .as_os_str()
                    .to_str()
                    .ok_or("drive prefix is not valid UTF-8")?;
                root = format!("/{}", drive.replace('\\', "/").trim_end_matches('/'));
            }
            Component::RootDir | Component::CurDir => {}
            Component::ParentDir => {
                segments.pop();
            }
            Component::Normal(name) => {
                let name = name
                    .to_str()
                    .ok_or_else(|| format!("component {:?} is not valid UTF-8", name))?;
                segments.push(name);
            }
        }
    }

    let mut canonical = root;
    canonical.push('/');
    for segment in segments {
        canonical.push_str(segment);
        canonical.push('/');
    }
    Ok(canonical)
}
