//! Reference resolution and dot-segment removal (RFC 3986, section 5.2).

use super::{Locator, LocatorError};

/// Removes `.` and `..` segments from a path (RFC 3986, section 5.2.4).
///
/// Purely lexical: nothing on the filesystem is consulted. `..` at the root
/// stays at the root, so `/../a` becomes `/a`.
#[must_use]
pub fn remove_dot_segments(path: &str) -> String {
    let mut input = path;
    let mut output = String::with_capacity(path.len());

    while !input.is_empty() {
        if let Some(rest) = input.strip_prefix("../") {
            input = rest;
        } else if let Some(rest) = input.strip_prefix("./") {
            input = rest;
        } else if input.starts_with("/./") {
            input = &input[2..];
        } else if input == "/." {
            input = "/";
        } else if input.starts_with("/../") {
            input = &input[3..];
            pop_segment(&mut output);
        } else if input == "/.." {
            input = "/";
            pop_segment(&mut output);
        } else if input == "." || input == ".." {
            input = "";
        } else {
            let start = usize::from(input.starts_with('/'));
            let end = input[start..]
                .find('/')
                .map_or(input.len(), |offset| start + offset);
            output.push_str(&input[..end]);
            input = &input[end..];
        }
    }

    output
}

/// Collapses each run of `/` in a path into a single `/`.
///
/// Filesystems read `a//b` as `a/b`, while [`remove_dot_segments`] treats the
/// empty segment as a directory that a following `..` pops. Collapse first
/// when the path names a file.
#[must_use]
pub fn collapse_slashes(path: &str) -> String {
    let mut output = String::with_capacity(path.len());
    let mut after_slash = false;
    for c in path.chars() {
        if c == '/' && after_slash {
            continue;
        }
        after_slash = c == '/';
        output.push(c);
    }
    output
}

fn pop_segment(output: &mut String) {
    match output.rfind('/') {
        Some(index) => output.truncate(index),
        None => output.clear(),
    }
}

/// Merges a relative path with the base path (RFC 3986, section 5.2.3).
fn merge(base: &Locator, reference_path: &str) -> String {
    if base.authority.is_some() && base.path.is_empty() {
        return format!("/{reference_path}");
    }
    match base.path.rfind('/') {
        Some(index) => format!("{}{}", &base.path[..=index], reference_path),
        None => reference_path.to_string(),
    }
}

impl Locator {
    /// Resolves `reference` against `self` as the base (RFC 3986, section
    /// 5.2.2, strict mode).
    ///
    /// A reference that carries its own scheme replaces the base entirely.
    ///
    /// # Errors
    ///
    /// Returns `LocatorError::UnresolvableBase` if the base has no scheme, or
    /// if a scheme-less reference must be combined with a base that has
    /// neither an authority nor an absolute path.
    pub fn resolve(&self, reference: &Locator) -> Result<Locator, LocatorError> {
        let unresolvable = || LocatorError::UnresolvableBase {
            base: self.to_string(),
        };

        if reference.scheme.is_some() {
            return Ok(Locator {
                path: remove_dot_segments(&reference.path),
                ..reference.clone()
            });
        }

        let scheme = self.scheme.clone().ok_or_else(unresolvable)?;
        if self.authority.is_none() && !self.has_absolute_path() {
            return Err(unresolvable());
        }

        let (authority, path, query) = if reference.authority.is_some() {
            (
                reference.authority.clone(),
                remove_dot_segments(&reference.path),
                reference.query.clone(),
            )
        } else if reference.path.is_empty() {
            (
                self.authority.clone(),
                self.path.clone(),
                reference.query.clone().or_else(|| self.query.clone()),
            )
        } else if reference.has_absolute_path() {
            (
                self.authority.clone(),
                remove_dot_segments(&reference.path),
                reference.query.clone(),
            )
        } else {
            (
                self.authority.clone(),
                remove_dot_segments(&merge(self, &reference.path)),
                reference.query.clone(),
            )
        };

        Ok(Locator {
            scheme: Some(scheme),
            authority,
            path,
            query,
            fragment: reference.fragment.clone(),
        })
    }
}
