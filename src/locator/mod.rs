//! Locator parsing.
//!
//! A [`Locator`] is a reference to a resource split into its RFC 3986
//! components. It may be a fully qualified URI (`file:///a/b`,
//! `http://host/x`) or a bare filesystem-style path (`/a/b`, `xsl/id.xsl`).
//!
//! Parsing is purely syntactic and strict: characters that RFC 3986 never
//! allows in a reference, and malformed percent escapes, are rejected so the
//! filter can refuse anything it cannot classify with confidence.

mod resolve;

pub use resolve::{collapse_slashes, remove_dot_segments};

use std::fmt;
use std::str::FromStr;

/// The scheme governed by the filter.
pub const FILE_SCHEME: &str = "file";

/// Error returned when a locator cannot be parsed or resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocatorError {
    /// A character that may not appear in a locator.
    InvalidCharacter {
        /// The rejected character.
        character: char,
        /// Byte offset of the character in the input.
        position: usize,
    },
    /// A `%` not followed by two hexadecimal digits.
    InvalidPercentEncoding {
        /// Byte offset of the `%` in the input.
        position: usize,
    },
    /// The percent-decoded path is not valid UTF-8.
    InvalidUtf8,
    /// The base locator cannot anchor a relative reference.
    UnresolvableBase {
        /// The base that was rejected.
        base: String,
    },
}

impl fmt::Display for LocatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCharacter {
                character,
                position,
            } => {
                write!(
                    f,
                    "invalid character {:?} at position {}; percent-encode it",
                    character, position
                )
            }
            Self::InvalidPercentEncoding { position } => {
                write!(
                    f,
                    "malformed percent escape at position {}; '%' must be followed by two hex digits",
                    position
                )
            }
            Self::InvalidUtf8 => write!(f, "decoded path is not valid UTF-8"),
            Self::UnresolvableBase { base } => {
                write!(
                    f,
                    "cannot resolve against base '{}'; the base must be an absolute hierarchical locator",
                    base
                )
            }
        }
    }
}

impl std::error::Error for LocatorError {}

/// A parsed resource reference.
///
/// Components follow RFC 3986: `scheme:[//authority]path[?query][#fragment]`.
/// An absent component is `None`; an empty one (e.g. the authority of
/// `file:///x`) is `Some("")`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Locator {
    scheme: Option<String>,
    authority: Option<String>,
    path: String,
    query: Option<String>,
    fragment: Option<String>,
}

impl Locator {
    /// Parses a locator string.
    ///
    /// A one-letter scheme is read as a Windows drive letter, so `C:/x` is a
    /// bare relative path rather than a URI with scheme `c`.
    ///
    /// # Errors
    ///
    /// Returns `LocatorError` if the input contains characters RFC 3986 does
    /// not allow or a malformed percent escape.
    pub fn parse(input: &str) -> Result<Self, LocatorError> {
        validate(input)?;

        let (rest, fragment) = match input.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment.to_string())),
            None => (input, None),
        };
        let (rest, query) = match rest.split_once('?') {
            Some((rest, query)) => (rest, Some(query.to_string())),
            None => (rest, None),
        };
        let (scheme, rest) = split_scheme(rest);
        let (authority, path) = match rest.strip_prefix("//") {
            Some(after) => {
                let end = after.find('/').unwrap_or(after.len());
                (Some(after[..end].to_string()), &after[end..])
            }
            None => (None, rest),
        };

        Ok(Self {
            scheme: scheme.map(str::to_string),
            authority,
            path: path.to_string(),
            query,
            fragment,
        })
    }

    /// Returns the scheme, if any, as written.
    #[must_use]
    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// Returns the authority component, if present.
    #[must_use]
    pub fn authority(&self) -> Option<&str> {
        self.authority.as_deref()
    }

    /// Returns the raw (still percent-encoded) path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the query component, if present.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Returns the fragment component, if present.
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Returns true if the locator carries a scheme.
    #[must_use]
    pub fn has_scheme(&self) -> bool {
        self.scheme.is_some()
    }

    /// Returns true if the scheme is `file` (case-insensitive).
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.scheme
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case(FILE_SCHEME))
    }

    /// Returns true if the path is absolute (starts with `/`).
    #[must_use]
    pub fn has_absolute_path(&self) -> bool {
        self.path.starts_with('/')
    }

    /// Sets the scheme when none is present; the path is left untouched.
    #[must_use]
    pub fn with_default_scheme(mut self, scheme: &str) -> Self {
        if self.scheme.is_none() {
            self.scheme = Some(scheme.to_string());
        }
        self
    }

    /// Collapses runs of `/` in the path; see [`collapse_slashes`].
    #[must_use]
    pub fn with_collapsed_slashes(mut self) -> Self {
        self.path = collapse_slashes(&self.path);
        self
    }

    /// Returns a copy whose path has `.` and `..` segments removed.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            path: remove_dot_segments(&self.path),
            ..self.clone()
        }
    }

    /// Returns the percent-decoded path.
    ///
    /// # Errors
    ///
    /// Returns `LocatorError::InvalidUtf8` if the decoded bytes are not UTF-8.
    pub fn decoded_path(&self) -> Result<String, LocatorError> {
        percent_encoding::percent_decode_str(&self.path)
            .decode_utf8()
            .map(|decoded| decoded.into_owned())
            .map_err(|_| LocatorError::InvalidUtf8)
    }
}

impl FromStr for Locator {
    type Err = LocatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(scheme) = &self.scheme {
            write!(f, "{}:", scheme)?;
        }
        if let Some(authority) = &self.authority {
            write!(f, "//{}", authority)?;
        }
        f.write_str(&self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{}", query)?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{}", fragment)?;
        }
        Ok(())
    }
}

/// Splits a leading `scheme:` off the input.
///
/// The colon must precede any `/`, and the candidate must match
/// `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )` with at least two characters.
fn split_scheme(input: &str) -> (Option<&str>, &str) {
    let Some(colon) = input.find(':') else {
        return (None, input);
    };
    let candidate = &input[..colon];
    if candidate.len() < 2 || !is_scheme(candidate) {
        return (None, input);
    }
    (Some(candidate), &input[colon + 1..])
}

fn is_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn validate(input: &str) -> Result<(), LocatorError> {
    let bytes = input.as_bytes();
    for (position, character) in input.char_indices() {
        if character == '%' {
            let well_formed = bytes.len() > position + 2
                && bytes[position + 1].is_ascii_hexdigit()
                && bytes[position + 2].is_ascii_hexdigit();
            if !well_formed {
                return Err(LocatorError::InvalidPercentEncoding { position });
            }
        } else if is_forbidden(character) {
            return Err(LocatorError::InvalidCharacter {
                character,
                position,
            });
        }
    }
    Ok(())
}

fn is_forbidden(character: char) -> bool {
    character.is_control()
        || character.is_whitespace()
        || matches!(character, '"' | '<' | '>' | '\\' | '^' | '`' | '{' | '|' | '}')
}
