//! Hardened resolvers.
//!
//! A document processor reaches the filesystem through a few resolver hooks:
//! one for documents it includes or imports, one for result documents it
//! writes, and one for raw text it reads. Each hook is a trait here, and
//! [`Hardened`] wraps any implementation so the filter is consulted before
//! the inner resolver ever runs.
//!
//! ```rust,ignore
//! use locator_guard::prelude::*;
//! use std::sync::Arc;
//!
//! let filter = Arc::new(AccessFilter::build(["/application/xsl"])?);
//! let resolver = Hardened::new(MyDocumentResolver::default(), filter);
//!
//! match resolver.resolve("lib/i18n.xsl", "file:///application/xsl/id.xsl") {
//!     Ok(source) => process(source),
//!     Err(HardenedError::Denied(denied)) => eprintln!("{denied}"),
//!     Err(HardenedError::Inner(e)) => eprintln!("resolver failed: {e}"),
//! }
//! ```

use crate::bootstrap;
use crate::error::AccessDenied;
use crate::filter::{AccessFilter, Reference};
use std::fmt;
use std::sync::Arc;

/// The kind of filesystem-touching operation a resolver performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Loading an included, imported, or otherwise referenced document.
    Document,
    /// Creating a result document.
    ResultDocument,
    /// Reading a resource as unparsed text.
    UnparsedText,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Document => write!(f, "document"),
            Self::ResultDocument => write!(f, "result document"),
            Self::UnparsedText => write!(f, "unparsed text"),
        }
    }
}

/// Resolves references to source documents.
pub trait DocumentResolver {
    /// The resolved document source.
    type Source;
    /// Error produced by the resolver itself.
    type Error;

    /// Resolves `href` relative to `base` and opens it.
    ///
    /// # Errors
    ///
    /// Returns `Self::Error` if the document cannot be resolved or opened.
    fn resolve(&self, href: &str, base: &str) -> Result<Self::Source, Self::Error>;
}

/// Creates destinations for result documents.
pub trait ResultDocumentResolver {
    /// The writable destination.
    type Output;
    /// Error produced by the resolver itself.
    type Error;

    /// Creates a destination for an already absolute locator.
    ///
    /// # Errors
    ///
    /// Returns `Self::Error` if the destination cannot be created.
    fn create_result(&self, absolute: &str) -> Result<Self::Output, Self::Error>;

    /// Resolves `href` relative to `base` and creates a destination for it.
    ///
    /// # Errors
    ///
    /// Returns `Self::Error` if the destination cannot be created.
    fn resolve(&self, href: &str, base: &str) -> Result<Self::Output, Self::Error>;
}

/// Opens resources as unparsed text.
pub trait UnparsedTextResolver {
    /// The text reader.
    type Reader;
    /// Error produced by the resolver itself.
    type Error;

    /// Opens an already absolute locator, optionally with an encoding name.
    ///
    /// # Errors
    ///
    /// Returns `Self::Error` if the resource cannot be read.
    fn resolve(&self, absolute: &str, encoding: Option<&str>) -> Result<Self::Reader, Self::Error>;
}

/// Error returned by a [`Hardened`] resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HardenedError<E> {
    /// The filter denied the reference; the inner resolver was not called.
    Denied(AccessDenied),
    /// The inner resolver failed.
    Inner(E),
}

impl<E> HardenedError<E> {
    /// Returns true if the filter denied the reference.
    #[must_use]
    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Denied(_))
    }
}

impl<E> From<AccessDenied> for HardenedError<E> {
    fn from(denied: AccessDenied) -> Self {
        Self::Denied(denied)
    }
}

impl<E: fmt::Display> fmt::Display for HardenedError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Denied(denied) => fmt::Display::fmt(denied, f),
            Self::Inner(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl<E> std::error::Error for HardenedError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Denied(denied) => Some(denied),
            Self::Inner(e) => Some(e),
        }
    }
}

/// A resolver guarded by an [`AccessFilter`].
#[derive(Debug, Clone)]
pub struct Hardened<R> {
    inner: R,
    filter: Arc<AccessFilter>,
}

impl<R> Hardened<R> {
    /// Wraps `inner` with the given filter.
    #[must_use]
    pub fn new(inner: R, filter: Arc<AccessFilter>) -> Self {
        Self { inner, filter }
    }

    /// Wraps `inner` with the process-wide filter from [`bootstrap::shared`].
    #[must_use]
    pub fn with_shared_filter(inner: R) -> Self {
        Self::new(inner, bootstrap::shared())
    }

    /// Returns the wrapped resolver.
    #[must_use]
    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Returns the filter in use.
    #[must_use]
    pub fn filter(&self) -> &AccessFilter {
        &self.filter
    }

    fn guard(&self, reference: Reference<'_>, operation: Operation) -> Result<(), AccessDenied> {
        let decision = self.filter.explain(&reference);
        if decision.is_admitted() {
            return Ok(());
        }
        tracing::warn!(%reference, %operation, %decision, "Refused filesystem access");
        let requested = match reference {
            Reference::Absolute(locator) => locator,
            Reference::RelativeWithBase { reference, .. } => reference,
        };
        Err(AccessDenied::new(requested, operation))
    }
}

impl<R: DocumentResolver> DocumentResolver for Hardened<R> {
    type Source = R::Source;
    type Error = HardenedError<R::Error>;

    fn resolve(&self, href: &str, base: &str) -> Result<Self::Source, Self::Error> {
        self.guard(
            Reference::RelativeWithBase {
                reference: href,
                base,
            },
            Operation::Document,
        )?;
        DocumentResolver::resolve(&self.inner, href, base).map_err(HardenedError::Inner)
    }
}

impl<R: ResultDocumentResolver> ResultDocumentResolver for Hardened<R> {
    type Output = R::Output;
    type Error = HardenedError<R::Error>;

    fn create_result(&self, absolute: &str) -> Result<Self::Output, Self::Error> {
        self.guard(Reference::Absolute(absolute), Operation::ResultDocument)?;
        self.inner
            .create_result(absolute)
            .map_err(HardenedError::Inner)
    }

    fn resolve(&self, href: &str, base: &str) -> Result<Self::Output, Self::Error> {
        self.guard(
            Reference::RelativeWithBase {
                reference: href,
                base,
            },
            Operation::ResultDocument,
        )?;
        ResultDocumentResolver::resolve(&self.inner, href, base).map_err(HardenedError::Inner)
    }
}

impl<R: UnparsedTextResolver> UnparsedTextResolver for Hardened<R> {
    type Reader = R::Reader;
    type Error = HardenedError<R::Error>;

    fn resolve(&self, absolute: &str, encoding: Option<&str>) -> Result<Self::Reader, Self::Error> {
        self.guard(Reference::Absolute(absolute), Operation::UnparsedText)?;
        UnparsedTextResolver::resolve(&self.inner, absolute, encoding).map_err(HardenedError::Inner)
    }
}
