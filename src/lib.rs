//! # locator-guard: filesystem allowlist for document references
//!
//! Document processors follow references: includes, imports, result
//! documents, unparsed-text reads. Left unchecked, any of them can read or
//! write anywhere on the local filesystem. This crate decides, per reference,
//! whether it may touch the filesystem at all.
//!
//! ## Behavior
//!
//! - **Fail closed**: a `file` reference is admitted only when its normalized,
//!   decoded path lies under one of the configured directories. Malformed,
//!   relative, and remote-host references are denied.
//! - **Other schemes pass through**: `http`, `https`, `urn` and friends are
//!   not this crate's concern and are always admitted.
//! - **Shareable**: an [`AccessFilter`] is immutable after construction and
//!   can be checked from any number of threads.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use locator_guard::prelude::*;
//!
//! let filter = AccessFilter::build(["/application/xsl", "/application/docs"])?;
//!
//! assert!(filter.check("file:///application/xsl/id.xsl"));
//! assert!(filter.check_with_base("../docs/hello.xml", "file:///application/xsl/id.xsl"));
//! assert!(!filter.check("file:///application/xsl/../config/secret"));
//! assert!(filter.check("https://example.com/anything"));
//! ```
//!
//! Processes usually build the filter once from configuration instead; see
//! [`bootstrap`].

pub mod bootstrap;
pub mod config;
pub mod environment;
pub mod error;
pub mod filter;
pub mod locator;
pub mod logging;
pub mod resolver;

pub use error::{AccessDenied, ConfigError, ConfigErrorKind};
pub use filter::{AccessFilter, AllowedPrefix, Decision, Reference};
pub use locator::{Locator, LocatorError};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::bootstrap::{from_environment, shared};
    pub use crate::environment::{Environment, FixedEnvironment, SystemEnvironment};
    pub use crate::error::{AccessDenied, ConfigError, ConfigErrorKind};
    pub use crate::filter::{AccessFilter, AllowedPrefix, Decision, Reference};
    pub use crate::locator::{Locator, LocatorError};
    pub use crate::resolver::{
        DocumentResolver, Hardened, HardenedError, Operation, ResultDocumentResolver,
        UnparsedTextResolver,
    };
}
