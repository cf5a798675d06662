//! Building a filter from process configuration.
//!
//! The allowed locations are read from one property, falling back to one
//! environment variable, and split on [`SEPARATOR`]:
//!
//! ```text
//! locator-guard -D locator_guard.allowed_locations=~/xsl,~/docs check ...
//! LOCATOR_GUARD_ALLOWED_LOCATIONS=/srv/xsl,/srv/docs locator-guard check ...
//! ```
//!
//! Configuration errors never escape from here: they are logged and replaced
//! by a filter that allows nothing.

use crate::environment::{Environment, SystemEnvironment};
use crate::filter::AccessFilter;
use std::sync::{Arc, OnceLock};

/// Property holding the allowed locations.
pub const PROPERTY: &str = "locator_guard.allowed_locations";

/// Environment variable holding the allowed locations.
pub const ENV_VAR: &str = "LOCATOR_GUARD_ALLOWED_LOCATIONS";

/// Separator between locations.
pub const SEPARATOR: char = ',';

static SHARED: OnceLock<Arc<AccessFilter>> = OnceLock::new();

/// Returns the configured raw locations.
///
/// The property wins over the environment variable when both are set. The
/// value is split verbatim, so `"a,,b"` yields an empty middle entry that
/// `build` will reject. Neither being set yields an empty list.
#[must_use]
pub fn raw_locations(env: &dyn Environment) -> Vec<String> {
    let value = match env.property(PROPERTY) {
        Some(value) => {
            tracing::debug!(property = PROPERTY, "Reading allowed locations from property");
            value
        }
        None => match env.var(ENV_VAR) {
            Some(value) => {
                tracing::debug!(env_var = ENV_VAR, "Reading allowed locations from environment");
                value
            }
            None => return Vec::new(),
        },
    };
    value.split(SEPARATOR).map(str::to_string).collect()
}

/// Builds a filter from the configured locations, failing closed.
///
/// On a `ConfigError` the error is logged and a filter with no allowed
/// locations is returned instead.
#[must_use]
pub fn from_environment(env: &dyn Environment) -> AccessFilter {
    match AccessFilter::build_in(env, raw_locations(env)) {
        Ok(filter) => filter,
        Err(e) => {
            tracing::error!(error = %e, "Invalid filesystem filter configuration; denying all file access");
            AccessFilter::deny_all()
        }
    }
}

/// Returns the process-wide filter, building it from `env` on first use.
///
/// Later calls return the first filter regardless of the `env` they pass.
pub fn init_shared(env: &dyn Environment) -> Arc<AccessFilter> {
    Arc::clone(SHARED.get_or_init(|| Arc::new(from_environment(env))))
}

/// Returns the process-wide filter, building it from the system environment
/// on first use.
#[must_use]
pub fn shared() -> Arc<AccessFilter> {
    init_shared(&SystemEnvironment::new())
}
