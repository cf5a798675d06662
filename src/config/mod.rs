//! Configuration file support for locator-guard.
//!
//! A configuration file supplies properties (including the allowed
//! locations) and logging settings. The search order is:
//! 1. `./locator-guard.toml` (project-local)
//! 2. `~/.config/locator-guard/config.toml` (XDG config)
//!
//! # Example Configuration
//!
//! ```toml
//! [properties]
//! "locator_guard.allowed_locations" = "~/xsl,~/docs"
//!
//! [logging]
//! level = "debug"
//! ansi = true
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use locator_guard::config;
//! use locator_guard::environment::SystemEnvironment;
//!
//! let config = config::load()?;
//! let env = SystemEnvironment::new().with_properties(config.properties.clone());
//! let filter = locator_guard::bootstrap::from_environment(&env);
//! ```

mod file;
mod types;

pub use file::{from_path, from_str, load, search_paths, xdg_config_dir};

pub use types::GuardConfig;
