use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use locator_guard::bootstrap;
use locator_guard::config::{self, GuardConfig};
use locator_guard::environment::SystemEnvironment;
use locator_guard::logging::{init_logging, LogLevel};
use locator_guard::{AccessFilter, Reference};
use std::path::PathBuf;
use std::process::ExitCode;

/// Decide whether document references may touch the local filesystem.
#[derive(Parser, Debug)]
#[command(name = "locator-guard", version, about)]
struct Cli {
    /// Configuration file (defaults to ./locator-guard.toml, then the XDG config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Set a property, e.g. -D locator_guard.allowed_locations=~/xsl,~/docs
    #[arg(short = 'D', value_name = "KEY=VALUE", value_parser = parse_property, global = true)]
    define: Vec<(String, String)>,

    /// Allowed location; overrides the property and environment variable
    #[arg(long = "allow", value_name = "LOCATION", global = true)]
    allow: Vec<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOCATOR_GUARD_LOG", global = true)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check one reference; exits 0 when admitted and 1 when denied
    Check {
        /// The reference to check
        reference: String,
        /// Resolve the reference against this base first
        #[arg(long)]
        base: Option<String>,
        /// Print the reason for the decision
        #[arg(long)]
        explain: bool,
    },
    /// List the canonical allowed prefixes
    Prefixes {
        /// Print as a JSON array
        #[arg(long)]
        json: bool,
    },
}

fn parse_property(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}

fn load_config(cli: &Cli) -> Result<GuardConfig> {
    match &cli.config {
        Some(path) => config::from_path(path)
            .with_context(|| format!("loading configuration from {}", path.display())),
        None => config::load().context("loading configuration"),
    }
}

fn build_filter(cli: &Cli, config: GuardConfig) -> Result<AccessFilter> {
    let env = SystemEnvironment::new()
        .with_properties(config.properties)
        .with_properties(cli.define.iter().cloned());

    if cli.allow.is_empty() {
        return Ok(bootstrap::from_environment(&env));
    }
    AccessFilter::build_in(&env, &cli.allow).context("invalid --allow location")
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let mut logging = config.logging.clone();
    if let Some(level) = cli.log_level {
        logging.level = level;
    }
    if let Err(e) = init_logging(&logging) {
        eprintln!("warning: {e}");
    }

    let filter = build_filter(&cli, config)?;

    match &cli.command {
        Commands::Check {
            reference,
            base,
            explain,
        } => {
            let reference = match base {
                Some(base) => Reference::RelativeWithBase { reference, base },
                None => Reference::Absolute(reference),
            };
            let decision = filter.explain(&reference);
            let verdict = if decision.is_admitted() { "admit" } else { "deny" };
            if *explain {
                println!("{verdict}: {decision}");
            } else {
                println!("{verdict}");
            }
            Ok(if decision.is_admitted() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Prefixes { json } => {
            if *json {
                println!("{}", serde_json::to_string_pretty(filter.allowed_prefixes())?);
            } else {
                for prefix in filter.allowed_prefixes() {
                    println!("{prefix}");
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
