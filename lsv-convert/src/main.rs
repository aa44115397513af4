use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use lsv_convert::guidance::{default_guidance, load_guidance, GuidanceTable};
use lsv_convert::validator::ValidatorOptions;
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod cli;
mod convert_cmd;
mod diff_cmd;
mod migrate_cmd;
mod validate_cmd;

use cli::{Cli, Command, ValidatorArgs};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (verbose, quiet) = cli.command.verbosity();
    init_logging(verbose, quiet);

    match cli.command {
        Command::Migrate(args) => migrate_cmd::run_migrate(args),
        Command::Convert(args) => convert_cmd::run_convert(args),
        Command::Validate(args) => validate_cmd::run_validate(args),
        Command::Diff(args) => diff_cmd::run_diff(args),
    }
}

/// Log to stderr; `RUST_LOG` wins over the flag-derived default.
fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Use the guidance file when given, falling back to the built-in table if
/// it cannot be loaded.
pub(crate) fn resolve_guidance(path: Option<&Path>) -> GuidanceTable {
    let Some(path) = path else {
        return default_guidance();
    };
    match load_guidance(path) {
        Ok(table) => table,
        Err(err) => {
            warn!("{err}; using built-in guidance");
            default_guidance()
        }
    }
}

pub(crate) fn validator_options(args: &ValidatorArgs) -> ValidatorOptions {
    ValidatorOptions {
        timeout: Duration::from_secs(args.validator_timeout),
        skip_environment_checks: !args.check_environment,
        ..ValidatorOptions::default()
    }
}
