//! Run `vector validate` against generated files.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

pub const DEFAULT_VALIDATOR_BINARY: &str = "vector";
pub const DEFAULT_VALIDATOR_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// Binary name or path of the Vector CLI.
    pub binary: String,
    pub timeout: Duration,
    /// Pass `--no-environment` so sources and sinks are not health-checked.
    pub skip_environment_checks: bool,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            binary: DEFAULT_VALIDATOR_BINARY.to_string(),
            timeout: DEFAULT_VALIDATOR_TIMEOUT,
            skip_environment_checks: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    /// Combined stdout and stderr of the validator.
    pub diagnostics: String,
}

#[derive(Debug, Error)]
pub enum ValidatorError {
    #[error("failed to run {binary}: {source}")]
    Spawn {
        binary: String,
        source: std::io::Error,
    },
    #[error("validation timed out after {} seconds", .0.as_secs_f64())]
    Timeout(Duration),
    #[error("failed to start validator runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Resolve the validator binary on `PATH`.
pub fn locate_validator(options: &ValidatorOptions) -> Option<PathBuf> {
    which::which(&options.binary).ok()
}

/// Validate one file.
///
/// A missing binary is reported as an invalid outcome, not an error. The
/// child is killed once `options.timeout` elapses. Must not be called from
/// inside a tokio runtime; it drives its own current-thread runtime.
pub fn validate_vector_config(
    path: &Path,
    options: &ValidatorOptions,
) -> Result<ValidationOutcome, ValidatorError> {
    let Some(binary) = locate_validator(options) else {
        return Ok(ValidationOutcome {
            is_valid: false,
            diagnostics: format!("{} CLI not found in PATH", display_name(&options.binary)),
        });
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run_validator(&binary, path, options))
}

async fn run_validator(
    binary: &Path,
    path: &Path,
    options: &ValidatorOptions,
) -> Result<ValidationOutcome, ValidatorError> {
    let mut command = Command::new(binary);
    command.arg("validate");
    if options.skip_environment_checks {
        command.arg("--no-environment");
    }
    command
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    debug!(binary = %binary.display(), file = %path.display(), "running validator");
    let output = match timeout(options.timeout, command.output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(source)) => {
            return Err(ValidatorError::Spawn {
                binary: binary.display().to_string(),
                source,
            })
        }
        Err(_) => return Err(ValidatorError::Timeout(options.timeout)),
    };

    let mut diagnostics = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.is_empty() {
        if !diagnostics.is_empty() && !diagnostics.ends_with('\n') {
            diagnostics.push('\n');
        }
        diagnostics.push_str(&stderr);
    }

    Ok(ValidationOutcome {
        is_valid: output.status.success(),
        diagnostics,
    })
}

fn display_name(binary: &str) -> String {
    if binary == DEFAULT_VALIDATOR_BINARY {
        "Vector".to_string()
    } else {
        binary.to_string()
    }
}
