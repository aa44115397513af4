use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use colored::Colorize;
use lsv_convert::report::render_validation;
use lsv_convert::validator::{locate_validator, validate_vector_config};
use serde::Serialize;
use tracing::warn;

use crate::cli::{OutputFormat, ValidateArgs};
use crate::validator_options;

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum FileStatus {
    Valid,
    Invalid,
    NotFound,
    Error,
}

#[derive(Serialize)]
struct FileValidation {
    file: PathBuf,
    status: FileStatus,
    #[serde(skip_serializing_if = "String::is_empty")]
    diagnostics: String,
}

pub fn run_validate(args: ValidateArgs) -> Result<()> {
    let files = if args.files.is_empty() {
        toml_files_in(Path::new("."))?
    } else {
        args.files.clone()
    };
    if files.is_empty() {
        bail!("no .toml files found to validate");
    }

    let options = validator_options(&args.validator);
    if locate_validator(&options).is_none() {
        warn!(binary = %options.binary, "Vector CLI not found in PATH; every file will be reported invalid");
    }

    let text = matches!(args.format, OutputFormat::Text);
    let mut results = Vec::with_capacity(files.len());
    for file in files {
        let name = file.display().to_string();
        let entry = if !file.exists() {
            if text {
                println!("{}", format!("✗ {name}: file not found").red());
            }
            FileValidation {
                file,
                status: FileStatus::NotFound,
                diagnostics: String::new(),
            }
        } else {
            match validate_vector_config(&file, &options) {
                Ok(outcome) => {
                    if text && !(args.quiet && outcome.is_valid) {
                        println!("{}", render_validation(&name, &outcome, args.verbose));
                    }
                    FileValidation {
                        file,
                        status: if outcome.is_valid {
                            FileStatus::Valid
                        } else {
                            FileStatus::Invalid
                        },
                        diagnostics: outcome.diagnostics,
                    }
                }
                Err(err) => {
                    if text {
                        println!("{}", format!("✗ {name}: validation error: {err}").red());
                    }
                    FileValidation {
                        file,
                        status: FileStatus::Error,
                        diagnostics: err.to_string(),
                    }
                }
            }
        };
        results.push(entry);
    }

    let all_valid = results
        .iter()
        .all(|entry| matches!(entry.status, FileStatus::Valid));

    match args.format {
        OutputFormat::Text => {
            if all_valid && !args.quiet {
                println!();
                println!("{}", "All files are valid!".green());
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
    }

    if !all_valid {
        bail!("some files failed validation");
    }
    Ok(())
}

/// `*.toml` files directly inside `dir`, sorted.
fn toml_files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "toml") {
            files.push(path.strip_prefix(dir).map(Path::to_path_buf).unwrap_or(path));
        }
    }
    files.sort();
    Ok(files)
}
