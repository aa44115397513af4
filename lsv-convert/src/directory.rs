//! Migrate every `.conf` file under a directory.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::discover::find_conf_files;
use crate::guidance::GuidanceTable;
use crate::markdown::combined_markdown;
use crate::migrate::{default_target_path, migrate_file, MigrationOutcome};
use crate::migration_report::{ErrorKind, MigrationError, MigrationResult};
use crate::output_guard::check_output_path;
use crate::toml_writer::render_toml;
use crate::transform::TransformerRegistry;
use crate::validator::{locate_validator, validate_vector_config, ValidatorOptions};

pub const DEFAULT_REPORT_NAME: &str = "migration-report.md";

#[derive(Debug, Clone)]
pub struct DirectoryOptions {
    /// Write outputs here instead of next to each source file.
    pub output_dir: Option<PathBuf>,
    pub dry_run: bool,
    pub overwrite: bool,
    pub validate: bool,
    pub report_path: Option<PathBuf>,
    pub validator: ValidatorOptions,
}

impl Default for DirectoryOptions {
    fn default() -> Self {
        Self {
            output_dir: None,
            dry_run: false,
            overwrite: false,
            validate: true,
            report_path: None,
            validator: ValidatorOptions::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("directory not found or not accessible: {0}")]
    NotADirectory(PathBuf),
    #[error("failed to scan {path}: {source}")]
    Scan {
        path: PathBuf,
        source: walkdir::Error,
    },
    #[error("no .conf files found in {0}")]
    NoConfFiles(PathBuf),
    #[error("failed to create output directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("failed to write migration report {path}: {source}")]
    WriteReport { path: PathBuf, source: io::Error },
}

/// Outcome of a directory run.
#[derive(Debug, Clone)]
pub struct DirectoryRun {
    pub result: MigrationResult,
    /// Where the combined report was written; `None` on a dry run.
    pub report_path: Option<PathBuf>,
}

/// Output location for `source`: `<output_dir>/<stem>.toml`, or the sibling
/// `.toml` file.
pub fn target_path_for(source: &Path, output_dir: Option<&Path>) -> PathBuf {
    match output_dir {
        Some(dir) => {
            let stem = source.file_stem().unwrap_or_default();
            dir.join(Path::new(stem).with_extension("toml"))
        }
        None => default_target_path(source),
    }
}

pub fn migrate_directory(
    dir: &Path,
    options: &DirectoryOptions,
    registry: &TransformerRegistry,
    guidance: &GuidanceTable,
) -> Result<DirectoryRun, DirectoryError> {
    if !dir.is_dir() {
        return Err(DirectoryError::NotADirectory(dir.to_path_buf()));
    }

    let files = find_conf_files(dir).map_err(|source| DirectoryError::Scan {
        path: dir.to_path_buf(),
        source,
    })?;
    if files.is_empty() {
        return Err(DirectoryError::NoConfFiles(dir.to_path_buf()));
    }
    info!(dir = %dir.display(), files = files.len(), dry_run = options.dry_run, "migrating directory");

    if let Some(output_dir) = options.output_dir.as_deref().filter(|_| !options.dry_run) {
        fs::create_dir_all(output_dir).map_err(|source| DirectoryError::CreateDir {
            path: output_dir.to_path_buf(),
            source,
        })?;
    }

    let mut result = MigrationResult::default();
    let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();

    for source in files {
        let target = target_path_for(&source, options.output_dir.as_deref());
        let mut outcome = migrate_file(&source, &target, registry, guidance);

        if !options.dry_run && outcome.config.is_some() {
            if let Some(previous) = claimed.get(&target) {
                outcome.report.add_error(MigrationError::new(
                    ErrorKind::TransformationError,
                    &source,
                    format!(
                        "output {} is already produced from {}",
                        target.display(),
                        previous.display()
                    ),
                ));
            } else {
                claimed.insert(target.clone(), source.clone());
                write_target(&mut outcome, &source, &target, options);
            }
        }

        result.add_report(outcome.report);
    }

    let report_path = if options.dry_run {
        None
    } else {
        let path = options.report_path.clone().unwrap_or_else(|| {
            options
                .output_dir
                .as_deref()
                .unwrap_or(dir)
                .join(DEFAULT_REPORT_NAME)
        });
        fs::write(&path, combined_markdown(&result)).map_err(|source| DirectoryError::WriteReport {
            path: path.clone(),
            source,
        })?;
        info!(report = %path.display(), "wrote migration report");
        Some(path)
    };

    Ok(DirectoryRun {
        result,
        report_path,
    })
}

fn write_target(outcome: &mut MigrationOutcome, source: &Path, target: &Path, options: &DirectoryOptions) {
    let Some(config) = &outcome.config else {
        return;
    };
    let report = &mut outcome.report;

    if let Err(err) = check_output_path(target, source, options.overwrite) {
        warn!(target = %target.display(), error = %err, "not writing output");
        report.add_error(MigrationError::new(ErrorKind::TransformationError, target, err.to_string()));
        return;
    }

    let rendered = render_toml(config, source, &outcome.placeholders);
    if let Err(err) = fs::write(target, rendered) {
        report.add_error(MigrationError::new(
            ErrorKind::TransformationError,
            target,
            format!("failed to write TOML file: {err}"),
        ));
        return;
    }
    debug!(target = %target.display(), "wrote vector config");

    if !options.validate || report.has_errors() {
        return;
    }
    if locate_validator(&options.validator).is_none() {
        report.warnings.push(format!(
            "validation skipped: {} not found in PATH",
            options.validator.binary
        ));
        return;
    }
    match validate_vector_config(target, &options.validator) {
        Ok(validation) if validation.is_valid => {}
        Ok(validation) => report.add_error(MigrationError::new(
            ErrorKind::ValidationError,
            target,
            format!("Vector validation failed: {}", validation.diagnostics.trim()),
        )),
        Err(err) => report.add_error(MigrationError::new(
            ErrorKind::ValidationError,
            target,
            format!("Vector validation failed: {err}"),
        )),
    }
}
