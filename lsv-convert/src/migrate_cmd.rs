use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use lsv_convert::directory::{migrate_directory, DirectoryOptions};
use lsv_convert::migration_report::MigrationResult;
use lsv_convert::report::render_result;
use lsv_convert::TransformerRegistry;
use serde::Serialize;

use crate::cli::{MigrateArgs, OutputFormat};
use crate::{resolve_guidance, validator_options};

#[derive(Serialize)]
struct MigrateJson<'a> {
    dry_run: bool,
    report_path: Option<&'a PathBuf>,
    result: &'a MigrationResult,
}

pub fn run_migrate(args: MigrateArgs) -> Result<()> {
    let registry = TransformerRegistry::with_builtin();
    let guidance = resolve_guidance(args.guidance_file.as_deref());
    let options = DirectoryOptions {
        output_dir: args.output_dir.clone(),
        dry_run: args.dry_run,
        overwrite: args.overwrite,
        validate: !args.no_validate,
        report_path: args.report.clone(),
        validator: validator_options(&args.validator),
    };

    let text = matches!(args.format, OutputFormat::Text);
    if text && !args.quiet {
        println!(
            "{}",
            format!("Migrating Logstash configurations from: {}", args.dir.display()).cyan()
        );
        if args.dry_run {
            println!("{}", "DRY RUN MODE - No files will be written".yellow());
        }
        println!();
    }

    let run = migrate_directory(&args.dir, &options, &registry, &guidance)
        .with_context(|| format!("failed to migrate {}", args.dir.display()))?;

    match args.format {
        OutputFormat::Text => {
            if !args.quiet {
                println!("{}", render_result(&run.result, args.verbose));
                if let Some(path) = &run.report_path {
                    println!();
                    println!(
                        "{}",
                        format!("See {} for detailed information", path.display()).cyan()
                    );
                }
            }
        }
        OutputFormat::Json => {
            let payload = MigrateJson {
                dry_run: args.dry_run,
                report_path: run.report_path.as_ref(),
                result: &run.result,
            };
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
    }

    if run.result.failure_count > 0 {
        bail!("migration completed with {} failures", run.result.failure_count);
    }
    Ok(())
}
