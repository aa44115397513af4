use std::fs;

use anyhow::{bail, Context, Result};
use lsv_convert::migrate::{default_target_path, migrate_file};
use lsv_convert::output_guard::check_output_path;
use lsv_convert::toml_writer::render_toml;
use lsv_convert::TransformerRegistry;

use crate::cli::{ConvertArgs, OutputFormat};
use crate::resolve_guidance;

pub fn run_convert(args: ConvertArgs) -> Result<()> {
    let registry = TransformerRegistry::with_builtin();
    let guidance = resolve_guidance(args.guidance_file.as_deref());
    let target = args
        .output
        .clone()
        .unwrap_or_else(|| default_target_path(&args.file));

    let outcome = migrate_file(&args.file, &target, &registry, &guidance);

    if let (Some(config), Some(output)) = (&outcome.config, &args.output) {
        check_output_path(output, &args.file, args.overwrite)?;
        fs::write(output, render_toml(config, &args.file, &outcome.placeholders))
            .with_context(|| format!("failed to write {}", output.display()))?;
    }

    match args.format {
        OutputFormat::Text => {
            if let (Some(config), None) = (&outcome.config, &args.output) {
                print!("{}", render_toml(config, &args.file, &outcome.placeholders));
            }
            if !args.quiet {
                for record in &outcome.report.unsupported {
                    eprintln!(
                        "unsupported: {} ({}) at line {}",
                        record.plugin_name, record.category, record.line
                    );
                }
                for warning in &outcome.report.warnings {
                    eprintln!("warning: {warning}");
                }
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
    }

    if outcome.report.has_errors() {
        for err in &outcome.report.errors {
            eprintln!("error: {err}");
        }
        bail!("convert failed: {} errors", outcome.report.errors.len());
    }
    Ok(())
}
