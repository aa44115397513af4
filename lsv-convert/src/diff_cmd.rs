use std::fs;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use logstash_conf_core::parse_file;
use lsv_convert::diff::map_plugins;
use lsv_convert::report::render_mappings;

use crate::cli::{DiffArgs, OutputFormat};

pub fn run_diff(args: DiffArgs) -> Result<()> {
    if !args.conf.exists() {
        bail!("logstash file not found: {}", args.conf.display());
    }
    if !args.toml.exists() {
        bail!("vector file not found: {}", args.toml.display());
    }

    let source = parse_file(&args.conf)
        .with_context(|| format!("failed to parse Logstash config {}", args.conf.display()))?;
    let text = fs::read_to_string(&args.toml)
        .with_context(|| format!("failed to read {}", args.toml.display()))?;
    let target: toml::Table = toml::from_str(&text)
        .with_context(|| format!("failed to parse Vector config {}", args.toml.display()))?;

    let rows = map_plugins(&source, &target);

    match args.format {
        OutputFormat::Text => {
            println!("{}", "Configuration Comparison".cyan());
            println!("{}", "========================".cyan());
            println!();
            println!("Logstash: {}", args.conf.display());
            println!("Vector:   {}", args.toml.display());
            println!();
            print!("{}", render_mappings(&rows, args.verbose));
            println!();
            let unmapped = rows.iter().filter(|row| !row.is_mapped()).count();
            if unmapped > 0 {
                println!(
                    "{}",
                    format!("{unmapped} plugin(s) have no matching Vector component").yellow()
                );
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
    }
    Ok(())
}
