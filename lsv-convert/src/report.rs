use colored::Colorize;
use logstash_conf_core::PluginCategory;

use crate::diff::PluginMapping;
use crate::migration_report::{MigrationReport, MigrationResult};
use crate::transform::unsupported::format_settings;
use crate::validator::ValidationOutcome;

/// Render the summary of a directory run for terminal output.
pub fn render_result(result: &MigrationResult, verbose: bool) -> String {
    let mut out = vec![
        "Migration Results:".to_string(),
        "==================".to_string(),
        format!("Total files: {}", result.total_files),
    ];
    if result.success_count > 0 {
        out.push(
            format!("✓ Successfully migrated: {}", result.success_count)
                .green()
                .to_string(),
        );
    }
    if result.failure_count > 0 {
        out.push(format!("✗ Failed: {}", result.failure_count).red().to_string());
    }
    out.push(String::new());

    if verbose {
        for (idx, report) in result.reports.iter().enumerate() {
            append_report(&mut out, idx + 1, report);
        }
    }

    out.push("Plugin Summary:".to_string());
    out.push(
        format!("  ✓ Supported plugins: {}", result.total_supported())
            .green()
            .to_string(),
    );
    let unsupported = result.total_unsupported();
    if unsupported > 0 {
        out.push(
            format!("  ⚠ Unsupported plugins: {unsupported} (manual migration required)")
                .yellow()
                .to_string(),
        );
    }
    let errors = result.total_errors();
    if errors > 0 {
        out.push(format!("  ✗ Errors: {errors}").red().to_string());
    }
    out.join("\n")
}

fn append_report(out: &mut Vec<String>, number: usize, report: &MigrationReport) {
    out.push(format!("{number}. {}", report.source_file.display()));
    out.push(format!("   Target: {}", report.target_file.display()));
    out.push(format!("   Success rate: {:.1}%", report.success_rate()));
    out.push(format!(
        "   Supported: {}, Unsupported: {}, Errors: {}",
        report.supported.len(),
        report.unsupported.len(),
        report.errors.len()
    ));
    if !report.errors.is_empty() {
        out.push("   Errors:".red().to_string());
        for err in &report.errors {
            out.push(format!("     - {err}"));
        }
    }
    for warning in &report.warnings {
        out.push(format!("   {}", format!("warning: {warning}").yellow()));
    }
    out.push(String::new());
}

/// Render the plugin → component mapping, grouped by block.
pub fn render_mappings(rows: &[PluginMapping], verbose: bool) -> String {
    let mut out = Vec::new();
    for category in PluginCategory::ALL {
        let group: Vec<&PluginMapping> = rows.iter().filter(|r| r.category == category).collect();
        if group.is_empty() {
            continue;
        }
        let title = match category {
            PluginCategory::Input => "Inputs → Sources",
            PluginCategory::Filter => "Filters → Transforms",
            PluginCategory::Output => "Outputs → Sinks",
        };
        out.push(title.yellow().to_string());
        out.push("-".repeat(title.chars().count()).yellow().to_string());

        for (idx, row) in group.iter().enumerate() {
            let target = match (&row.component_id, &row.component_kind) {
                (Some(id), Some(kind)) => format!("{id} ({kind})").green().to_string(),
                (Some(id), None) => id.green().to_string(),
                (None, _) => "unmapped".red().to_string(),
            };
            out.push(format!(
                "{}. {} ({}, line {}) → {target}",
                idx + 1,
                row.plugin_name,
                row.category,
                row.line
            ));
            if verbose {
                let settings = format_settings(&row.settings, "    ");
                if !settings.is_empty() {
                    out.push(settings);
                }
            }
        }
        out.push(String::new());
    }
    out.join("\n")
}

/// One status line for a validated file.
pub fn render_validation(file: &str, outcome: &ValidationOutcome, verbose: bool) -> String {
    if outcome.is_valid {
        return format!("✓ {file}: valid").green().to_string();
    }
    let mut line = format!("✗ {file}: invalid").red().to_string();
    let diagnostics = outcome.diagnostics.trim();
    if verbose && !diagnostics.is_empty() {
        line.push('\n');
        line.push_str(diagnostics);
    }
    line
}
