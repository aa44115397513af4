//! Markdown rendering of migration reports.

use crate::migration_report::{MigrationReport, MigrationResult};

/// Render one file's report.
pub fn report_markdown(report: &MigrationReport) -> String {
    let mut lines: Vec<String> = vec![
        "# Migration Report".to_string(),
        String::new(),
        format!("**Source:** `{}`", report.source_file.display()),
        format!("**Target:** `{}`", report.target_file.display()),
        format!("**Generated:** {}", report.timestamp.format("%Y-%m-%dT%H:%M:%S")),
        format!("**Success Rate:** {:.1}%", report.success_rate()),
        String::new(),
        "## Summary".to_string(),
        format!("- ✅ Successfully migrated: {} plugins", report.supported.len()),
        format!("- ⚠️  Unsupported plugins: {}", report.unsupported.len()),
        format!("- ❌ Errors: {}", report.errors.len()),
        String::new(),
    ];

    if !report.supported.is_empty() {
        lines.push("## Successfully Migrated Plugins".to_string());
        lines.push(String::new());
        for plugin in &report.supported {
            lines.push(format!("### {} ({})", plugin.plugin_name, plugin.category));
            lines.push(format!("- **Vector components:** {}", plugin.components.join(", ")));
            if !plugin.notes.is_empty() {
                lines.push(format!("- **Notes:** {}", plugin.notes));
            }
            lines.push(String::new());
        }
    }

    if !report.unsupported.is_empty() {
        lines.push("## Unsupported Plugins (Manual Migration Required)".to_string());
        lines.push(String::new());
        for plugin in &report.unsupported {
            lines.push(format!("### {} (line {})", plugin.plugin_name, plugin.line));
            lines.push(format!("- **Type:** {}", plugin.category));
            lines.push(String::new());

            if !plugin.original_config.is_empty() {
                lines.push("**Original Configuration:**".to_string());
                lines.push("```".to_string());
                lines.push(plugin.original_config.clone());
                lines.push("```".to_string());
                lines.push(String::new());
            }

            if !plugin.guidance.is_empty() {
                lines.push("**Migration Guidance:**".to_string());
                lines.push(plugin.guidance.clone());
                lines.push(String::new());
            }

            if !plugin.alternatives.is_empty() {
                lines.push("**Vector Alternatives:**".to_string());
                for alternative in &plugin.alternatives {
                    lines.push(format!("- {alternative}"));
                }
                lines.push(String::new());
            }
        }
    }

    if !report.errors.is_empty() {
        lines.push("## Errors".to_string());
        lines.push(String::new());
        for err in &report.errors {
            lines.push(format!("- **{}:** {err}", err.kind));
        }
        lines.push(String::new());
    }

    if !report.warnings.is_empty() {
        lines.push("## Warnings".to_string());
        lines.push(String::new());
        for warning in &report.warnings {
            lines.push(format!("- {warning}"));
        }
        lines.push(String::new());
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Render the report for a whole directory run.
pub fn combined_markdown(result: &MigrationResult) -> String {
    let mut lines: Vec<String> = vec![
        "# Combined Migration Report".to_string(),
        String::new(),
        format!("**Total Files Migrated:** {}", result.reports.len()),
        String::new(),
        "## Overall Statistics".to_string(),
        format!("- ✅ Successfully migrated plugins: {}", result.total_supported()),
        format!("- ⚠️  Unsupported plugins: {}", result.total_unsupported()),
        format!("- ❌ Total errors: {}", result.total_errors()),
        String::new(),
        "## Individual File Reports".to_string(),
        String::new(),
    ];

    for (idx, report) in result.reports.iter().enumerate() {
        lines.push(format!("### {}. {}", idx + 1, report.source_file.display()));
        lines.push(String::new());
        lines.push(format!("**Target:** `{}`", report.target_file.display()));
        lines.push(format!("**Success Rate:** {:.1}%", report.success_rate()));
        lines.push(format!("- Supported: {}", report.supported.len()));
        lines.push(format!("- Unsupported: {}", report.unsupported.len()));
        lines.push(format!("- Errors: {}", report.errors.len()));
        lines.push(String::new());

        if !report.unsupported.is_empty() {
            lines.push("**Unsupported Plugins:**".to_string());
            for plugin in &report.unsupported {
                lines.push(format!(
                    "- {} ({}) at line {}",
                    plugin.plugin_name, plugin.category, plugin.line
                ));
            }
            lines.push(String::new());
        }

        if !report.errors.is_empty() {
            lines.push("**Errors:**".to_string());
            for err in &report.errors {
                lines.push(format!("- {err}"));
            }
            lines.push(String::new());
        }

        lines.push("---".to_string());
        lines.push(String::new());
    }

    lines.push("## Detailed Reports".to_string());
    lines.push(String::new());
    let mut out = lines.join("\n");
    out.push('\n');

    for (idx, report) in result.reports.iter().enumerate() {
        out.push_str(&format!("### File {}: {}\n\n", idx + 1, report.source_file.display()));
        out.push_str(&report_markdown(report));
        out.push_str("\n---\n\n");
    }

    out
}
