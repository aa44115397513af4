//! Placeholder components and report entries for plugins that no
//! transformer supports.

use logstash_conf_core::{Settings, SourcePlugin, Value};

use crate::guidance::GuidanceTable;
use crate::migration_report::UnsupportedPluginRecord;
use crate::vector::{ComponentCategory, TargetComponent};

/// Build the commented `remap` stand-in for an unsupported plugin.
///
/// The component keeps the original settings in its comments and marks the
/// plugin with `_unsupported_plugin` / `_original_type`.
pub fn placeholder(plugin: &SourcePlugin, guidance: &GuidanceTable) -> TargetComponent {
    let mut component = TargetComponent::new(ComponentCategory::for_plugin(plugin.category), "remap")
        .with_setting("_unsupported_plugin", plugin.name.as_str())
        .with_setting("_original_type", plugin.category.keyword())
        .with_comment(format!(
            "TODO: Manually migrate {} {} plugin",
            plugin.category, plugin.name
        ))
        .with_comment("")
        .with_comment("Original Logstash configuration:");

    let original = format_settings(&plugin.settings, "");
    if !original.is_empty() {
        component.comments.push(original);
    }

    component.comments.push(String::new());
    component.comments.push("Migration guidance:".to_string());
    component
        .comments
        .push(guidance.guidance_for(&plugin.name, plugin.category));
    component
}

/// Build the report entry for an unsupported plugin.
pub fn record(plugin: &SourcePlugin, guidance: &GuidanceTable) -> UnsupportedPluginRecord {
    UnsupportedPluginRecord {
        plugin_name: plugin.name.clone(),
        category: plugin.category,
        line: plugin.line,
        original_config: format_settings(&plugin.settings, "  "),
        guidance: guidance.guidance_for(&plugin.name, plugin.category),
        alternatives: guidance.alternatives_for(&plugin.name, plugin.category),
    }
}

/// Render settings back into Logstash `key => value` lines.
pub fn format_settings(settings: &Settings, indent: &str) -> String {
    let mut lines = Vec::with_capacity(settings.len());
    for (key, value) in settings {
        match value {
            Value::Map(map) => {
                lines.push(format!("{indent}{key} => {{"));
                for (k, v) in map {
                    lines.push(format!("{indent}  \"{k}\" => \"{v}\""));
                }
                lines.push(format!("{indent}}}"));
            }
            other => lines.push(format!("{indent}{key} => {other}")),
        }
    }
    lines.join("\n")
}
