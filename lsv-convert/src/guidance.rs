use std::fs;
use std::path::Path;

use logstash_conf_core::PluginCategory;
use serde::Deserialize;
use thiserror::Error;

/// Manual-migration hints for one Logstash plugin name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PluginGuidance {
    pub name: String,
    pub guidance: String,
    #[serde(default)]
    pub alternatives: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct GuidanceFile {
    plugin: Vec<PluginGuidance>,
}

/// Errors returned when loading guidance files.
#[derive(Debug, Error)]
pub enum GuidanceLoadError {
    #[error("failed to read guidance file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse guidance file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Lookup table from plugin name to guidance, with generic text per
/// category for plugins that have no entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuidanceTable {
    entries: Vec<PluginGuidance>,
}

impl GuidanceTable {
    pub fn new(entries: Vec<PluginGuidance>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[PluginGuidance] {
        &self.entries
    }

    pub fn lookup(&self, plugin_name: &str) -> Option<&PluginGuidance> {
        self.entries.iter().find(|e| e.name == plugin_name)
    }

    pub fn guidance_for(&self, plugin_name: &str, category: PluginCategory) -> String {
        match self.lookup(plugin_name) {
            Some(entry) => entry.guidance.clone(),
            None => generic_guidance(category).to_string(),
        }
    }

    pub fn alternatives_for(&self, plugin_name: &str, category: PluginCategory) -> Vec<String> {
        match self.lookup(plugin_name) {
            Some(entry) if !entry.alternatives.is_empty() => entry.alternatives.clone(),
            _ => vec![generic_reference(category).to_string()],
        }
    }
}

impl Default for GuidanceTable {
    fn default() -> Self {
        default_guidance()
    }
}

fn generic_guidance(category: PluginCategory) -> &'static str {
    match category {
        PluginCategory::Input => {
            "Search for equivalent Vector sources at:\nhttps://vector.dev/docs/reference/configuration/sources/"
        }
        PluginCategory::Filter => {
            "Consider implementing this logic in Vector Remap Language (VRL).\nSee: https://vector.dev/docs/reference/vrl/"
        }
        PluginCategory::Output => {
            "Search for equivalent Vector sinks at:\nhttps://vector.dev/docs/reference/configuration/sinks/"
        }
    }
}

fn generic_reference(category: PluginCategory) -> &'static str {
    match category {
        PluginCategory::Input => "https://vector.dev/docs/reference/configuration/sources/",
        PluginCategory::Filter => "https://vector.dev/docs/reference/configuration/transforms/",
        PluginCategory::Output => "https://vector.dev/docs/reference/configuration/sinks/",
    }
}

/// Load a guidance table from a TOML file.
pub fn load_guidance(path: &Path) -> Result<GuidanceTable, GuidanceLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| GuidanceLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    parse_guidance(&raw, path.display().to_string())
}

/// Built-in guidance table.
pub fn default_guidance() -> GuidanceTable {
    let embedded = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/mappings/guidance.toml"));
    match parse_guidance(embedded, "embedded guidance".to_string()) {
        Ok(table) if !table.entries.is_empty() => table,
        _ => fallback_guidance(),
    }
}

fn parse_guidance(raw: &str, path: String) -> Result<GuidanceTable, GuidanceLoadError> {
    let parsed: GuidanceFile =
        toml::from_str(raw).map_err(|source| GuidanceLoadError::Parse { path, source })?;
    Ok(GuidanceTable::new(parsed.plugin))
}

fn fallback_guidance() -> GuidanceTable {
    GuidanceTable::new(vec![
        PluginGuidance {
            name: "kafka".to_string(),
            guidance: "The Logstash kafka plugin can be migrated to Vector's kafka source/sink."
                .to_string(),
            alternatives: vec![
                "kafka source: https://vector.dev/docs/reference/configuration/sources/kafka/"
                    .to_string(),
                "kafka sink: https://vector.dev/docs/reference/configuration/sinks/kafka/"
                    .to_string(),
            ],
        },
        PluginGuidance {
            name: "ruby".to_string(),
            guidance: "Ruby filter logic should be reimplemented in Vector Remap Language (VRL)."
                .to_string(),
            alternatives: vec![
                "remap transform: https://vector.dev/docs/reference/configuration/transforms/remap/"
                    .to_string(),
            ],
        },
    ])
}
