//! Side-by-side mapping between a Logstash pipeline and a Vector TOML file.

use std::collections::HashSet;

use logstash_conf_core::{PluginCategory, Settings, SourceConfiguration};
use serde::Serialize;

use crate::vector::ComponentCategory;

/// One Logstash plugin and the Vector component generated for it, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginMapping {
    pub category: PluginCategory,
    pub plugin_name: String,
    pub line: usize,
    pub component_id: Option<String>,
    /// Vector `type` of the matched component.
    pub component_kind: Option<String>,
    #[serde(skip)]
    pub settings: Settings,
}

impl PluginMapping {
    pub fn is_mapped(&self) -> bool {
        self.component_id.is_some()
    }
}

/// Match each plugin to a component whose id starts with
/// `<name>_<category>_`, preferring the one with the plugin's own index.
pub fn map_plugins(source: &SourceConfiguration, target: &toml::Table) -> Vec<PluginMapping> {
    let mut rows = Vec::new();
    for category in PluginCategory::ALL {
        let component_category = ComponentCategory::for_plugin(category);
        let section = target
            .get(component_category.section())
            .and_then(toml::Value::as_table);
        let mut used: HashSet<String> = HashSet::new();

        for (index, plugin) in source.plugins(category).iter().enumerate() {
            let prefix = format!("{}_{component_category}_", plugin.name);
            let exact = format!("{prefix}{index}");
            let matched = section.and_then(|table| {
                if table.contains_key(&exact) && !used.contains(&exact) {
                    Some(exact.clone())
                } else {
                    table
                        .keys()
                        .find(|id| id.starts_with(&prefix) && !used.contains(*id))
                        .cloned()
                }
            });

            let component_kind = matched.as_ref().and_then(|id| {
                section
                    .and_then(|table| table.get(id))
                    .and_then(|component| component.get("type"))
                    .and_then(toml::Value::as_str)
                    .map(str::to_string)
            });
            if let Some(id) = &matched {
                used.insert(id.clone());
            }

            rows.push(PluginMapping {
                category,
                plugin_name: plugin.name.clone(),
                line: plugin.line,
                component_id: matched,
                component_kind,
                settings: plugin.settings.clone(),
            });
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::map_plugins;
    use logstash_conf_core::{parse, PluginCategory};

    #[test]
    fn maps_by_id_prefix_and_flags_missing() {
        let source = parse(
            r#"
            input { file { } kafka { } }
            filter { mutate { } }
            output { file { } }
            "#,
            "p.conf",
        )
        .expect("parse");
        let target: toml::Table = toml::from_str(
            r#"
            [sources.file_source_0]
            type = "file"

            [transforms.mutate_transform_0]
            type = "remap"
            inputs = ["file_source_0"]

            [sinks.file_sink_0]
            type = "file"
            inputs = ["mutate_transform_0"]
            "#,
        )
        .expect("toml");

        let rows = map_plugins(&source, &target);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].component_id.as_deref(), Some("file_source_0"));
        assert_eq!(rows[0].component_kind.as_deref(), Some("file"));
        assert_eq!(rows[1].plugin_name, "kafka");
        assert!(!rows[1].is_mapped());
        assert_eq!(rows[2].category, PluginCategory::Filter);
        assert_eq!(rows[2].component_kind.as_deref(), Some("remap"));
        assert_eq!(rows[3].component_id.as_deref(), Some("file_sink_0"));
    }

    #[test]
    fn repeated_plugins_each_claim_their_own_component() {
        let source = parse(
            "input { file { } file { } } output { file { } }",
            "p.conf",
        )
        .expect("parse");
        let target: toml::Table = toml::from_str(
            "[sources.file_source_0]\ntype = \"file\"\n[sources.file_source_1]\ntype = \"file\"\n",
        )
        .expect("toml");

        let rows = map_plugins(&source, &target);
        assert_eq!(rows[0].component_id.as_deref(), Some("file_source_0"));
        assert_eq!(rows[1].component_id.as_deref(), Some("file_source_1"));
        assert!(!rows[2].is_mapped());
    }
}
