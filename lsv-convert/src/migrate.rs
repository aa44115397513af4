//! Pipeline orchestration: turn a parsed Logstash configuration into a wired
//! Vector configuration plus a migration report.

use std::path::{Path, PathBuf};

use logstash_conf_core::{parse_file, PluginCategory, SourceConfiguration, SourcePlugin};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::guidance::GuidanceTable;
use crate::migration_report::{ErrorKind, MigrationError, MigrationReport, SupportedPluginRecord};
use crate::transform::{unsupported, Transformer, TransformerRegistry};
use crate::vector::{ComponentCategory, TargetComponent, TargetConfiguration};

/// Result of migrating one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MigrationOutcome {
    /// `None` when the file could not produce a runnable configuration.
    pub config: Option<TargetConfiguration>,
    /// Stand-ins for unsupported plugins. Never wired, never counted as a
    /// source or sink.
    pub placeholders: Vec<TargetComponent>,
    pub report: MigrationReport,
}

impl MigrationOutcome {
    pub fn is_success(&self) -> bool {
        self.config.is_some() && !self.report.has_errors()
    }
}

/// Identifier for the `index`-th plugin of a category.
pub fn component_id(plugin_name: &str, category: ComponentCategory, index: usize) -> String {
    format!("{plugin_name}_{category}_{index}")
}

/// Sibling `.toml` path for a source file.
pub fn default_target_path(source: &Path) -> PathBuf {
    source.with_extension("toml")
}

/// Parse and migrate a single file.
///
/// A parse failure produces a report with one `parse_error` entry and no
/// configuration.
pub fn migrate_file(
    path: &Path,
    target_file: &Path,
    registry: &TransformerRegistry,
    guidance: &GuidanceTable,
) -> MigrationOutcome {
    match parse_file(path) {
        Ok(source) => migrate_config(&source, target_file, registry, guidance),
        Err(err) => {
            warn!(file = %path.display(), error = %err, "failed to parse pipeline");
            let mut report = MigrationReport::new(path, target_file);
            report.add_error(MigrationError::new(
                ErrorKind::ParseError,
                path,
                format!("failed to parse file: {err}"),
            ));
            MigrationOutcome {
                config: None,
                placeholders: Vec::new(),
                report,
            }
        }
    }
}

/// Translate a parsed configuration.
///
/// Stages run inputs, then filters, then outputs. Each transform is wired to
/// the previous transform, or to every source when it is the first; sinks
/// are wired to the last transform, or to every source when there are no
/// transforms.
pub fn migrate_config(
    source: &SourceConfiguration,
    target_file: &Path,
    registry: &TransformerRegistry,
    guidance: &GuidanceTable,
) -> MigrationOutcome {
    let mut run = Migration {
        registry,
        guidance,
        file: &source.file_path,
        config: TargetConfiguration::new(),
        placeholders: Vec::new(),
        source_ids: Vec::new(),
        transform_ids: Vec::new(),
        report: MigrationReport::new(&source.file_path, target_file),
    };

    for category in PluginCategory::ALL {
        for (index, plugin) in source.plugins(category).iter().enumerate() {
            run.migrate_plugin(index, plugin);
        }
    }

    run.finish()
}

struct Migration<'a> {
    registry: &'a TransformerRegistry,
    guidance: &'a GuidanceTable,
    file: &'a Path,
    config: TargetConfiguration,
    placeholders: Vec<TargetComponent>,
    source_ids: Vec<String>,
    transform_ids: Vec<String>,
    report: MigrationReport,
}

impl Migration<'_> {
    fn migrate_plugin(&mut self, index: usize, plugin: &SourcePlugin) {
        let category = ComponentCategory::for_plugin(plugin.category);
        let id = component_id(&plugin.name, category, index);

        if let Some(condition) = &plugin.conditional {
            warn!(plugin = %plugin.name, line = plugin.line, condition = %condition, "plugin inside conditional");
            self.report.warnings.push(format!(
                "{} {} at line {} is inside conditional `{condition}`; branching was flattened, review manually",
                plugin.name, plugin.category, plugin.line
            ));
        }

        let Some(transformer) = self.registry.lookup(plugin.category, &plugin.name) else {
            warn!(plugin = %plugin.name, category = %plugin.category, line = plugin.line, "unsupported plugin");
            let mut placeholder = unsupported::placeholder(plugin, self.guidance);
            placeholder.id = id;
            self.placeholders.push(placeholder);
            self.report
                .unsupported
                .push(unsupported::record(plugin, self.guidance));
            return;
        };

        debug!(plugin = %plugin.name, category = %plugin.category, ?transformer, "dispatching");
        let mut component = match transformer.transform(plugin) {
            Ok(component) => component,
            Err(err) => {
                warn!(plugin = %plugin.name, line = plugin.line, error = %err, "transformer failed");
                self.report.add_error(
                    MigrationError::new(
                        ErrorKind::TransformationError,
                        self.file,
                        format!("failed to transform {} {}: {err}", plugin.name, plugin.category),
                    )
                    .at_line(plugin.line),
                );
                return;
            }
        };

        component.id = id.clone();
        component.inputs = self.upstream(category);
        if let Some(condition) = &plugin.conditional {
            component
                .comments
                .push(format!("NOTE: migrated from inside `{condition}`; branching was flattened"));
        }

        match category {
            ComponentCategory::Source => self.source_ids.push(id.clone()),
            ComponentCategory::Transform => self.transform_ids.push(id.clone()),
            ComponentCategory::Sink => {}
        }

        self.report.supported.push(SupportedPluginRecord {
            plugin_name: plugin.name.clone(),
            category: plugin.category,
            line: plugin.line,
            components: vec![id],
            notes: format!("Migrated to Vector {} {category}", component.kind),
        });
        self.config.add(component);
    }

    fn upstream(&self, category: ComponentCategory) -> Vec<String> {
        match category {
            ComponentCategory::Source => Vec::new(),
            ComponentCategory::Transform | ComponentCategory::Sink => match self.transform_ids.last() {
                Some(last) => vec![last.clone()],
                None => self.source_ids.clone(),
            },
        }
    }

    fn finish(mut self) -> MigrationOutcome {
        let mut complete = true;
        if self.config.sources.is_empty() {
            self.report.add_error(MigrationError::new(
                ErrorKind::TransformationError,
                self.file,
                "no source components generated - cannot create valid Vector config",
            ));
            complete = false;
        }
        if self.config.sinks.is_empty() {
            self.report.add_error(MigrationError::new(
                ErrorKind::TransformationError,
                self.file,
                "no sink components generated - cannot create valid Vector config",
            ));
            complete = false;
        }

        info!(
            file = %self.file.display(),
            supported = self.report.supported.len(),
            unsupported = self.report.unsupported.len(),
            errors = self.report.errors.len(),
            "migrated pipeline"
        );

        MigrationOutcome {
            config: complete.then_some(self.config),
            placeholders: self.placeholders,
            report: self.report,
        }
    }
}
