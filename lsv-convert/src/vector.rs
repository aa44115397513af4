//! Target-side model: Vector components and the configuration that holds them.

use std::fmt::{self, Display, Formatter};

use logstash_conf_core::PluginCategory;
use serde::Serialize;

/// Component table a Vector component lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentCategory {
    Source,
    Transform,
    Sink,
}

impl ComponentCategory {
    /// Category produced for a plugin declared in the given block.
    pub fn for_plugin(category: PluginCategory) -> Self {
        match category {
            PluginCategory::Input => ComponentCategory::Source,
            PluginCategory::Filter => ComponentCategory::Transform,
            PluginCategory::Output => ComponentCategory::Sink,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ComponentCategory::Source => "source",
            ComponentCategory::Transform => "transform",
            ComponentCategory::Sink => "sink",
        }
    }

    /// Name of the top-level TOML table for this category.
    pub fn section(self) -> &'static str {
        match self {
            ComponentCategory::Source => "sources",
            ComponentCategory::Transform => "transforms",
            ComponentCategory::Sink => "sinks",
        }
    }
}

impl Display for ComponentCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single source, transform, or sink.
///
/// Transformers fill in `kind`, `settings`, and `comments`; the orchestrator
/// assigns `id` and `inputs` afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetComponent {
    pub category: ComponentCategory,
    /// Vector component type, for example `file` or `remap`.
    pub kind: String,
    pub id: String,
    pub settings: toml::Table,
    /// Identifiers of upstream components.
    pub inputs: Vec<String>,
    /// Annotation lines emitted as TOML comments above the component.
    pub comments: Vec<String>,
}

impl TargetComponent {
    pub fn new(category: ComponentCategory, kind: impl Into<String>) -> Self {
        Self {
            category,
            kind: kind.into(),
            id: String::new(),
            settings: toml::Table::new(),
            inputs: Vec::new(),
            comments: Vec::new(),
        }
    }

    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<toml::Value>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comments.push(comment.into());
        self
    }

    pub fn setting_str(&self, key: &str) -> Option<&str> {
        self.settings.get(key).and_then(toml::Value::as_str)
    }
}

/// Components produced for one pipeline file, grouped by category in
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TargetConfiguration {
    pub sources: Vec<TargetComponent>,
    pub transforms: Vec<TargetComponent>,
    pub sinks: Vec<TargetComponent>,
}

impl TargetConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_source(&mut self, component: TargetComponent) {
        self.sources.push(component);
    }

    pub fn add_transform(&mut self, component: TargetComponent) {
        self.transforms.push(component);
    }

    pub fn add_sink(&mut self, component: TargetComponent) {
        self.sinks.push(component);
    }

    /// Add a component to the list matching its category.
    pub fn add(&mut self, component: TargetComponent) {
        match component.category {
            ComponentCategory::Source => self.add_source(component),
            ComponentCategory::Transform => self.add_transform(component),
            ComponentCategory::Sink => self.add_sink(component),
        }
    }

    pub fn components(&self, category: ComponentCategory) -> &[TargetComponent] {
        match category {
            ComponentCategory::Source => &self.sources,
            ComponentCategory::Transform => &self.transforms,
            ComponentCategory::Sink => &self.sinks,
        }
    }

    /// Sources, then transforms, then sinks.
    pub fn all_components(&self) -> impl Iterator<Item = &TargetComponent> {
        self.sources
            .iter()
            .chain(self.transforms.iter())
            .chain(self.sinks.iter())
    }

    pub fn get(&self, id: &str) -> Option<&TargetComponent> {
        self.all_components().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.sources.len() + self.transforms.len() + self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
