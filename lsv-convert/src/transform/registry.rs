use logstash_conf_core::{PluginCategory, SourcePlugin};

use super::{filters, inputs, outputs, TransformError, Transformer};
use crate::vector::TargetComponent;

/// Every plugin transformer this crate knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginTransformer {
    FileInput,
    BeatsInput,
    Grok,
    Mutate,
    Date,
    Elasticsearch,
    FileOutput,
}

impl PluginTransformer {
    /// Logstash plugin name handled by this transformer.
    pub fn plugin_name(self) -> &'static str {
        match self {
            PluginTransformer::FileInput | PluginTransformer::FileOutput => "file",
            PluginTransformer::BeatsInput => "beats",
            PluginTransformer::Grok => "grok",
            PluginTransformer::Mutate => "mutate",
            PluginTransformer::Date => "date",
            PluginTransformer::Elasticsearch => "elasticsearch",
        }
    }

    /// Block the transformer is registered for.
    pub fn category(self) -> PluginCategory {
        match self {
            PluginTransformer::FileInput | PluginTransformer::BeatsInput => PluginCategory::Input,
            PluginTransformer::Grok | PluginTransformer::Mutate | PluginTransformer::Date => {
                PluginCategory::Filter
            }
            PluginTransformer::Elasticsearch | PluginTransformer::FileOutput => {
                PluginCategory::Output
            }
        }
    }
}

impl Transformer for PluginTransformer {
    fn supports(&self, plugin_name: &str) -> bool {
        self.plugin_name() == plugin_name
    }

    fn transform(&self, plugin: &SourcePlugin) -> Result<TargetComponent, TransformError> {
        match self {
            PluginTransformer::FileInput => inputs::file_source(plugin),
            PluginTransformer::BeatsInput => inputs::beats_source(plugin),
            PluginTransformer::Grok => filters::grok_transform(plugin),
            PluginTransformer::Mutate => filters::mutate_transform(plugin),
            PluginTransformer::Date => filters::date_transform(plugin),
            PluginTransformer::Elasticsearch => outputs::elasticsearch_sink(plugin),
            PluginTransformer::FileOutput => outputs::file_sink(plugin),
        }
    }
}

/// Ordered transformer lists, one per plugin category.
///
/// Lookup returns the first transformer in the plugin's category that
/// supports its name.
#[derive(Debug, Clone, Default)]
pub struct TransformerRegistry {
    inputs: Vec<PluginTransformer>,
    filters: Vec<PluginTransformer>,
    outputs: Vec<PluginTransformer>,
}

impl TransformerRegistry {
    /// Registry with no transformers; every plugin is unsupported.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry holding all built-in transformers.
    pub fn with_builtin() -> Self {
        let mut registry = Self::empty();
        for transformer in [
            PluginTransformer::FileInput,
            PluginTransformer::BeatsInput,
            PluginTransformer::Grok,
            PluginTransformer::Mutate,
            PluginTransformer::Date,
            PluginTransformer::Elasticsearch,
            PluginTransformer::FileOutput,
        ] {
            registry.register(transformer);
        }
        registry
    }

    /// Append a transformer to the list for its category.
    pub fn register(&mut self, transformer: PluginTransformer) {
        self.list_mut(transformer.category()).push(transformer);
    }

    pub fn lookup(&self, category: PluginCategory, plugin_name: &str) -> Option<PluginTransformer> {
        self.list(category)
            .iter()
            .copied()
            .find(|t| t.supports(plugin_name))
    }

    pub fn is_supported(&self, category: PluginCategory, plugin_name: &str) -> bool {
        self.lookup(category, plugin_name).is_some()
    }

    pub fn list(&self, category: PluginCategory) -> &[PluginTransformer] {
        match category {
            PluginCategory::Input => &self.inputs,
            PluginCategory::Filter => &self.filters,
            PluginCategory::Output => &self.outputs,
        }
    }

    fn list_mut(&mut self, category: PluginCategory) -> &mut Vec<PluginTransformer> {
        match category {
            PluginCategory::Input => &mut self.inputs,
            PluginCategory::Filter => &mut self.filters,
            PluginCategory::Output => &mut self.outputs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PluginTransformer, TransformerRegistry};
    use logstash_conf_core::PluginCategory;

    #[test]
    fn builtin_registry_resolves_by_category() {
        let registry = TransformerRegistry::with_builtin();
        assert_eq!(
            registry.lookup(PluginCategory::Input, "file"),
            Some(PluginTransformer::FileInput)
        );
        assert_eq!(
            registry.lookup(PluginCategory::Output, "file"),
            Some(PluginTransformer::FileOutput)
        );
        assert_eq!(registry.lookup(PluginCategory::Filter, "file"), None);
        assert!(registry.is_supported(PluginCategory::Filter, "date"));
        assert!(!registry.is_supported(PluginCategory::Input, "kafka"));
    }

    #[test]
    fn empty_registry_supports_nothing() {
        let registry = TransformerRegistry::empty();
        for category in PluginCategory::ALL {
            assert!(registry.list(category).is_empty());
        }
        assert_eq!(registry.lookup(PluginCategory::Input, "beats"), None);
    }

    #[test]
    fn plugin_names_are_case_sensitive() {
        let registry = TransformerRegistry::with_builtin();
        assert_eq!(registry.lookup(PluginCategory::Filter, "Grok"), None);
    }

    #[test]
    fn first_registered_transformer_wins() {
        let mut registry = TransformerRegistry::empty();
        registry.register(PluginTransformer::Grok);
        registry.register(PluginTransformer::Mutate);
        registry.register(PluginTransformer::Grok);
        assert_eq!(registry.list(PluginCategory::Filter).len(), 3);
        assert_eq!(
            registry.lookup(PluginCategory::Filter, "grok"),
            Some(PluginTransformer::Grok)
        );
    }

    #[test]
    fn classification_is_stable_across_calls() {
        let registry = TransformerRegistry::with_builtin();
        let cases = [
            (PluginCategory::Input, "file", Some(PluginTransformer::FileInput)),
            (PluginCategory::Input, "kafka", None),
            (PluginCategory::Filter, "file", None),
        ];
        for (category, name, expected) in cases {
            let first = registry.lookup(category, name);
            let second = registry.lookup(category, name);
            assert_eq!(first, expected, "{name} in {category:?}");
            assert_eq!(first, second, "{name} in {category:?}");
            assert_eq!(
                registry.is_supported(category, name),
                registry.is_supported(category, name)
            );
            assert_eq!(registry.is_supported(category, name), expected.is_some());
        }
    }
}
