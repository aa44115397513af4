use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;

use serde::Serialize;

use crate::parser::ParseError;
use crate::value::{Settings, Value};

/// Top-level block a plugin was declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginCategory {
    Input,
    Filter,
    Output,
}

impl PluginCategory {
    /// All categories in pipeline order.
    pub const ALL: [PluginCategory; 3] = [
        PluginCategory::Input,
        PluginCategory::Filter,
        PluginCategory::Output,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            PluginCategory::Input => "input",
            PluginCategory::Filter => "filter",
            PluginCategory::Output => "output",
        }
    }
}

impl Display for PluginCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One `name { ... }` stanza inside an input, filter, or output block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourcePlugin {
    pub category: PluginCategory,
    pub name: String,
    pub settings: Settings,
    /// 1-indexed line of the plugin name in the source file.
    pub line: usize,
    /// Header of the enclosing `if`/`else` construct, if any.
    pub conditional: Option<String>,
}

impl SourcePlugin {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.settings.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }
}

/// A parsed pipeline file.
///
/// Construction through [`SourceConfiguration::new`] guarantees at least one
/// input and one output plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceConfiguration {
    pub file_path: PathBuf,
    pub inputs: Vec<SourcePlugin>,
    pub filters: Vec<SourcePlugin>,
    pub outputs: Vec<SourcePlugin>,
    #[serde(skip)]
    pub raw: String,
}

impl SourceConfiguration {
    pub fn new(
        file_path: impl Into<PathBuf>,
        inputs: Vec<SourcePlugin>,
        filters: Vec<SourcePlugin>,
        outputs: Vec<SourcePlugin>,
        raw: impl Into<String>,
    ) -> Result<Self, ParseError> {
        if inputs.is_empty() {
            return Err(ParseError::NoInputs);
        }
        if outputs.is_empty() {
            return Err(ParseError::NoOutputs);
        }
        Ok(Self {
            file_path: file_path.into(),
            inputs,
            filters,
            outputs,
            raw: raw.into(),
        })
    }

    pub fn plugins(&self, category: PluginCategory) -> &[SourcePlugin] {
        match category {
            PluginCategory::Input => &self.inputs,
            PluginCategory::Filter => &self.filters,
            PluginCategory::Output => &self.outputs,
        }
    }

    /// Plugins in pipeline order: inputs, then filters, then outputs.
    pub fn all_plugins(&self) -> impl Iterator<Item = &SourcePlugin> {
        self.inputs
            .iter()
            .chain(self.filters.iter())
            .chain(self.outputs.iter())
    }
}
