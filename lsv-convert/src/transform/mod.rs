//! Per-plugin transformers from Logstash stanzas to Vector components.
//!
//! Each supported plugin is a variant of [`PluginTransformer`]. The
//! [`TransformerRegistry`] holds the ordered lists that the orchestrator
//! consults; a plugin no transformer claims goes down the unsupported path
//! handled by [`unsupported`].

pub mod filters;
pub mod inputs;
pub mod outputs;
pub mod registry;
pub mod unsupported;
mod vrl;

use logstash_conf_core::SourcePlugin;
use thiserror::Error;

use crate::vector::TargetComponent;

pub use registry::{PluginTransformer, TransformerRegistry};

/// Errors a transformer can raise for a plugin it claims.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("option `{option}` {reason}")]
    InvalidOption { option: String, reason: String },
}

impl TransformError {
    pub(crate) fn invalid(option: &str, reason: impl Into<String>) -> Self {
        TransformError::InvalidOption {
            option: option.to_string(),
            reason: reason.into(),
        }
    }
}

/// Uniform capability interface shared by every transformer.
pub trait Transformer {
    /// Whether this transformer handles plugins with the given name.
    fn supports(&self, plugin_name: &str) -> bool;

    /// Build the target component for a plugin this transformer supports.
    ///
    /// The returned component has no id and no inputs; wiring is the
    /// orchestrator's job.
    fn transform(&self, plugin: &SourcePlugin) -> Result<TargetComponent, TransformError>;
}
