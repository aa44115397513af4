//! Structural parsing of Logstash pipeline configuration files.
//!
//! The parser recovers the `input`/`filter`/`output` block tree, the plugin
//! stanzas inside each block, and their `key => value` settings without a
//! grammar library. It does not evaluate conditionals or expressions.

pub mod config;
pub mod parser;
pub mod value;

pub use config::{PluginCategory, SourceConfiguration, SourcePlugin};
pub use parser::{
    extract_blocks, extract_plugins, line_at, mask_comments, parse, parse_file, Block, ParseError,
};
pub use value::{parse_settings, parse_value, Settings, Value};
