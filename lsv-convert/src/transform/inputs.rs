//! Input plugins: Logstash `file` and `beats`.

use logstash_conf_core::{SourcePlugin, Value};

use super::TransformError;
use crate::vector::{ComponentCategory, TargetComponent};

pub const DEFAULT_FILE_INCLUDE: &str = "/var/log/*.log";
pub const DEFAULT_BEATS_HOST: &str = "0.0.0.0";
pub const DEFAULT_BEATS_PORT: u16 = 5044;

/// `file` input → Vector `file` source.
pub fn file_source(plugin: &SourcePlugin) -> Result<TargetComponent, TransformError> {
    let include = match plugin.get("path") {
        None => vec![DEFAULT_FILE_INCLUDE.to_string()],
        Some(value) => value
            .string_list()
            .ok_or_else(|| {
                TransformError::invalid("path", "must be a string or a list of strings")
            })?,
    };
    let read_from = if plugin.get_str("start_position") == Some("beginning") {
        "beginning"
    } else {
        "end"
    };

    Ok(TargetComponent::new(ComponentCategory::Source, "file")
        .with_setting("include", include)
        .with_setting("read_from", read_from))
}

/// `beats` input → Vector `socket` source in TCP mode.
///
/// Vector has no Beats protocol listener, so the result carries a note
/// about the simplification.
pub fn beats_source(plugin: &SourcePlugin) -> Result<TargetComponent, TransformError> {
    let host = plugin.get_str("host").unwrap_or(DEFAULT_BEATS_HOST);
    let port = beats_port(plugin.get("port"))?;

    Ok(TargetComponent::new(ComponentCategory::Source, "socket")
        .with_setting("address", format!("{host}:{port}"))
        .with_setting("mode", "tcp")
        .with_comment("NOTE: Beats input migrated to TCP socket")
        .with_comment("For full Beats protocol support, consider shipping from Filebeat to Vector directly"))
}

fn beats_port(value: Option<&Value>) -> Result<u16, TransformError> {
    let raw = match value {
        None => return Ok(DEFAULT_BEATS_PORT),
        Some(Value::Integer(n)) => *n,
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| TransformError::invalid("port", format!("`{s}` is not a number")))?,
        Some(_) => return Err(TransformError::invalid("port", "must be an integer")),
    };
    u16::try_from(raw)
        .ok()
        .filter(|port| *port > 0)
        .ok_or_else(|| TransformError::invalid("port", format!("{raw} is outside 1-65535")))
}
