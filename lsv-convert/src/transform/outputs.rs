//! Output plugins: `elasticsearch` and `file`.

use logstash_conf_core::SourcePlugin;

use super::TransformError;
use crate::vector::{ComponentCategory, TargetComponent};

pub const DEFAULT_ES_ENDPOINT: &str = "http://localhost:9200";
pub const DEFAULT_ES_USER: &str = "elastic";
pub const DEFAULT_FILE_OUTPUT_PATH: &str = "/var/log/vector-output.log";
pub const DEFAULT_FILE_CODEC: &str = "json_lines";

/// `elasticsearch` output → Vector `elasticsearch` sink in bulk mode.
pub fn elasticsearch_sink(plugin: &SourcePlugin) -> Result<TargetComponent, TransformError> {
    let endpoints: Vec<String> = match plugin.get("hosts") {
        None => vec![DEFAULT_ES_ENDPOINT.to_string()],
        Some(value) => value
            .string_list()
            .ok_or_else(|| {
                TransformError::invalid("hosts", "must be a string or a list of strings")
            })?
            .iter()
            .map(|host| with_scheme(host))
            .collect(),
    };

    let mut component = TargetComponent::new(ComponentCategory::Sink, "elasticsearch")
        .with_setting("endpoints", endpoints)
        .with_setting("mode", "bulk");

    if let Some(index) = plugin.get_str("index") {
        if index.contains("%{") {
            component.comments.push(format!(
                "TODO: Convert Logstash index template '{index}' to Vector format"
            ));
            let base = index_base(index);
            if !base.is_empty() {
                component.settings.insert("index".to_string(), base.into());
            }
        } else {
            component.settings.insert("index".to_string(), index.into());
        }
    }

    let user = plugin.get_str("user");
    if user.is_some() || plugin.get("password").is_some() {
        let mut auth = toml::Table::new();
        auth.insert("strategy".to_string(), "basic".into());
        auth.insert("user".to_string(), user.unwrap_or(DEFAULT_ES_USER).into());
        auth.insert(
            "password".to_string(),
            plugin.get_str("password").unwrap_or_default().into(),
        );
        component.settings.insert("auth".to_string(), auth.into());
    }

    Ok(component)
}

fn with_scheme(host: &str) -> String {
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("http://{host}")
    }
}

/// Text before the first `%{`, without one trailing `-`.
fn index_base(index: &str) -> &str {
    let head = index.split("%{").next().unwrap_or_default();
    head.strip_suffix('-').unwrap_or(head)
}

/// `file` output → Vector `file` sink.
pub fn file_sink(plugin: &SourcePlugin) -> Result<TargetComponent, TransformError> {
    let path = plugin.get_str("path").unwrap_or(DEFAULT_FILE_OUTPUT_PATH);
    let codec = plugin.get_str("codec").unwrap_or(DEFAULT_FILE_CODEC);

    let mut encoding = toml::Table::new();
    encoding.insert("codec".to_string(), encoding_codec(codec).into());

    Ok(TargetComponent::new(ComponentCategory::Sink, "file")
        .with_setting("path", path)
        .with_setting("encoding", encoding))
}

fn encoding_codec(codec: &str) -> &'static str {
    match codec {
        "line" | "plain" => "text",
        _ => "json",
    }
}
