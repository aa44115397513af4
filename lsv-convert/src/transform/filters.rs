//! Filter plugins: `grok`, `mutate`, and `date`, all emitted as `remap`
//! transforms whose `source` is a VRL program.

use logstash_conf_core::{SourcePlugin, Value};

use super::{vrl, TransformError};
use crate::vector::{ComponentCategory, TargetComponent};

pub const DEFAULT_DATE_TARGET: &str = "@timestamp";

/// `grok` → `remap` with one `parse_groks!` call per matched field.
///
/// Accepts both the hash form `match => { "message" => "..." }` and the
/// array form `match => ["message", "p1", "message", "p2"]`; consecutive
/// pairs for the same field share one call.
pub fn grok_transform(plugin: &SourcePlugin) -> Result<TargetComponent, TransformError> {
    let groups = match plugin.get("match") {
        Some(Value::Map(map)) => map
            .iter()
            .map(|(field, pattern)| (field.clone(), vec![pattern.clone()]))
            .collect(),
        Some(Value::Array(items)) => group_pattern_pairs(items),
        _ => Vec::new(),
    };

    let mut lines: Vec<String> = groups
        .iter()
        .map(|(field, patterns)| {
            let patterns: Vec<String> = patterns.iter().map(|p| vrl::string_literal(p)).collect();
            format!(
                ". = parse_groks!({}, [{}])",
                vrl::path(field),
                patterns.join(", ")
            )
        })
        .collect();
    if lines.is_empty() {
        lines.push("# TODO: Add grok patterns".to_string());
    }

    Ok(remap(lines))
}

fn group_pattern_pairs(items: &[String]) -> Vec<(String, Vec<String>)> {
    let mut groups: Vec<(String, Vec<String>)> = Vec::new();
    for pair in items.chunks_exact(2) {
        let (field, pattern) = (&pair[0], &pair[1]);
        match groups.last_mut() {
            Some((last, patterns)) if last == field => patterns.push(pattern.clone()),
            _ => groups.push((field.clone(), vec![pattern.clone()])),
        }
    }
    groups
}

/// `mutate` → `remap`; operations always run remove, rename, add, convert.
pub fn mutate_transform(plugin: &SourcePlugin) -> Result<TargetComponent, TransformError> {
    let mut lines = Vec::new();

    if let Some(fields) = plugin.get("remove_field").and_then(Value::string_list) {
        for field in fields {
            lines.push(format!("del({})", vrl::path(&field)));
        }
    }

    if let Some(renames) = plugin.get("rename").and_then(Value::as_map) {
        for (old, new) in renames {
            lines.push(format!("{} = {}", vrl::path(new), vrl::path(old)));
            lines.push(format!("del({})", vrl::path(old)));
        }
    }

    if let Some(fields) = plugin.get("add_field").and_then(Value::as_map) {
        for (field, value) in fields {
            lines.push(format!("{} = {}", vrl::path(field), vrl::string_literal(value)));
        }
    }

    if let Some(conversions) = plugin.get("convert").and_then(Value::as_map) {
        for (field, kind) in conversions {
            let path = vrl::path(field);
            lines.push(format!("{path} = to_{}!({path})", conversion_function(kind)));
        }
    }

    if lines.is_empty() {
        lines.push("# TODO: Add mutate operations".to_string());
    }

    Ok(remap(lines))
}

fn conversion_function(kind: &str) -> &'static str {
    match kind {
        "integer" => "int",
        "float" => "float",
        "boolean" => "bool",
        _ => "string",
    }
}

/// `date` → `remap` with a `parse_timestamp!` call.
pub fn date_transform(plugin: &SourcePlugin) -> Result<TargetComponent, TransformError> {
    let matched = plugin
        .get("match")
        .and_then(Value::as_array)
        .filter(|items| items.len() >= 2);

    let Some(items) = matched else {
        return Ok(remap(vec!["# TODO: Configure date parsing".to_string()]));
    };

    let target = plugin.get_str("target").unwrap_or(DEFAULT_DATE_TARGET);
    let format = timestamp_format(&items[1]);
    let line = format!(
        "{} = parse_timestamp!({}, format: {})",
        vrl::path(target),
        vrl::path(&items[0]),
        vrl::string_literal(format)
    );

    let mut component = remap(vec![line]);
    if format == items[1] {
        component.comments.push(format!(
            "TODO: Check that date format '{format}' uses strftime syntax"
        ));
    }
    Ok(component)
}

fn timestamp_format(format: &str) -> &str {
    match format {
        "ISO8601" => "%+",
        "UNIX" | "UNIX_MS" => "%s",
        other => other,
    }
}

fn remap(lines: Vec<String>) -> TargetComponent {
    TargetComponent::new(ComponentCategory::Transform, "remap").with_setting("source", lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::{date_transform, grok_transform, mutate_transform};
    use crate::transform::TransformError;
    use crate::vector::TargetComponent;
    use logstash_conf_core::{parse_settings, PluginCategory, SourcePlugin};
    use pretty_assertions::assert_eq;

    type FilterFn = fn(&SourcePlugin) -> Result<TargetComponent, TransformError>;

    fn filter(name: &str, body: &str) -> SourcePlugin {
        SourcePlugin {
            category: PluginCategory::Filter,
            name: name.to_string(),
            settings: parse_settings(body),
            line: 1,
            conditional: None,
        }
    }

    fn source_of(plugin: &SourcePlugin, f: FilterFn) -> String {
        let component = f(plugin).expect("transform");
        assert_eq!(component.kind, "remap");
        component
            .setting_str("source")
            .expect("remap source")
            .to_string()
    }

    #[test]
    fn grok_hash_match() {
        let plugin = filter("grok", r#"match => { "message" => "%{COMBINEDAPACHELOG}" }"#);
        assert_eq!(
            source_of(&plugin, grok_transform),
            r#". = parse_groks!(.message, ["%{COMBINEDAPACHELOG}"])"#
        );
    }

    #[test]
    fn grok_array_match_groups_patterns_per_field() {
        let plugin = filter(
            "grok",
            r#"match => ["message", "%{IP:ip}", "message", "%{WORD:w}", "path", "%{DATA:p}"]"#,
        );
        assert_eq!(
            source_of(&plugin, grok_transform),
            ". = parse_groks!(.message, [\"%{IP:ip}\", \"%{WORD:w}\"])\n. = parse_groks!(.path, [\"%{DATA:p}\"])"
        );
    }

    #[test]
    fn grok_without_match_leaves_todo() {
        let plugin = filter("grok", "");
        assert_eq!(source_of(&plugin, grok_transform), "# TODO: Add grok patterns");
    }

    #[test]
    fn mutate_remove_field_in_order() {
        let plugin = filter("mutate", r#"remove_field => ["a","b"]"#);
        assert_eq!(source_of(&plugin, mutate_transform), "del(.a)\ndel(.b)");
    }

    #[test]
    fn mutate_operations_run_in_fixed_order() {
        let plugin = filter(
            "mutate",
            r#"
            convert => { "bytes" => "integer" }
            add_field => { "env" => "production" }
            rename => { "clientip" => "client_ip" }
            remove_field => "message"
            "#,
        );
        assert_eq!(
            source_of(&plugin, mutate_transform),
            [
                "del(.message)",
                ".client_ip = .clientip",
                "del(.clientip)",
                ".env = \"production\"",
                ".bytes = to_int!(.bytes)",
            ]
            .join("\n")
        );
    }

    #[test]
    fn mutate_unknown_conversion_falls_back_to_string() {
        let plugin = filter(
            "mutate",
            r#"convert => { "ok" => "boolean" "n" => "float" "x" => "integer_eu" }"#,
        );
        assert_eq!(
            source_of(&plugin, mutate_transform),
            ".n = to_float!(.n)\n.ok = to_bool!(.ok)\n.x = to_string!(.x)"
        );
    }

    #[test]
    fn mutate_without_operations_leaves_todo() {
        let plugin = filter("mutate", r#"id => "noop""#);
        assert_eq!(source_of(&plugin, mutate_transform), "# TODO: Add mutate operations");
    }

    #[test]
    fn date_maps_iso8601_to_default_target() {
        let plugin = filter("date", r#"match => ["ts", "ISO8601"]"#);
        let component = date_transform(&plugin).expect("transform");
        assert_eq!(
            component.setting_str("source"),
            Some(r#"."@timestamp" = parse_timestamp!(.ts, format: "%+")"#)
        );
        assert!(component.comments.is_empty());
    }

    #[test]
    fn date_passes_through_custom_format_with_note() {
        let plugin = filter(
            "date",
            r#"match => ["timestamp", "dd/MMM/yyyy:HH:mm:ss Z"] target => "event_time""#,
        );
        let component = date_transform(&plugin).expect("transform");
        assert_eq!(
            component.setting_str("source"),
            Some(r#".event_time = parse_timestamp!(.timestamp, format: "dd/MMM/yyyy:HH:mm:ss Z")"#)
        );
        assert_eq!(component.comments.len(), 1);
    }

    #[test]
    fn date_with_short_match_leaves_todo() {
        let plugin = filter("date", r#"match => ["ts"]"#);
        assert_eq!(source_of(&plugin, date_transform), "# TODO: Configure date parsing");
        let plugin = filter("date", "");
        assert_eq!(source_of(&plugin, date_transform), "# TODO: Configure date parsing");
    }
}
