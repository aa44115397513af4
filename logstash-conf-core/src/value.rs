use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Settings of a single plugin stanza, keyed by option name.
pub type Settings = BTreeMap<String, Value>;

static KEY_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z0-9_]+)\s*=>\s*").expect("key marker pattern is valid")
});

static HASH_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""([^"]+)"\s*=>\s*"([^"]+)""#).expect("hash pair pattern is valid")
});

/// A typed option value recovered from a `key => value` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Quoted or bare text.
    String(String),
    /// Whole number literal.
    Integer(i64),
    /// `true` / `false`, any case.
    Boolean(bool),
    /// `[...]` literal; elements are always strings.
    Array(Vec<String>),
    /// `{ "k" => "v" ... }` literal with string keys and values only.
    Map(BTreeMap<String, String>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[String]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Return the value as a list of strings when it is a string or an array.
    ///
    /// Many options accept either a single value or a list of values.
    pub fn string_list(&self) -> Option<Vec<String>> {
        match self {
            Value::String(s) => Some(vec![s.clone()]),
            Value::Array(items) => Some(items.clone()),
            _ => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "\"{s}\""),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Array(items) => {
                write!(f, "[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "\"{item}\"")?;
                }
                write!(f, "]")
            }
            Value::Map(map) => {
                write!(f, "{{")?;
                for (idx, (key, value)) in map.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, " \"{key}\" => \"{value}\"")?;
                }
                write!(f, " }}")
            }
        }
    }
}

/// Split a plugin body into `key => value` pairs and parse every value.
///
/// A value runs from the end of its `key =>` marker to the start of the next
/// marker (or the end of the text). A repeated key keeps its last value.
pub fn parse_settings(content: &str) -> Settings {
    let markers: Vec<_> = KEY_MARKER.captures_iter(content).collect();
    let mut settings = Settings::new();

    for (idx, caps) in markers.iter().enumerate() {
        let (Some(whole), Some(key)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let value_end = markers
            .get(idx + 1)
            .and_then(|next| next.get(0))
            .map(|m| m.start())
            .unwrap_or(content.len());
        let raw = content[whole.end()..value_end].trim();
        settings.insert(key.as_str().to_string(), parse_value(raw));
    }

    settings
}

/// Convert one raw literal into a [`Value`].
pub fn parse_value(raw: &str) -> Value {
    let raw = raw.trim();
    let raw = raw.strip_suffix(',').unwrap_or(raw);

    if raw.starts_with('"') || raw.starts_with('\'') {
        return Value::String(strip_quotes(raw).to_string());
    }

    if raw.starts_with('[') {
        let inner = raw.trim_matches(|c| c == '[' || c == ']');
        let items = inner
            .split(',')
            .map(|item| strip_quotes(item.trim()).to_string())
            .filter(|item| !item.is_empty())
            .collect();
        return Value::Array(items);
    }

    if raw.starts_with('{') {
        let inner = raw.trim_matches(|c| c == '{' || c == '}');
        let map: BTreeMap<String, String> = HASH_PAIR
            .captures_iter(inner)
            .map(|caps| (caps[1].to_string(), caps[2].to_string()))
            .collect();
        if map.is_empty() {
            return Value::String(raw.to_string());
        }
        return Value::Map(map);
    }

    if raw.eq_ignore_ascii_case("true") {
        return Value::Boolean(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return Value::Boolean(false);
    }

    if let Ok(n) = raw.parse::<i64>() {
        return Value::Integer(n);
    }

    Value::String(raw.to_string())
}

fn strip_quotes(raw: &str) -> &str {
    raw.trim_matches('"').trim_matches('\'')
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::{parse_settings, parse_value, Value};

    #[test]
    fn parses_quoted_strings_with_either_quote() {
        assert_eq!(
            parse_value(r#""/var/log/app.log""#),
            Value::String("/var/log/app.log".to_string())
        );
        assert_eq!(parse_value("'plain',"), Value::String("plain".to_string()));
    }

    #[test]
    fn parses_arrays_and_drops_empty_elements() {
        assert_eq!(
            parse_value(r#"["a", 'b', , "c" ]"#),
            Value::Array(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
        assert_eq!(parse_value("[]"), Value::Array(Vec::new()));
    }

    #[test]
    fn parses_string_hash_pairs() {
        let mut expected = BTreeMap::new();
        expected.insert("message".to_string(), "%{COMBINEDAPACHELOG}".to_string());
        assert_eq!(
            parse_value(r#"{ "message" => "%{COMBINEDAPACHELOG}" }"#),
            Value::Map(expected)
        );
    }

    #[test]
    fn hash_without_string_pairs_falls_back_to_raw_text() {
        assert_eq!(
            parse_value(r#"{ "count" => 5 }"#),
            Value::String(r#"{ "count" => 5 }"#.to_string())
        );
    }

    #[test]
    fn parses_booleans_integers_and_bare_words() {
        assert_eq!(parse_value("TRUE"), Value::Boolean(true));
        assert_eq!(parse_value("false"), Value::Boolean(false));
        assert_eq!(parse_value("5044"), Value::Integer(5044));
        assert_eq!(parse_value("-3"), Value::Integer(-3));
        assert_eq!(parse_value("1.5"), Value::String("1.5".to_string()));
        assert_eq!(parse_value("beginning"), Value::String("beginning".to_string()));
    }

    #[test]
    fn settings_split_on_following_key_marker() {
        let settings = parse_settings(
            r#"
            path => "/var/log/app.log"
            start_position => "beginning"
            port => 5044
            "#,
        );

        assert_eq!(settings.len(), 3);
        assert_eq!(
            settings.get("path"),
            Some(&Value::String("/var/log/app.log".to_string()))
        );
        assert_eq!(
            settings.get("start_position"),
            Some(&Value::String("beginning".to_string()))
        );
        assert_eq!(settings.get("port"), Some(&Value::Integer(5044)));
    }

    #[test]
    fn quoted_hash_keys_are_not_mistaken_for_setting_markers() {
        let settings = parse_settings(r#"match => { "message" => "%{WORD:verb}" }"#);
        assert_eq!(settings.len(), 1);
        let map = settings["match"].as_map().expect("match should be a hash");
        assert_eq!(map.get("message").map(String::as_str), Some("%{WORD:verb}"));
    }

    #[test]
    fn display_renders_source_syntax() {
        let value = Value::Array(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(value.to_string(), r#"["a", "b"]"#);
        assert_eq!(Value::Integer(7).to_string(), "7");
    }
}
