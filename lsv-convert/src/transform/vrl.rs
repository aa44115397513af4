//! Small helpers for emitting VRL source text.

/// Render a Logstash field reference as a VRL event path.
///
/// `message` becomes `.message`, `[http][status]` becomes `.http.status`,
/// and segments that are not plain identifiers are quoted, so `@timestamp`
/// becomes `."@timestamp"`.
pub(crate) fn path(field: &str) -> String {
    let field = field.trim();
    let segments: Vec<&str> = if field.starts_with('[') {
        field
            .split(['[', ']'])
            .filter(|segment| !segment.is_empty())
            .collect()
    } else {
        vec![field]
    };

    let mut out = String::new();
    for segment in segments {
        out.push('.');
        if is_identifier(segment) {
            out.push_str(segment);
        } else {
            out.push_str(&string_literal(segment));
        }
    }
    if out.is_empty() {
        out.push('.');
    }
    out
}

/// Quote a value as a VRL string literal.
pub(crate) fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
