//! Render a [`TargetConfiguration`] as a commented Vector TOML document.

use std::path::Path;

use crate::vector::{ComponentCategory, TargetComponent, TargetConfiguration};

pub const PLACEHOLDER_BANNER: &str = "# --- Unsupported plugins (manual migration required) ---";

/// Render the configuration, appending placeholders as commented-out tables.
pub fn render_toml(
    config: &TargetConfiguration,
    source: &Path,
    placeholders: &[TargetComponent],
) -> String {
    let mut out = String::new();
    out.push_str("# Vector configuration generated by lsv-convert\n");
    out.push_str(&format!("# Source: {}\n", source.display()));

    for component in config.all_components() {
        out.push('\n');
        render_component(&mut out, component);
    }

    if !placeholders.is_empty() {
        out.push('\n');
        out.push_str(PLACEHOLDER_BANNER);
        out.push('\n');
        for placeholder in placeholders {
            let mut block = String::new();
            render_component(&mut block, placeholder);
            out.push_str("#\n");
            for line in block.lines() {
                if line.is_empty() {
                    out.push_str("#\n");
                } else if line.starts_with('#') {
                    out.push_str(line);
                    out.push('\n');
                } else {
                    out.push_str("# ");
                    out.push_str(line);
                    out.push('\n');
                }
            }
        }
    }

    out
}

fn render_component(out: &mut String, component: &TargetComponent) {
    for comment in &component.comments {
        if comment.is_empty() {
            out.push_str("#\n");
            continue;
        }
        for line in comment.split('\n') {
            if line.is_empty() {
                out.push_str("#\n");
            } else {
                out.push_str("# ");
                out.push_str(line);
                out.push('\n');
            }
        }
    }

    let header = format!("{}.{}", component.category.section(), key(&component.id));
    out.push_str(&format!("[{header}]\n"));
    out.push_str(&format!("type = {}\n", render_value(&component.kind.as_str().into())));
    if component.category != ComponentCategory::Source {
        let inputs = toml::Value::from(component.inputs.clone());
        out.push_str(&format!("inputs = {}\n", render_value(&inputs)));
    }
    write_entries(out, &header, &component.settings);
}

fn write_entries(out: &mut String, header: &str, table: &toml::Table) {
    for (name, value) in table {
        if !value.is_table() {
            out.push_str(&format!("{} = {}\n", key(name), render_value(value)));
        }
    }
    for (name, value) in table {
        if let toml::Value::Table(nested) = value {
            let nested_header = format!("{header}.{}", key(name));
            out.push_str(&format!("\n[{nested_header}]\n"));
            write_entries(out, &nested_header, nested);
        }
    }
}

fn render_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) if s.contains('\n') && literal_safe(s) => format!("'''\n{s}'''"),
        other => other.to_string(),
    }
}

/// Whether `s` can sit inside a multi-line literal string unchanged.
fn literal_safe(s: &str) -> bool {
    !s.contains("'''")
        && !s.ends_with('\'')
        && s.chars().all(|c| c == '\n' || c == '\t' || !c.is_control())
}

fn key(name: &str) -> String {
    let bare = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if bare {
        name.to_string()
    } else {
        toml::Value::String(name.to_string()).to_string()
    }
}
