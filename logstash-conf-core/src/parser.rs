use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{PluginCategory, SourceConfiguration, SourcePlugin};
use crate::value::parse_settings;

/// Errors that can occur while turning pipeline text into a [`SourceConfiguration`].
#[derive(Debug, Error)]
pub enum ParseError {
    /// Failed to read the input file.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    /// No plugin was found inside any `input` block.
    #[error("at least one input plugin is required")]
    NoInputs,
    /// No plugin was found inside any `output` block.
    #[error("at least one output plugin is required")]
    NoOutputs,
}

/// A top-level `input`, `filter`, or `output` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    pub category: PluginCategory,
    /// Text between the block's braces.
    pub body: &'a str,
    /// Byte offset of `body` within the scanned text.
    pub body_start: usize,
}

/// Parse pipeline text into a validated [`SourceConfiguration`].
///
/// `file_path` is recorded on the result and used for diagnostics only.
pub fn parse(
    text: &str,
    file_path: impl Into<PathBuf>,
) -> Result<SourceConfiguration, ParseError> {
    let file_path = file_path.into();
    let masked = mask_comments(text);

    let mut inputs = Vec::new();
    let mut filters = Vec::new();
    let mut outputs = Vec::new();

    for block in extract_blocks(&masked) {
        let plugins = extract_plugins(block.category, block.body, block.body_start, &masked);
        debug!(
            file = %file_path.display(),
            block = %block.category,
            plugins = plugins.len(),
            "extracted block"
        );
        match block.category {
            PluginCategory::Input => inputs.extend(plugins),
            PluginCategory::Filter => filters.extend(plugins),
            PluginCategory::Output => outputs.extend(plugins),
        }
    }

    SourceConfiguration::new(file_path, inputs, filters, outputs, text)
}

/// Read and parse a pipeline file.
pub fn parse_file(path: &Path) -> Result<SourceConfiguration, ParseError> {
    let text = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse(&text, path)
}

/// Blank out `#` comments that sit outside quoted strings.
///
/// Every masked byte becomes a space and newlines are kept, so byte offsets
/// and line numbers of the result match the input. Quoted strings never span
/// lines: a quote still open at a newline is closed there.
pub fn mask_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut in_comment = false;

    for c in text.chars() {
        if in_comment {
            if c == '\n' {
                in_comment = false;
                out.push(c);
            } else {
                out.extend(std::iter::repeat_n(' ', c.len_utf8()));
            }
            continue;
        }

        match quote {
            Some(q) => {
                if c == '\n' {
                    quote = None;
                    escaped = false;
                } else if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == q {
                    quote = None;
                }
                out.push(c);
            }
            None => match c {
                '#' => {
                    in_comment = true;
                    out.push(' ');
                }
                '"' | '\'' => {
                    quote = Some(c);
                    out.push(c);
                }
                _ => out.push(c),
            },
        }
    }

    out
}

/// Find every top-level block keyword followed by a brace-delimited body.
///
/// Keywords match case-insensitively and only as whole words. A keyword that
/// is not followed by `{` is skipped. An unterminated body runs to the end of
/// the text.
pub fn extract_blocks(text: &str) -> Vec<Block<'_>> {
    let bytes = text.as_bytes();
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        i = skip_whitespace(bytes, i);
        if i >= bytes.len() {
            break;
        }

        let Some(category) = keyword_at(bytes, i) else {
            i += 1;
            continue;
        };

        let keyword_end = i + category.keyword().len();
        let brace = skip_whitespace(bytes, keyword_end);
        if brace >= bytes.len() || bytes[brace] != b'{' {
            i = keyword_end;
            continue;
        }

        let body_start = brace + 1;
        match find_closing_brace(bytes, body_start) {
            Some(close) => {
                blocks.push(Block {
                    category,
                    body: &text[body_start..close],
                    body_start,
                });
                i = close + 1;
            }
            None => {
                warn!(block = %category, offset = body_start, "unterminated block body");
                blocks.push(Block {
                    category,
                    body: &text[body_start..],
                    body_start,
                });
                i = bytes.len();
            }
        }
    }

    blocks
}

/// Extract `name { key => value ... }` stanzas from a block body.
///
/// `body_start` is the offset of `body` inside `full`, which is used to
/// compute absolute line numbers. Plugins nested in `if`/`else if`/`else`
/// bodies are extracted as if they were declared in the block and carry the
/// conditional header text.
pub fn extract_plugins(
    category: PluginCategory,
    body: &str,
    body_start: usize,
    full: &str,
) -> Vec<SourcePlugin> {
    let mut plugins = Vec::new();
    let scope = Scope {
        category,
        body,
        body_start,
        full,
        conditional: None,
    };
    scope.collect(&mut plugins);
    plugins
}

struct Scope<'a> {
    category: PluginCategory,
    body: &'a str,
    body_start: usize,
    full: &'a str,
    conditional: Option<String>,
}

impl Scope<'_> {
    fn collect(&self, out: &mut Vec<SourcePlugin>) {
        let bytes = self.body.as_bytes();
        let mut i = 0;

        while i < bytes.len() {
            i = skip_whitespace(bytes, i);
            if i >= bytes.len() {
                break;
            }

            if !is_ident_start(bytes[i]) {
                i += 1;
                continue;
            }

            let name_start = i;
            while i < bytes.len() && is_ident_byte(bytes[i]) {
                i += 1;
            }
            let name = &self.body[name_start..i];

            if name == "if" || name == "else" {
                if let Some(next) = self.collect_conditional(name_start, out) {
                    i = next;
                }
                continue;
            }

            let brace = skip_whitespace(bytes, i);
            if brace >= bytes.len() || bytes[brace] != b'{' {
                i = brace;
                continue;
            }

            let settings_start = brace + 1;
            let settings_end = find_closing_brace(bytes, settings_start).unwrap_or(bytes.len());
            let line = line_at(self.full, self.body_start + name_start);

            out.push(SourcePlugin {
                category: self.category,
                name: name.to_string(),
                settings: parse_settings(&self.body[settings_start..settings_end]),
                line,
                conditional: self.conditional.clone(),
            });
            i = settings_end + 1;
        }
    }

    /// Scan the body of a conditional starting at `keyword_start` and return
    /// the offset just past its closing brace.
    fn collect_conditional(
        &self,
        keyword_start: usize,
        out: &mut Vec<SourcePlugin>,
    ) -> Option<usize> {
        let bytes = self.body.as_bytes();
        let brace = keyword_start + self.body[keyword_start..].find('{')?;
        let header = self.body[keyword_start..brace]
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        let inner_start = brace + 1;
        let inner_end = find_closing_brace(bytes, inner_start).unwrap_or(bytes.len());
        debug!(
            conditional = %header,
            line = line_at(self.full, self.body_start + keyword_start),
            "flattening conditional"
        );

        let conditional = match &self.conditional {
            Some(outer) => format!("{outer} > {header}"),
            None => header,
        };
        let nested = Scope {
            category: self.category,
            body: &self.body[inner_start..inner_end],
            body_start: self.body_start + inner_start,
            full: self.full,
            conditional: Some(conditional),
        };
        nested.collect(out);

        Some(inner_end + 1)
    }
}

/// 1-indexed line containing byte `offset` of `text`.
pub fn line_at(text: &str, offset: usize) -> usize {
    let end = offset.min(text.len());
    text.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
}

fn keyword_at(bytes: &[u8], i: usize) -> Option<PluginCategory> {
    if i > 0 && is_ident_byte(bytes[i - 1]) {
        return None;
    }
    PluginCategory::ALL.into_iter().find(|category| {
        let keyword = category.keyword().as_bytes();
        let end = i + keyword.len();
        end <= bytes.len()
            && bytes[i..end].eq_ignore_ascii_case(keyword)
            && bytes.get(end).is_none_or(|&b| !is_ident_byte(b))
    })
}

/// Return the offset of the `}` closing a body that starts at `start`.
fn find_closing_brace(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 1usize;
    for (offset, &b) in bytes.iter().enumerate().skip(start) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(offset);
                }
            }
            _ => {}
        }
    }
    None
}

fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
