//! Reader for the flat `key = value` section format used by `wily.cfg`.
//!
//! Follows the defaults of the configparser dialect: `[section]` headers,
//! `=` or `:` delimiters, case-insensitive keys, full-line `#`/`;` comments and
//! indented continuation lines. Blank lines inside a continued value are kept
//! when a further indented line follows; trailing blank lines are dropped.
//! The default section may be opened more than once and its options merge.
//! Values are taken literally (no interpolation, no inline comments).

use std::collections::BTreeMap;

/// A structural problem found while reading a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// 1-based line number.
    pub line: usize,
    pub message: String,
}

impl ParseError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self { line, message: message.into() }
    }
}

/// Option open for continuation lines.
struct OpenOption {
    key: String,
    indent: usize,
    pending_blank_lines: usize,
}

/// Parsed sections and their options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    sections: BTreeMap<String, BTreeMap<String, String>>,
}

impl IniDocument {
    /// Parse `content`; repeated `[default_section]` headers reopen that section.
    pub fn parse(content: &str, default_section: &str) -> Result<Self, ParseError> {
        let mut doc = IniDocument::default();
        let mut current: Option<String> = None;
        let mut open_option: Option<OpenOption> = None;

        for (idx, raw_line) in content.lines().enumerate() {
            let line_no = idx + 1;
            let stripped = raw_line.trim();

            if stripped.is_empty() {
                if let Some(open) = open_option.as_mut() {
                    open.pending_blank_lines += 1;
                }
                continue;
            }
            if stripped.starts_with('#') || stripped.starts_with(';') {
                continue;
            }

            let indent = raw_line.len() - raw_line.trim_start().len();

            if let (Some(section), Some(open)) = (&current, open_option.as_mut()) {
                if indent > open.indent {
                    if let Some(value) =
                        doc.sections.get_mut(section).and_then(|options| options.get_mut(&open.key))
                    {
                        for _ in 0..open.pending_blank_lines {
                            value.push('\n');
                        }
                        value.push('\n');
                        value.push_str(stripped);
                    }
                    open.pending_blank_lines = 0;
                    continue;
                }
            }
            open_option = None;

            if let Some(header) = stripped.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
                let name = header.trim();
                if name.is_empty() {
                    return Err(ParseError::new(line_no, "empty section name"));
                }
                if name != default_section && doc.sections.contains_key(name) {
                    return Err(ParseError::new(
                        line_no,
                        format!("section '{}' already exists", name),
                    ));
                }
                doc.sections.entry(name.to_string()).or_default();
                current = Some(name.to_string());
                continue;
            }

            let Some(section) = &current else {
                return Err(ParseError::new(line_no, "option found before any section header"));
            };

            let Some(split_at) = stripped.find(['=', ':']) else {
                return Err(ParseError::new(
                    line_no,
                    format!("expected 'key = value', found '{}'", stripped),
                ));
            };
            let key = stripped[..split_at].trim().to_lowercase();
            let value = stripped[split_at + 1..].trim().to_string();
            if key.is_empty() {
                return Err(ParseError::new(line_no, "missing option name"));
            }

            let options = doc.sections.entry(section.clone()).or_default();
            if options.contains_key(&key) {
                return Err(ParseError::new(
                    line_no,
                    format!("option '{}' in section '{}' already exists", key, section),
                ));
            }
            options.insert(key.clone(), value);
            open_option = Some(OpenOption { key, indent, pending_blank_lines: 0 });
        }

        Ok(doc)
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }

    /// Look up an option; keys are matched case-insensitively.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections.get(section)?.get(&key.to_lowercase()).map(String::as_str)
    }
}

/// Interpret a boolean option value (`1/yes/true/on`, `0/no/false/off`).
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Some(true),
        "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}

pub fn parse_int(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}
