//! Minimal INI reader for the settings file
//!
//! Follows configparser conventions: `key = value` or `key: value`, full-line
//! comments start with `#` or `;`, indented lines continue the previous value,
//! key names are case-insensitive and section names are not.
//!
//! The raw lines are kept alongside the parsed view so the file can be
//! backfilled without touching anything the user wrote.

use anyhow::{bail, Result};

const BOM: char = '\u{feff}';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    /// Raw value, unsanitized
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub entries: Vec<Entry>,
    /// Index of the line just past the section's last header, key or continuation
    pub end: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    sections: Vec<Section>,
    lines: Vec<String>,
    bom: bool,
    crlf: bool,
}

impl IniDocument {
    pub fn parse(contents: &str) -> Result<Self> {
        let (bom, contents) = match contents.strip_prefix(BOM) {
            Some(rest) => (true, rest),
            None => (false, contents),
        };

        let mut sections: Vec<Section> = Vec::new();
        let mut current: Option<usize> = None;
        let mut last_entry: Option<(usize, usize)> = None;

        for (index, line) in contents.lines().enumerate() {
            let line_no = index + 1;
            let trimmed = line.trim();

            if trimmed.is_empty() {
                last_entry = None;
                continue;
            }
            if trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            if line.starts_with(char::is_whitespace) {
                if let Some((s, e)) = last_entry {
                    let section = &mut sections[s];
                    let entry = &mut section.entries[e];
                    entry.value.push('\n');
                    entry.value.push_str(trimmed);
                    section.end = index + 1;
                    continue;
                }
            }

            if let Some(rest) = trimmed.strip_prefix('[') {
                let Some(close) = rest.find(']') else {
                    bail!("line {line_no}: unterminated section header {trimmed:?}");
                };
                let name = rest[..close].trim().to_string();
                let position = match sections.iter().position(|s| s.name == name) {
                    Some(position) => position,
                    None => {
                        sections.push(Section {
                            name,
                            entries: Vec::new(),
                            end: index + 1,
                        });
                        sections.len() - 1
                    }
                };
                sections[position].end = index + 1;
                current = Some(position);
                last_entry = None;
                continue;
            }

            let Some(section) = current else {
                bail!("line {line_no}: key outside of any section: {trimmed:?}");
            };
            let Some(split) = trimmed.find(['=', ':']) else {
                bail!("line {line_no}: expected `key = value`, found {trimmed:?}");
            };

            let key = trimmed[..split].trim().to_lowercase();
            if key.is_empty() {
                bail!("line {line_no}: missing key name");
            }
            let value = trimmed[split + 1..].trim().to_string();

            let target = &mut sections[section];
            target.end = index + 1;
            let entries = &mut target.entries;
            let position = match entries.iter().position(|e| e.key == key) {
                Some(position) => {
                    entries[position].value = value;
                    position
                }
                None => {
                    entries.push(Entry { key, value });
                    entries.len() - 1
                }
            };
            last_entry = Some((section, position));
        }

        Ok(Self {
            sections,
            lines: contents.lines().map(str::to_string).collect(),
            bom,
            crlf: contents.contains("\r\n"),
        })
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Raw value for `key` in `section`
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        let key = key.to_lowercase();
        self.section(section)?
            .entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Source lines without their terminators, comments and blanks included
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn has_bom(&self) -> bool {
        self.bom
    }

    pub fn line_ending(&self) -> &'static str {
        if self.crlf { "\r\n" } else { "\n" }
    }
}

/// Clean a raw value before use
///
/// Strips CR/LF, cuts at the first `;`, cuts at a `#` unless it is the first
/// non-whitespace character (so hex colors survive), then trims.
pub fn sanitize_value(raw: &str) -> String {
    let mut value: String = raw.chars().filter(|c| *c != '\r' && *c != '\n').collect();

    if let Some(index) = value.find(';') {
        value.truncate(index);
    }

    let lead = value.len() - value.trim_start().len();
    let search_from = if value[lead..].starts_with('#') { lead + 1 } else { 0 };
    if let Some(index) = value[search_from..].find('#') {
        value.truncate(search_from + index);
    }

    value.trim().to_string()
}
