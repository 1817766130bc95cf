//! Writes the settings file with a comment next to every key
//!
//! A fresh file is rendered from the settings. An existing file is only
//! backfilled: missing keys and sections are inserted, every line already
//! present is written back unchanged.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::ini::IniDocument;
use super::settings::Settings;
use crate::constants::config::{SECTION_BACKGROUND, SECTION_SETTINGS};

/// Recognized keys per section, in file order
pub const SETTINGS_KEYS: &[&str] = &[
    "display_text",
    "text_color",
    "sound_enabled",
    "launch_sound",
    "color_shift_enabled",
    "static_hue_offset",
];

pub const BACKGROUND_KEYS: &[&str] = &["type", "color", "start_color", "end_color"];

const SECTIONS: [(&str, &[&str]); 2] = [(SECTION_SETTINGS, SETTINGS_KEYS), (SECTION_BACKGROUND, BACKGROUND_KEYS)];

fn describe(key: &str) -> &'static str {
    match key {
        "display_text" => "Text shown over the image",
        "text_color" => "Caption color: a color name (white, steel blue, ...) or #RRGGBB",
        "sound_enabled" => "Play the launch sound at startup (true/false)",
        "launch_sound" => "Sound file, relative to the application directory",
        "color_shift_enabled" => "Rotate the hue of the image (true/false)",
        "static_hue_offset" => "Hue rotation in degrees, 0-360",
        "type" => "Background type: solid or gradient",
        "color" => "Solid background color (default maroon)",
        "start_color" => "Gradient top color (Zoidbergish red)",
        "end_color" => "Gradient bottom color (Zoidbergish dark red)",
        _ => "",
    }
}

fn value_of(settings: &Settings, key: &str) -> String {
    let bg = &settings.background;
    match key {
        "display_text" => continuation(&settings.display_text),
        "text_color" => settings.text_color.to_string(),
        "sound_enabled" => settings.sound_enabled.to_string(),
        "launch_sound" => settings.launch_sound.clone(),
        "color_shift_enabled" => settings.color_shift_enabled.to_string(),
        "static_hue_offset" => settings.static_hue_offset.to_string(),
        "type" => bg.mode.to_string(),
        "color" => bg.color.to_string(),
        "start_color" => bg.start_color.to_string(),
        "end_color" => bg.end_color.to_string(),
        _ => String::new(),
    }
}

fn push_key(out: &mut String, settings: &Settings, key: &str) {
    let _ = writeln!(out, "; {}", describe(key));
    let _ = writeln!(out, "{key} = {}", value_of(settings, key));
}

fn push_section(out: &mut String, settings: &Settings, name: &str, keys: &[&str]) {
    let _ = writeln!(out, "[{name}]");
    for key in keys {
        push_key(out, settings, key);
    }
}

/// Re-indent multi-line values so they parse back as continuations
fn continuation(value: &str) -> String {
    value.replace('\n', "\n    ")
}

/// Render a complete settings file
pub fn render_document(settings: &Settings) -> String {
    let mut out = String::new();
    for (index, (name, keys)) in SECTIONS.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        push_section(&mut out, settings, name, keys);
    }
    out
}

/// Insert the recognized keys and sections `doc` lacks, leaving its own lines as they are
///
/// Missing keys go right after the last key of their section; missing
/// sections are appended at the end.
pub fn backfill_document(doc: &IniDocument, settings: &Settings) -> String {
    let mut inserts: Vec<(usize, String)> = Vec::new();
    let mut appended: Vec<String> = Vec::new();

    for (name, keys) in SECTIONS {
        match doc.section(name) {
            Some(section) => {
                let mut block = String::new();
                for key in keys.iter().filter(|key| doc.get(name, key).is_none()) {
                    push_key(&mut block, settings, key);
                }
                if !block.is_empty() {
                    inserts.push((section.end, block));
                }
            }
            None => {
                let mut block = String::new();
                push_section(&mut block, settings, name, keys);
                appended.push(block);
            }
        }
    }

    let lines = doc.lines();
    let mut out = String::new();
    for index in 0..=lines.len() {
        for (_, block) in inserts.iter().filter(|(at, _)| *at == index) {
            out.push_str(block);
        }
        if let Some(line) = lines.get(index) {
            out.push_str(line);
            out.push('\n');
        }
    }
    for block in appended {
        if !out.is_empty() && !out.ends_with("\n\n") {
            out.push('\n');
        }
        out.push_str(&block);
    }

    let mut out = match doc.line_ending() {
        "\n" => out,
        ending => out.replace('\n', ending),
    };
    if doc.has_bom() {
        out.insert(0, '\u{feff}');
    }
    out
}

/// Write a fresh file, or backfill `previous` when the file already exists
pub fn write_settings_file(path: &Path, settings: &Settings, previous: Option<&IniDocument>) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
    }
    let contents = match previous {
        Some(doc) => backfill_document(doc, settings),
        None => render_document(settings),
    };
    fs::write(path, contents)
        .with_context(|| format!("Failed to write settings file to {}", path.display()))?;
    info!(path = %path.display(), backfilled = previous.is_some(), "Wrote settings file");
    Ok(())
}
