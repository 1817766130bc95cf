//! Three-layer settings resolution: defaults, settings file, command line
//!
//! Recoverable problems (missing file, malformed file, bad values) are
//! logged and absorbed here; resolution always produces settings.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use super::ini::{sanitize_value, IniDocument};
use super::settings::{normalize_hue, parse_bool, BackgroundMode, Settings};
use super::writer::{write_settings_file, BACKGROUND_KEYS, SETTINGS_KEYS};
use crate::color::ColorValue;
use crate::constants::config::{SECTION_BACKGROUND, SECTION_SETTINGS};

/// Where settings are read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsSource {
    /// Default location; the only file ever written
    pub canonical: PathBuf,
    /// Alternate file supplied on the command line, read-only
    pub ad_hoc: Option<PathBuf>,
}

impl SettingsSource {
    pub fn canonical(path: PathBuf) -> Self {
        Self {
            canonical: path,
            ad_hoc: None,
        }
    }
}

/// Command-line values layered over the file settings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    pub display_text: Option<String>,
    pub background_color: Option<String>,
    pub gradient_color1: Option<String>,
    pub gradient_color2: Option<String>,
    pub text_color: Option<String>,
    pub enable_sound: bool,
    pub launch_sound: Option<String>,
    pub enable_color_shift: bool,
    pub static_hue_offset: Option<f32>,
    pub margin_factor: Option<f32>,
}

/// Outcome of [`resolve`]
#[derive(Debug, Clone)]
pub struct Resolved {
    pub settings: Settings,
    /// File the file layer came from (may not exist)
    pub path: PathBuf,
    /// Defaults had to fill in for missing sections or keys
    pub modified: bool,
    /// The settings file was written back
    pub persisted: bool,
    /// The canonical file did not exist and was created
    pub created: bool,
}

/// Result of reading one settings file
enum FileLoad {
    Missing,
    Parsed(IniDocument),
}

fn read_document(path: &Path) -> Result<FileLoad> {
    if !path.exists() {
        return Ok(FileLoad::Missing);
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;
    let doc = IniDocument::parse(&contents)
        .with_context(|| format!("Failed to parse settings file {}", path.display()))?;
    Ok(FileLoad::Parsed(doc))
}

pub fn resolve(source: &SettingsSource, cli: &CliOverrides) -> Resolved {
    let mut resolved = match &source.ad_hoc {
        Some(path) => match read_document(path) {
            Ok(FileLoad::Parsed(doc)) => {
                info!(path = %path.display(), "Loading settings from alternate file (read-only)");
                let (settings, missing) = overlay_document(&doc);
                if !missing.is_empty() {
                    debug!(path = %path.display(), missing = ?missing, "Alternate settings file is incomplete, not writing back");
                }
                Resolved {
                    settings,
                    path: path.clone(),
                    modified: !missing.is_empty(),
                    persisted: false,
                    created: false,
                }
            }
            Ok(FileLoad::Missing) => {
                warn!(path = %path.display(), "Alternate settings file not found, using default location");
                resolve_canonical(&source.canonical)
            }
            Err(e) => {
                warn!(error = ?e, "Alternate settings file unusable, using default location");
                resolve_canonical(&source.canonical)
            }
        },
        None => resolve_canonical(&source.canonical),
    };

    apply_overrides(&mut resolved.settings, cli);
    resolved
}

fn resolve_canonical(path: &Path) -> Resolved {
    let (settings, previous, modified, created) = match read_document(path) {
        Ok(FileLoad::Missing) => {
            info!(path = %path.display(), "Settings file not found, creating it with defaults");
            (Settings::default(), None, true, true)
        }
        Ok(FileLoad::Parsed(doc)) => {
            let (settings, missing) = overlay_document(&doc);
            if !missing.is_empty() {
                info!(path = %path.display(), missing = ?missing, "Backfilling missing settings with defaults");
            }
            let modified = !missing.is_empty();
            (settings, Some(doc), modified, false)
        }
        Err(e) => {
            // Leave the broken file alone so the user can fix it
            warn!(error = ?e, "Using built-in defaults; settings file left untouched");
            (Settings::default(), None, false, false)
        }
    };

    let mut persisted = false;
    if modified {
        match write_settings_file(path, &settings, previous.as_ref()) {
            Ok(()) => persisted = true,
            Err(e) => warn!(error = ?e, "Failed to persist settings file"),
        }
    }

    Resolved {
        settings,
        path: path.to_path_buf(),
        modified,
        persisted,
        created: created && persisted,
    }
}

/// Overlay every recognized key onto the defaults
///
/// Returns the settings plus the `Section.key` names that were missing.
fn overlay_document(doc: &IniDocument) -> (Settings, Vec<String>) {
    let mut settings = Settings::default();
    let mut missing = Vec::new();

    for section in [SECTION_SETTINGS, SECTION_BACKGROUND] {
        if !doc.has_section(section) {
            debug!(section = %section, "Section missing, synthesizing from defaults");
        }
    }

    let mut lookup = |section: &str, key: &str| -> Option<String> {
        match doc.get(section, key) {
            Some(raw) => Some(sanitize_value(raw)),
            None => {
                missing.push(format!("{section}.{key}"));
                None
            }
        }
    };

    for key in SETTINGS_KEYS {
        let Some(value) = lookup(SECTION_SETTINGS, key) else {
            continue;
        };
        match *key {
            "display_text" => settings.display_text = value,
            "text_color" => settings.text_color = parse_color(key, &value),
            "sound_enabled" => set_bool(&mut settings.sound_enabled, key, &value),
            "launch_sound" => settings.launch_sound = value,
            "color_shift_enabled" => set_bool(&mut settings.color_shift_enabled, key, &value),
            "static_hue_offset" => match value.parse::<f32>() {
                Ok(degrees) if degrees.is_finite() => settings.static_hue_offset = normalize_hue(degrees),
                _ => warn!(key = %key, value = %value, "Invalid hue offset, keeping default"),
            },
            _ => {}
        }
    }

    for key in BACKGROUND_KEYS {
        let Some(value) = lookup(SECTION_BACKGROUND, key) else {
            continue;
        };
        let bg = &mut settings.background;
        match *key {
            "type" => {
                bg.mode = BackgroundMode::parse(&value);
                if let BackgroundMode::Unknown(raw) = &bg.mode {
                    warn!(value = %raw, "Unknown background type, a neutral fill will be used");
                }
            }
            "color" => bg.color = parse_color(key, &value),
            "start_color" => bg.start_color = parse_color(key, &value),
            "end_color" => bg.end_color = parse_color(key, &value),
            _ => {}
        }
    }

    (settings, missing)
}

fn parse_color(key: &str, value: &str) -> ColorValue {
    let color = ColorValue::parse(value);
    if !color.is_valid() {
        warn!(key = %key, value = %value, "Invalid color, it will render as black");
    }
    color
}

fn set_bool(field: &mut bool, key: &str, value: &str) {
    match parse_bool(value) {
        Some(parsed) => *field = parsed,
        None => warn!(key = %key, value = %value, "Invalid boolean, keeping default"),
    }
}

/// Layer command-line values on top; each flag maps to one field
fn apply_overrides(settings: &mut Settings, cli: &CliOverrides) {
    if let Some(text) = &cli.display_text {
        settings.display_text = text.clone();
    }
    if let Some(color) = &cli.text_color {
        settings.text_color = parse_color("text-color", color);
    }

    let bg = &mut settings.background;
    match (&cli.gradient_color1, &cli.gradient_color2) {
        (Some(start), Some(end)) => {
            // An explicit pair wins over a single background color
            bg.mode = BackgroundMode::Gradient;
            bg.start_color = parse_color("gradient-color1", start);
            bg.end_color = parse_color("gradient-color2", end);
            if cli.background_color.is_some() {
                debug!("Both gradient colors given, ignoring --background-color");
            }
        }
        (start, end) => {
            if let Some(color) = &cli.background_color {
                bg.mode = BackgroundMode::Solid;
                bg.color = parse_color("background-color", color);
            }
            if let Some(start) = start {
                bg.start_color = parse_color("gradient-color1", start);
            }
            if let Some(end) = end {
                bg.end_color = parse_color("gradient-color2", end);
            }
        }
    }

    if cli.enable_sound {
        settings.sound_enabled = true;
    }
    if let Some(sound) = &cli.launch_sound {
        settings.launch_sound = sound.clone();
    }
    if cli.enable_color_shift {
        settings.color_shift_enabled = true;
    }
    if let Some(degrees) = cli.static_hue_offset {
        settings.static_hue_offset = normalize_hue(degrees);
    }
    if let Some(margin) = cli.margin_factor {
        if margin > 0.0 && margin <= 1.0 {
            settings.margin_factor = margin;
        } else {
            warn!(margin_factor = margin, "Margin factor must be in (0, 1], keeping default");
        }
    }
}
