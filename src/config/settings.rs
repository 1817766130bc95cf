//! Typed settings record
//!
//! Produced once by the resolver and shared read-only with the renderer.

use std::fmt;

use crate::color::ColorValue;
use crate::constants::{defaults, render};

/// Background fill style
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackgroundMode {
    Solid,
    Gradient,
    /// Unrecognized `type` value, kept so it survives a rewrite
    Unknown(String),
}

impl BackgroundMode {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "solid" => BackgroundMode::Solid,
            "gradient" => BackgroundMode::Gradient,
            _ => BackgroundMode::Unknown(raw.trim().to_string()),
        }
    }
}

impl fmt::Display for BackgroundMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackgroundMode::Solid => f.write_str("solid"),
            BackgroundMode::Gradient => f.write_str("gradient"),
            BackgroundMode::Unknown(raw) => f.write_str(raw),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundSettings {
    pub mode: BackgroundMode,
    pub color: ColorValue,
    pub start_color: ColorValue,
    pub end_color: ColorValue,
}

impl Default for BackgroundSettings {
    fn default() -> Self {
        Self {
            mode: BackgroundMode::parse(defaults::BACKGROUND_TYPE),
            color: ColorValue::parse(defaults::BACKGROUND_COLOR),
            start_color: ColorValue::parse(defaults::GRADIENT_START),
            end_color: ColorValue::parse(defaults::GRADIENT_END),
        }
    }
}

/// Fully resolved settings (defaults, then file, then command line)
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub display_text: String,
    pub text_color: ColorValue,
    pub background: BackgroundSettings,
    pub sound_enabled: bool,
    /// Launch sound filename, relative to the install directory unless absolute
    pub launch_sound: String,
    pub color_shift_enabled: bool,
    /// Degrees in `[0, 360)`
    pub static_hue_offset: f32,
    /// Fraction of the fit-to-viewport scale applied to the image (command line only)
    pub margin_factor: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            display_text: defaults::DISPLAY_TEXT.to_string(),
            text_color: ColorValue::parse(defaults::TEXT_COLOR),
            background: BackgroundSettings::default(),
            sound_enabled: defaults::SOUND_ENABLED,
            launch_sound: defaults::LAUNCH_SOUND.to_string(),
            color_shift_enabled: defaults::COLOR_SHIFT_ENABLED,
            static_hue_offset: defaults::STATIC_HUE_OFFSET,
            margin_factor: render::MARGIN_FACTOR,
        }
    }
}

/// Wrap a hue offset into `[0, 360)`
pub fn normalize_hue(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Parse a configparser-style boolean
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Some(true),
        "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_mode_parse() {
        assert_eq!(BackgroundMode::parse("solid"), BackgroundMode::Solid);
        assert_eq!(BackgroundMode::parse(" Gradient "), BackgroundMode::Gradient);
        assert_eq!(
            BackgroundMode::parse("plaid"),
            BackgroundMode::Unknown("plaid".to_string())
        );
        assert_eq!(BackgroundMode::parse("plaid").to_string(), "plaid");
    }

    #[test]
    fn test_normalize_hue_wraps() {
        assert_eq!(normalize_hue(0.0), 0.0);
        assert_eq!(normalize_hue(360.0), 0.0);
        assert_eq!(normalize_hue(450.0), 90.0);
        assert_eq!(normalize_hue(-90.0), 270.0);
        assert!(normalize_hue(-1e-9) < 360.0);
    }

    #[test]
    fn test_parse_bool_variants() {
        for raw in ["1", "yes", "TRUE", "On"] {
            assert_eq!(parse_bool(raw), Some(true), "{raw}");
        }
        for raw in ["0", "No", "false", "off"] {
            assert_eq!(parse_bool(raw), Some(false), "{raw}");
        }
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.display_text, "Woop woop woop!");
        assert_eq!(settings.background.mode, BackgroundMode::Solid);
        assert_eq!(settings.background.start_color.to_string(), "#c93047");
        assert_eq!(settings.background.end_color.to_string(), "#290b0f");
        assert!(!settings.sound_enabled);
        assert_eq!(settings.static_hue_offset, 0.0);
        assert_eq!(settings.margin_factor, 0.85);
    }
}
