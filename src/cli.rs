//! Command-line flags; every flag overrides exactly one setting

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use tracing::warn;

use crate::config::{CliOverrides, SettingsSource};
use crate::constants::config::EXTENSION;

#[derive(Debug, Parser)]
#[command(name = "why-not-zoidberg")]
#[command(about = "Launch Zoidberg application with custom settings.")]
pub struct Cli {
    /// Alternate settings file to load from (never written back)
    #[arg(value_name = "SETTINGS.ini")]
    pub settings_file: Option<PathBuf>,

    /// Set the display text for Zoidberg
    #[arg(short = 't', long = "text")]
    pub text: Option<String>,

    /// Set the single background color (e.g. 'red', '#RRGGBB')
    #[arg(long = "background-color", visible_alias = "bg")]
    pub background_color: Option<String>,

    /// Set the first gradient color
    #[arg(long = "gradient-color1", visible_alias = "bgg1")]
    pub gradient_color1: Option<String>,

    /// Set the second gradient color
    #[arg(long = "gradient-color2", visible_alias = "bgg2")]
    pub gradient_color2: Option<String>,

    /// Set the color of the display text (e.g. 'white', '#RRGGBB')
    #[arg(long = "text-color", visible_alias = "tc")]
    pub text_color: Option<String>,

    /// Play the launch sound
    #[arg(short = 's', long = "sound")]
    pub sound: bool,

    /// Launch sound file, relative to the application directory
    #[arg(long = "launch-sound", value_name = "FILE")]
    pub launch_sound: Option<String>,

    /// Rotate the hue of the image
    #[arg(long = "color-shift")]
    pub color_shift: bool,

    /// Hue rotation in degrees (wraps around 360)
    #[arg(long = "hue-offset", value_name = "DEGREES", allow_negative_numbers = true)]
    pub hue_offset: Option<f32>,

    /// Fraction of the window the image may fill, in (0, 1]
    #[arg(long = "margin-factor", value_name = "FACTOR")]
    pub margin_factor: Option<f32>,

    /// Foreground image to display instead of the bundled one
    #[arg(long = "image", value_name = "PATH")]
    pub image: Option<PathBuf>,
}

impl Cli {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            display_text: self.text.clone(),
            background_color: self.background_color.clone(),
            gradient_color1: self.gradient_color1.clone(),
            gradient_color2: self.gradient_color2.clone(),
            text_color: self.text_color.clone(),
            enable_sound: self.sound,
            launch_sound: self.launch_sound.clone(),
            enable_color_shift: self.color_shift,
            static_hue_offset: self.hue_offset,
            margin_factor: self.margin_factor,
        }
    }

    /// Only a path with the settings extension, given as the first argument,
    /// counts as an alternate source
    pub fn settings_source(&self, canonical: PathBuf, first_arg: Option<OsString>) -> SettingsSource {
        let ad_hoc = self.settings_file.as_ref().and_then(|path| {
            let is_settings_file = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(EXTENSION));
            if !is_settings_file {
                warn!(path = %path.display(), "Ignoring argument, not a .{EXTENSION} settings file");
                return None;
            }
            if first_arg.as_deref() != Some(path.as_os_str()) {
                warn!(path = %path.display(), "Ignoring settings file, it must be the first argument");
                return None;
            }
            Some(path.clone())
        });

        SettingsSource {
            ad_hoc,
            ..SettingsSource::canonical(canonical)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("why-not-zoidberg").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_short_aliases_match_long_flags() {
        let cli = parse(&["--bg", "red", "--bgg1", "#000000", "--bgg2", "#ffffff", "--tc", "white"]);
        let overrides = cli.overrides();
        assert_eq!(overrides.background_color.as_deref(), Some("red"));
        assert_eq!(overrides.gradient_color1.as_deref(), Some("#000000"));
        assert_eq!(overrides.gradient_color2.as_deref(), Some("#ffffff"));
        assert_eq!(overrides.text_color.as_deref(), Some("white"));
    }

    #[test]
    fn test_flags_map_to_overrides() {
        let cli = parse(&[
            "-t", "Hello", "--sound", "--launch-sound", "boop.ogg", "--color-shift",
            "--hue-offset", "-45", "--margin-factor", "1.0",
        ]);
        let overrides = cli.overrides();
        assert_eq!(overrides.display_text.as_deref(), Some("Hello"));
        assert!(overrides.enable_sound);
        assert_eq!(overrides.launch_sound.as_deref(), Some("boop.ogg"));
        assert!(overrides.enable_color_shift);
        assert_eq!(overrides.static_hue_offset, Some(-45.0));
        assert_eq!(overrides.margin_factor, Some(1.0));
    }

    #[test]
    fn test_no_flags_means_no_overrides() {
        assert_eq!(parse(&[]).overrides(), CliOverrides::default());
    }

    fn source(args: &[&str]) -> SettingsSource {
        parse(args).settings_source(PathBuf::from("config.ini"), args.first().map(OsString::from))
    }

    #[test]
    fn test_ini_positional_is_ad_hoc_source() {
        let canonical = PathBuf::from("/home/user/.config/why-not-zoidberg/config.ini");
        let source = parse(&["party.INI", "-t", "hi"]).settings_source(canonical.clone(), Some("party.INI".into()));
        assert_eq!(source.canonical, canonical);
        assert_eq!(source.ad_hoc, Some(PathBuf::from("party.INI")));
    }

    #[test]
    fn test_other_positional_is_ignored() {
        assert_eq!(source(&["notes.txt"]).ad_hoc, None);
    }

    #[test]
    fn test_settings_file_must_come_first() {
        assert_eq!(source(&["-t", "hi", "party.ini"]).ad_hoc, None);
        assert_eq!(source(&["party.ini", "-t", "hi"]).ad_hoc, Some(PathBuf::from("party.ini")));
    }
}
