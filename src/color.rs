//! Color parsing, blending and hue rotation
//!
//! Colors come from the settings file and the command line as either a
//! symbolic name (`white`, `light blue`) or a hex string (`#RRGGBB`, the `#`
//! is optional). Everything is normalized to [`Rgb`] before any arithmetic.

use std::fmt;

use image::RgbaImage;
use palette::{Hsv, IntoColor, Srgb};

/// 8-bit RGB triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB`, `RRGGBB` or the short `#RGB` form. Anything else is `None`.
    ///
    /// The short form needs its `#` so words like `bad` stay names.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim();
        let (hashed, hex) = match hex.strip_prefix('#') {
            Some(rest) => (true, rest),
            None => (false, hex),
        };
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        match hex.len() {
            6 => {
                let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
                Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
            }
            // #abc is #aabbcc
            3 if hashed => {
                let channel = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 0x11);
                Some(Self::new(channel(0)?, channel(1)?, channel(2)?))
            }
            _ => None,
        }
    }

    /// Lowercase `#rrggbb`
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A color as written by the user
///
/// The original spelling is kept so the settings file can be rewritten
/// without turning `white` into `#ffffff`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorValue {
    Named { name: String, rgb: Rgb },
    Hex(Rgb),
    Invalid(String),
}

impl ColorValue {
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if let Some(rgb) = Rgb::from_hex(trimmed) {
            return ColorValue::Hex(rgb);
        }
        match named_color(trimmed) {
            Some(rgb) => ColorValue::Named {
                name: trimmed.to_string(),
                rgb,
            },
            None => ColorValue::Invalid(trimmed.to_string()),
        }
    }

    /// Invalid colors resolve to black
    pub fn rgb(&self) -> Rgb {
        match self {
            ColorValue::Named { rgb, .. } | ColorValue::Hex(rgb) => *rgb,
            ColorValue::Invalid(_) => Rgb::BLACK,
        }
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self, ColorValue::Invalid(_))
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorValue::Named { name, .. } => f.write_str(name),
            ColorValue::Hex(rgb) => f.write_str(&rgb.to_hex()),
            ColorValue::Invalid(raw) => f.write_str(raw),
        }
    }
}

/// Resolve a symbolic name or hex string, black on failure
pub fn to_rgb(input: &str) -> Rgb {
    ColorValue::parse(input).rgb()
}

/// Linear per-channel blend from `from` (ratio 0) to `to` (ratio 1)
///
/// Channels are truncated toward zero, matching how the gradient rows were
/// always computed.
pub fn interpolate(from: Rgb, to: Rgb, ratio: f32) -> Rgb {
    let ratio = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) };
    let lerp = |a: u8, b: u8| {
        let value = a as f32 + (b as f32 - a as f32) * ratio;
        value.clamp(0.0, 255.0) as u8
    };
    Rgb::new(lerp(from.r, to.r), lerp(from.g, to.g), lerp(from.b, to.b))
}

/// Rotate the hue of every pixel by `degrees`, leaving alpha untouched
///
/// Returns a new image; `source` is never modified.
pub fn rotate_hue(source: &RgbaImage, degrees: f32) -> RgbaImage {
    let mut result = source.clone();
    let degrees = degrees.rem_euclid(360.0);
    if degrees == 0.0 || !degrees.is_finite() {
        return result;
    }

    for pixel in result.pixels_mut() {
        let [r, g, b, a] = pixel.0;

        let rgb = Srgb::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
        let mut hsv: Hsv = rgb.into_color();
        hsv.hue += degrees;
        let rotated: Srgb = hsv.into_color();

        pixel.0 = [
            to_channel(rotated.red),
            to_channel(rotated.green),
            to_channel(rotated.blue),
            a,
        ];
    }

    result
}

fn to_channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Look up a color name the way X11 does
///
/// Case and spaces are ignored. The CSS names come from `palette`; X11
/// entries that disagree with CSS, X11-only names and `grayN` win over them.
fn named_color(name: &str) -> Option<Rgb> {
    let key: String = name
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    if key.is_empty() {
        return None;
    }

    if let Some(&(_, (r, g, b))) = X11_COLORS.iter().find(|(candidate, _)| *candidate == key) {
        return Some(Rgb::new(r, g, b));
    }
    if let Some(level) = gray_level(&key) {
        return Some(Rgb::new(level, level, level));
    }
    palette::named::from_str(&key).map(|color| Rgb::new(color.red, color.green, color.blue))
}

/// `gray0` through `gray100` (or `grey`), as a percentage of white
fn gray_level(key: &str) -> Option<u8> {
    let digits = key.strip_prefix("gray").or_else(|| key.strip_prefix("grey"))?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let percent: u32 = digits.parse().ok().filter(|p| *p <= 100)?;
    Some(((percent * 255 + 50) / 100) as u8)
}

const X11_COLORS: &[(&str, (u8, u8, u8))] = &[
    ("gray", (190, 190, 190)),
    ("grey", (190, 190, 190)),
    ("green", (0, 255, 0)),
    ("maroon", (176, 48, 96)),
    ("purple", (160, 32, 240)),
    ("navyblue", (0, 0, 128)),
    ("lightgoldenrod", (238, 221, 130)),
    ("lightslateblue", (132, 112, 255)),
    ("violetred", (208, 32, 144)),
    ("webgray", (128, 128, 128)),
    ("webgrey", (128, 128, 128)),
    ("webgreen", (0, 128, 0)),
    ("webmaroon", (128, 0, 0)),
    ("webpurple", (128, 0, 128)),
];

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_hex_roundtrip_normalizes_case() {
        for input in ["#c5d8ed", "#1A0C11", "C93047", "#000000", "#FFFFFF"] {
            let expected = format!("#{}", input.trim_start_matches('#').to_lowercase());
            assert_eq!(to_rgb(input).to_hex(), expected, "input {input}");
        }
    }

    #[test]
    fn test_malformed_colors_are_black() {
        for input in ["", "#", "#12", "#12345", "#1234567", "#GGGGGG", "not-a-color", "rgb(1,2,3)", "gray101"] {
            assert_eq!(to_rgb(input), Rgb::BLACK, "input {input:?}");
        }
    }

    #[test]
    fn test_named_colors() {
        assert_eq!(to_rgb("white"), Rgb::new(255, 255, 255));
        assert_eq!(to_rgb("Light Blue"), Rgb::new(173, 216, 230));
        assert_eq!(to_rgb("GREY"), to_rgb("gray"));
    }

    #[test]
    fn test_short_hex_doubles_each_digit() {
        assert_eq!(to_rgb("#fff"), Rgb::new(255, 255, 255));
        assert_eq!(to_rgb("#1aF"), Rgb::new(0x11, 0xaa, 0xff));
        assert_eq!(to_rgb("#1aF").to_hex(), "#11aaff");
        assert_eq!(to_rgb("fff"), Rgb::BLACK);
    }

    #[test]
    fn test_full_x11_name_set() {
        assert_eq!(to_rgb("firebrick"), Rgb::new(178, 34, 34));
        assert_eq!(to_rgb("steel blue"), Rgb::new(70, 130, 180));
        assert_eq!(to_rgb("DodgerBlue"), Rgb::new(30, 144, 255));
        assert_eq!(to_rgb("forest green"), Rgb::new(34, 139, 34));
        assert_eq!(to_rgb("hotpink"), Rgb::new(255, 105, 180));
        assert_eq!(to_rgb("Navy Blue"), Rgb::new(0, 0, 128));
    }

    #[test]
    fn test_x11_values_win_over_css() {
        assert_eq!(to_rgb("gray"), Rgb::new(190, 190, 190));
        assert_eq!(to_rgb("green"), Rgb::new(0, 255, 0));
        assert_eq!(to_rgb("maroon"), Rgb::new(176, 48, 96));
        assert_eq!(to_rgb("purple"), Rgb::new(160, 32, 240));
        assert_eq!(to_rgb("dark gray"), Rgb::new(169, 169, 169));
    }

    #[test]
    fn test_numbered_grays() {
        assert_eq!(to_rgb("gray0"), Rgb::BLACK);
        assert_eq!(to_rgb("grey100"), Rgb::new(255, 255, 255));
        assert_eq!(to_rgb("Gray 40"), Rgb::new(102, 102, 102));
    }

    #[test]
    fn test_color_value_keeps_spelling() {
        assert_eq!(ColorValue::parse("white").to_string(), "white");
        assert_eq!(ColorValue::parse("#ABCDEF").to_string(), "#abcdef");
        let invalid = ColorValue::parse("bogus");
        assert!(!invalid.is_valid());
        assert_eq!(invalid.to_string(), "bogus");
        assert_eq!(invalid.rgb(), Rgb::BLACK);
    }

    #[test]
    fn test_interpolate_endpoints_and_identity() {
        let a = Rgb::new(201, 48, 71);
        let b = Rgb::new(41, 11, 15);

        assert_eq!(interpolate(a, b, 0.0), a);
        assert_eq!(interpolate(a, b, 1.0), b);
        for i in 0..=20 {
            let ratio = i as f32 / 20.0;
            assert_eq!(interpolate(a, a, ratio), a);
        }
    }

    #[test]
    fn test_interpolate_midpoint_truncates() {
        let mid = interpolate(Rgb::new(0, 0, 0), Rgb::new(255, 255, 1), 0.5);
        assert_eq!(mid, Rgb::new(127, 127, 0));
    }

    #[test]
    fn test_interpolate_clamps_ratio() {
        let a = Rgb::new(10, 20, 30);
        let b = Rgb::new(200, 100, 0);
        assert_eq!(interpolate(a, b, -1.0), a);
        assert_eq!(interpolate(a, b, 2.0), b);
    }

    fn sample_image() -> RgbaImage {
        let mut image = RgbaImage::new(3, 2);
        image.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        image.put_pixel(1, 0, Rgba([12, 200, 99, 0]));
        image.put_pixel(2, 0, Rgba([40, 40, 40, 17]));
        image.put_pixel(0, 1, Rgba([201, 48, 71, 128]));
        image.put_pixel(1, 1, Rgba([0, 0, 255, 254]));
        image.put_pixel(2, 1, Rgba([255, 255, 255, 1]));
        image
    }

    #[test]
    fn test_rotate_hue_zero_and_full_turn_are_identity() {
        let image = sample_image();
        assert_eq!(rotate_hue(&image, 0.0), image);
        assert_eq!(rotate_hue(&image, 360.0), rotate_hue(&image, 0.0));
        assert_eq!(rotate_hue(&image, -720.0), image);
    }

    #[test]
    fn test_rotate_hue_preserves_alpha() {
        let image = sample_image();
        for degrees in [1.0, 45.0, 120.0, 180.0, 359.5, -90.0] {
            let rotated = rotate_hue(&image, degrees);
            for (before, after) in image.pixels().zip(rotated.pixels()) {
                assert_eq!(before.0[3], after.0[3], "alpha changed at {degrees} degrees");
            }
        }
    }

    #[test]
    fn test_rotate_hue_red_to_green() {
        let mut image = RgbaImage::new(1, 1);
        image.put_pixel(0, 0, Rgba([255, 0, 0, 200]));

        let rotated = rotate_hue(&image, 120.0);
        let [r, g, b, a] = rotated.get_pixel(0, 0).0;
        assert!(r <= 1 && g >= 254 && b <= 1, "got ({r}, {g}, {b})");
        assert_eq!(a, 200);
        // source untouched
        assert_eq!(image.get_pixel(0, 0).0, [255, 0, 0, 200]);
    }
}
