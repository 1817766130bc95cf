//! Application-wide constants
//!
//! This module contains all magic numbers and string literals used throughout
//! the application, providing a single source of truth for constant values.

/// Application identity
pub mod app {
    /// Name used for the eframe app id and notifications
    pub const NAME: &str = "why-not-zoidberg";

    /// Main window title
    pub const WINDOW_TITLE: &str = "Why not Zoidberg?";
}

/// Settings file location and format
pub mod config {
    /// Directory under the platform config dir
    pub const APP_DIR: &str = "why-not-zoidberg";

    /// Settings filename
    pub const FILENAME: &str = "config.ini";

    /// Extension that marks a positional argument as an alternate settings file
    pub const EXTENSION: &str = "ini";

    /// Section holding text, sound and color-shift keys
    pub const SECTION_SETTINGS: &str = "Settings";

    /// Section holding background keys
    pub const SECTION_BACKGROUND: &str = "Background";
}

/// Built-in defaults, used when the settings file is missing keys
pub mod defaults {
    pub const DISPLAY_TEXT: &str = "Woop woop woop!";
    pub const TEXT_COLOR: &str = "#c5d8ed";
    pub const BACKGROUND_TYPE: &str = "solid";
    /// Maroon
    pub const BACKGROUND_COLOR: &str = "#1a0c11";
    /// Zoidbergish red
    pub const GRADIENT_START: &str = "#c93047";
    /// Zoidbergish dark red
    pub const GRADIENT_END: &str = "#290b0f";
    pub const SOUND_ENABLED: bool = false;
    pub const LAUNCH_SOUND: &str = "woop.wav";
    pub const COLOR_SHIFT_ENABLED: bool = false;
    pub const STATIC_HUE_OFFSET: f32 = 0.0;
}

/// Asset locations, relative to the installation directory
pub mod assets {
    pub const IMAGE_DIR: &str = "Zoidberg";
    pub const IMAGE_FILE: &str = "Zoidberg 324.png";
}

/// Render parameter math
pub mod render {
    /// Fraction of the fit-to-viewport scale actually used (earlier builds used 1.0)
    pub const MARGIN_FACTOR: f32 = 0.85;

    /// Caption center sits this far down the scaled image
    pub const TEXT_OFFSET_RATIO: f32 = 0.20;

    /// Font size at the reference image width
    pub const BASE_FONT_SIZE: f32 = 20.0;

    /// Reference image width for `BASE_FONT_SIZE`
    pub const BASE_IMAGE_WIDTH_FOR_FONT: f32 = 300.0;

    /// Smallest legible caption size in pixels
    pub const MIN_FONT_SIZE: u32 = 8;

    /// Caption wraps at this fraction of the scaled image width
    pub const TEXT_WRAP_RATIO: f32 = 0.8;

    /// Minimum wrap width in pixels
    pub const MIN_WRAP_WIDTH: f32 = 10.0;

    /// Fill used for unrecognized background types (#F0F0F0)
    pub const FALLBACK_BACKGROUND: (u8, u8, u8) = (0xF0, 0xF0, 0xF0);
}

/// Resize handling
pub mod resize {
    /// Quiet period before a burst of resize events triggers a redraw
    pub const DEBOUNCE_MS: u64 = 250;
}
