//! GUI-specific constants for window geometry and texture names

/// Main window dimensions
pub const WINDOW_WIDTH: f32 = 500.0;
pub const WINDOW_HEIGHT: f32 = 550.0;
pub const WINDOW_MIN_WIDTH: f32 = 300.0;
pub const WINDOW_MIN_HEIGHT: f32 = 350.0;

/// Texture names (shown in egui's texture inspector)
pub const BACKGROUND_TEXTURE: &str = "background";
pub const IMAGE_TEXTURE: &str = "zoidberg";
