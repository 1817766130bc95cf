//! Render parameter math
//!
//! Everything here is recomputed from the settings and the current viewport
//! on every draw; nothing survives a resize. All sizes are device pixels.

use crate::color::{interpolate, Rgb};
use crate::config::{BackgroundMode, Settings};
use crate::constants::render::*;

/// Drawable area reported by the window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Non-positive sizes mean the window isn't laid out yet
    pub fn is_ready(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BackgroundFill {
    Solid(Rgb),
    /// One color per viewport row, top to bottom
    Gradient(Vec<Rgb>),
}

/// Scaled image size and its top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePlacement {
    pub width: u32,
    pub height: u32,
    pub x: f32,
    pub y: f32,
}

impl ImagePlacement {
    pub fn center_x(&self) -> f32 {
        self.x + self.width as f32 / 2.0
    }
}

/// Caption, anchored at the center of its bounding box
#[derive(Debug, Clone, PartialEq)]
pub struct TextPlacement {
    pub content: String,
    pub color: Rgb,
    pub center_x: f32,
    pub center_y: f32,
    pub font_size: u32,
    pub wrap_width: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderParams {
    pub viewport: Viewport,
    pub background: BackgroundFill,
    pub image: ImagePlacement,
    pub text: TextPlacement,
    /// Hue rotation to apply to the scaled image copy
    pub hue_shift: Option<f32>,
}

impl RenderParams {
    /// `None` when the viewport isn't ready; that draw is skipped
    pub fn compute(settings: &Settings, viewport: Viewport, image_size: (u32, u32)) -> Option<Self> {
        if !viewport.is_ready() || image_size.0 == 0 || image_size.1 == 0 {
            return None;
        }

        let image = scale_image(viewport, image_size, settings.margin_factor);
        let text = place_text(settings, &image);

        Some(Self {
            viewport,
            background: background_fill(settings, viewport.height),
            image,
            text,
            hue_shift: settings.color_shift_enabled.then_some(settings.static_hue_offset),
        })
    }
}

pub fn background_fill(settings: &Settings, height: i32) -> BackgroundFill {
    let bg = &settings.background;
    match &bg.mode {
        BackgroundMode::Solid => BackgroundFill::Solid(bg.color.rgb()),
        BackgroundMode::Gradient => {
            let rows = height.max(0) as usize;
            BackgroundFill::Gradient(gradient_rows(bg.start_color.rgb(), bg.end_color.rgb(), rows))
        }
        BackgroundMode::Unknown(_) => {
            let (r, g, b) = FALLBACK_BACKGROUND;
            BackgroundFill::Solid(Rgb::new(r, g, b))
        }
    }
}

/// Row `i` gets `interpolate(start, end, i / (rows - 1))`, ratio 0 for a single row
pub fn gradient_rows(start: Rgb, end: Rgb, rows: usize) -> Vec<Rgb> {
    (0..rows)
        .map(|i| {
            let ratio = if rows > 1 { i as f32 / (rows - 1) as f32 } else { 0.0 };
            interpolate(start, end, ratio)
        })
        .collect()
}

/// Fit inside the viewport, shrink by the margin factor, center
pub fn scale_image(viewport: Viewport, (image_w, image_h): (u32, u32), margin_factor: f32) -> ImagePlacement {
    let (vw, vh) = (viewport.width as f64, viewport.height as f64);
    let (iw, ih) = (image_w as f64, image_h as f64);

    let scale = (vw / iw).min(vh / ih) * margin_factor as f64;
    let width = ((iw * scale).floor() as u32).max(1);
    let height = ((ih * scale).floor() as u32).max(1);

    ImagePlacement {
        width,
        height,
        x: (vw as f32 - width as f32) / 2.0,
        y: (vh as f32 - height as f32) / 2.0,
    }
}

pub fn place_text(settings: &Settings, image: &ImagePlacement) -> TextPlacement {
    let width = image.width as f32;
    let height = image.height as f32;

    let font_size = ((BASE_FONT_SIZE * width / BASE_IMAGE_WIDTH_FOR_FONT).floor() as u32).max(MIN_FONT_SIZE);
    let wrap_width = (width * TEXT_WRAP_RATIO).max(MIN_WRAP_WIDTH);

    TextPlacement {
        content: settings.display_text.clone(),
        color: settings.text_color.rgb(),
        center_x: image.center_x(),
        center_y: image.y + height * TEXT_OFFSET_RATIO,
        font_size,
        wrap_width,
    }
}
