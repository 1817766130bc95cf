//! Display surface: turns `RenderParams` into egui textures and paint calls
//!
//! The two drawable items (background strip, scaled image) are allocated on
//! the first render and updated in place afterwards.

use eframe::egui::{self, Color32, ColorImage, FontId, Painter, Rect, TextureHandle, TextureOptions};
use image::imageops::{self, FilterType};
use image::RgbaImage;
use tracing::debug;

use super::constants::{BACKGROUND_TEXTURE, IMAGE_TEXTURE};
use crate::color::{rotate_hue, Rgb};
use crate::render::{BackgroundFill, RenderParams, Viewport};

#[derive(Default)]
pub struct Canvas {
    background: Option<TextureHandle>,
    image: Option<TextureHandle>,
    params: Option<RenderParams>,
}

impl Canvas {
    pub fn has_rendered(&self) -> bool {
        self.params.is_some()
    }

    pub fn rendered_viewport(&self) -> Option<Viewport> {
        self.params.as_ref().map(|params| params.viewport)
    }

    /// Rebuild both textures from fresh params; `source` is only read
    pub fn apply(&mut self, ctx: &egui::Context, source: &RgbaImage, params: RenderParams) {
        let background = background_image(&params.background);
        upsert(ctx, &mut self.background, BACKGROUND_TEXTURE, background, TextureOptions::NEAREST);

        let placement = params.image;
        let scaled = imageops::resize(source, placement.width, placement.height, FilterType::Lanczos3);
        let scaled = match params.hue_shift {
            Some(degrees) => rotate_hue(&scaled, degrees),
            None => scaled,
        };
        let image = ColorImage::from_rgba_unmultiplied(
            [scaled.width() as usize, scaled.height() as usize],
            scaled.as_raw(),
        );
        upsert(ctx, &mut self.image, IMAGE_TEXTURE, image, TextureOptions::LINEAR);

        debug!(
            viewport = ?params.viewport,
            width = placement.width,
            height = placement.height,
            font_size = params.text.font_size,
            "Rendered canvas"
        );
        self.params = Some(params);
    }

    /// Paint the last rendered state into `rect`
    ///
    /// Params are in device pixels; egui paints in points.
    pub fn paint(&self, painter: &Painter, rect: Rect, pixels_per_point: f32) {
        let Some(params) = &self.params else {
            return;
        };
        let uv = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
        let to_points = |px: f32| px / pixels_per_point;

        if let Some(background) = &self.background {
            painter.image(background.id(), rect, uv, Color32::WHITE);
        }

        if let Some(image) = &self.image {
            let placement = params.image;
            let image_rect = Rect::from_min_size(
                rect.min + egui::vec2(to_points(placement.x), to_points(placement.y)),
                egui::vec2(to_points(placement.width as f32), to_points(placement.height as f32)),
            );
            painter.image(image.id(), image_rect, uv, Color32::WHITE);
        }

        let text = &params.text;
        if text.content.is_empty() {
            return;
        }
        let color = color32(text.color);
        let galley = painter.layout(
            text.content.clone(),
            FontId::proportional(to_points(text.font_size as f32)),
            color,
            to_points(text.wrap_width),
        );
        let center = rect.min + egui::vec2(to_points(text.center_x), to_points(text.center_y));
        let origin = center - galley.size() / 2.0;
        painter.galley(origin, galley, color);
    }
}

fn upsert(
    ctx: &egui::Context,
    slot: &mut Option<TextureHandle>,
    name: &str,
    image: ColorImage,
    options: TextureOptions,
) {
    match slot {
        Some(handle) => handle.set(image, options),
        None => *slot = Some(ctx.load_texture(name, image, options)),
    }
}

/// Solid fills are a single texel; gradients are a one-texel-wide column
fn background_image(fill: &BackgroundFill) -> ColorImage {
    let rows: Vec<Rgb> = match fill {
        BackgroundFill::Solid(rgb) => vec![*rgb],
        BackgroundFill::Gradient(rows) if !rows.is_empty() => rows.clone(),
        BackgroundFill::Gradient(_) => vec![Rgb::BLACK],
    };
    let rgba: Vec<u8> = rows
        .iter()
        .flat_map(|rgb| [rgb.r, rgb.g, rgb.b, u8::MAX])
        .collect();
    ColorImage::from_rgba_unmultiplied([1, rows.len()], &rgba)
}

fn color32(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.r, rgb.g, rgb.b)
}
