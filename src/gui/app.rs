//! Main window implemented with egui/eframe

use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use eframe::{egui, CreationContext, NativeOptions};
use image::RgbaImage;
use tracing::{debug, info};

use super::canvas::Canvas;
use super::constants::*;
use crate::config::Settings;
use crate::constants::{app, resize};
use crate::debounce::Debouncer;
use crate::render::{RenderParams, Viewport};

struct ZoidbergApp {
    settings: Settings,
    source: RgbaImage,
    canvas: Canvas,
    resize: Debouncer<Viewport>,
    last_viewport: Option<Viewport>,
}

impl ZoidbergApp {
    fn new(_cc: &CreationContext<'_>, settings: Settings, source: RgbaImage) -> Self {
        info!("Initializing Zoidberg window");
        Self::with_image(settings, source)
    }

    fn with_image(settings: Settings, source: RgbaImage) -> Self {
        Self {
            settings,
            source,
            canvas: Canvas::default(),
            resize: Debouncer::new(Duration::from_millis(resize::DEBOUNCE_MS)),
            last_viewport: None,
        }
    }

    fn render(&mut self, ctx: &egui::Context, viewport: Viewport) {
        debug!(previous = ?self.canvas.rendered_viewport(), ?viewport, "Rendering");
        match RenderParams::compute(&self.settings, viewport, self.source.dimensions()) {
            Some(params) => self.canvas.apply(ctx, &self.source, params),
            None => debug!(?viewport, "Viewport not ready, skipping render"),
        }
    }

    /// First usable size renders right away; later changes go through the debouncer
    fn track_viewport(&mut self, ctx: &egui::Context, viewport: Viewport, now: Instant) {
        if self.last_viewport == Some(viewport) {
            return;
        }
        self.last_viewport = Some(viewport);

        if self.canvas.has_rendered() {
            self.resize.notify(now, viewport);
        } else {
            self.render(ctx, viewport);
        }
    }

    /// Feed the current size in and render if a debounced resize is due
    fn sync_viewport(&mut self, ctx: &egui::Context, viewport: Viewport, now: Instant) {
        self.track_viewport(ctx, viewport, now);
        if let Some(viewport) = self.resize.poll(now) {
            self.render(ctx, viewport);
        }
    }
}

impl eframe::App for ZoidbergApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let pixels_per_point = ctx.pixels_per_point();

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let viewport = Viewport::new(
                    (rect.width() * pixels_per_point).round() as i32,
                    (rect.height() * pixels_per_point).round() as i32,
                );

                self.sync_viewport(ctx, viewport, now);

                self.canvas.paint(ui.painter(), rect, pixels_per_point);
            });

        if let Some(wait) = self.resize.remaining(now) {
            ctx.request_repaint_after(wait);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Zoidberg exiting");
    }
}

pub fn run_gui(settings: Settings, source: RgbaImage) -> Result<()> {
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
            .with_min_inner_size([WINDOW_MIN_WIDTH, WINDOW_MIN_HEIGHT])
            .with_title(app::WINDOW_TITLE),
        ..Default::default()
    };

    eframe::run_native(
        app::NAME,
        options,
        Box::new(move |cc| Ok(Box::new(ZoidbergApp::new(cc, settings, source)))),
    )
    .map_err(|err| anyhow!("Failed to launch window: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn app() -> ZoidbergApp {
        ZoidbergApp::with_image(Settings::default(), RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 255])))
    }

    #[test]
    fn test_first_usable_size_renders_immediately() {
        let ctx = egui::Context::default();
        let mut app = app();
        let now = Instant::now();

        app.sync_viewport(&ctx, Viewport::new(0, 0), now);
        assert_eq!(app.canvas.rendered_viewport(), None);

        app.sync_viewport(&ctx, Viewport::new(500, 550), now);
        assert_eq!(app.canvas.rendered_viewport(), Some(Viewport::new(500, 550)));
        assert_eq!(app.resize.remaining(now), None);
    }

    #[test]
    fn test_unchanged_size_is_a_no_op() {
        let ctx = egui::Context::default();
        let mut app = app();
        let now = Instant::now();

        app.sync_viewport(&ctx, Viewport::new(500, 550), now);
        app.sync_viewport(&ctx, Viewport::new(500, 550), now + Duration::from_millis(10));
        assert_eq!(app.resize.remaining(now), None);
    }

    #[test]
    fn test_later_sizes_are_debounced() {
        let ctx = egui::Context::default();
        let mut app = app();
        let start = Instant::now();
        let quiet = Duration::from_millis(resize::DEBOUNCE_MS);

        app.sync_viewport(&ctx, Viewport::new(500, 550), start);
        app.sync_viewport(&ctx, Viewport::new(600, 600), start);
        app.sync_viewport(&ctx, Viewport::new(640, 610), start + Duration::from_millis(100));
        assert_eq!(app.canvas.rendered_viewport(), Some(Viewport::new(500, 550)));

        // Same size while waiting; only the clock moves
        let settled = start + Duration::from_millis(100) + quiet;
        app.sync_viewport(&ctx, Viewport::new(640, 610), settled - Duration::from_millis(1));
        assert_eq!(app.canvas.rendered_viewport(), Some(Viewport::new(500, 550)));

        app.sync_viewport(&ctx, Viewport::new(640, 610), settled);
        assert_eq!(app.canvas.rendered_viewport(), Some(Viewport::new(640, 610)));
        assert_eq!(app.resize.remaining(start + Duration::from_secs(5)), None);
    }
}
