//! egui front end: window, debounced resize handling and the canvas

mod app;
mod canvas;
mod constants;

pub use app::run_gui;
