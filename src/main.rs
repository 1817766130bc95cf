#![forbid(unsafe_code)]

mod assets;
mod cli;
mod color;
mod config;
mod constants;
mod debounce;
mod gui;
mod notification;
mod render;
mod sound;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, Level as TraceLevel};
use tracing_subscriber::FmtSubscriber;

use cli::Cli;

fn init_logging() -> Result<()> {
    // Parse log level from environment variable
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn main() -> Result<()> {
    init_logging()?;
    let cli = Cli::parse();

    let source = cli.settings_source(config::canonical_path(), std::env::args_os().nth(1));
    let resolved = config::resolve(&source, &cli.overrides());
    info!(
        path = %resolved.path.display(),
        modified = resolved.modified,
        persisted = resolved.persisted,
        "Resolved settings"
    );
    if resolved.created {
        notification::send(
            "Config Created",
            format!(
                "'{}' was not found and has been created with default settings.\n\
                 You can edit its sections ([Settings], [Background]) to customize text and background.",
                resolved.path.display()
            ),
        );
    }
    let settings = resolved.settings;
    info!(settings = ?settings, "Using settings");

    let image_path = cli.image.clone().unwrap_or_else(assets::default_image_path);
    let image = match assets::load_image(&image_path) {
        Ok(image) => image,
        Err(e) => {
            error!(error = ?e, "Cannot start without the foreground image");
            notification::send("Image Error", format!("{e:#}"));
            std::process::exit(1);
        }
    };

    if settings.sound_enabled {
        sound::spawn_launch_sound(assets::resolve_asset(&settings.launch_sound));
    }

    gui::run_gui(settings, image)
}
