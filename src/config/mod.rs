//! Settings for why-not-zoidberg
//!
//! - **settings**: the typed, immutable `Settings` record and its defaults
//! - **ini**: reader and value sanitizer for the `key = value` settings file
//! - **writer**: rewrites the file with a comment next to each key
//! - **resolver**: merges defaults, the file and command-line overrides

pub mod ini;
pub mod resolver;
pub mod settings;
pub mod writer;

use std::path::PathBuf;

pub use resolver::{resolve, CliOverrides, Resolved, SettingsSource};
pub use settings::{BackgroundMode, Settings};

/// Canonical settings location, falling back to the install directory
pub fn canonical_path() -> PathBuf {
    let mut path = dirs::config_dir()
        .map(|dir| dir.join(crate::constants::config::APP_DIR))
        .unwrap_or_else(crate::assets::install_dir);
    path.push(crate::constants::config::FILENAME);
    path
}
