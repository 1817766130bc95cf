//! Locating and loading files shipped next to the executable

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::RgbaImage;
use tracing::info;

use crate::constants::assets;

/// Directory containing the running executable, or `.` if unknown
pub fn install_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Resolve an asset path against the install directory unless it is absolute
pub fn resolve_asset(name: impl AsRef<Path>) -> PathBuf {
    resolve_against(&install_dir(), name.as_ref())
}

fn resolve_against(base: &Path, name: &Path) -> PathBuf {
    if name.is_absolute() {
        name.to_path_buf()
    } else {
        base.join(name)
    }
}

pub fn default_image_path() -> PathBuf {
    install_dir().join(assets::IMAGE_DIR).join(assets::IMAGE_FILE)
}

/// Decode the foreground image as RGBA; images without alpha become opaque
pub fn load_image(path: &Path) -> Result<RgbaImage> {
    if !path.exists() {
        anyhow::bail!("Zoidberg image not found at '{}'", path.display());
    }
    let image = image::open(path)
        .with_context(|| format!("Failed to load Zoidberg image '{}'", path.display()))?
        .to_rgba8();
    info!(path = %path.display(), width = image.width(), height = image.height(), "Loaded foreground image");
    Ok(image)
}
