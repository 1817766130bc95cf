//! Fire-and-forget launch sound playback

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::thread;

use anyhow::{Context, Result};
use rodio::{Decoder, OutputStream, Sink};
use tracing::{info, warn};

/// Play `path` on a detached thread; failures are only logged
pub fn spawn_launch_sound(path: PathBuf) {
    let spawned = thread::Builder::new()
        .name("launch-sound".to_string())
        .spawn(move || {
            info!(path = %path.display(), "Playing launch sound");
            if let Err(e) = play(&path) {
                warn!(path = %path.display(), error = ?e, "Launch sound disabled for this session");
            }
        });

    if let Err(e) = spawned {
        warn!(error = %e, "Failed to spawn launch sound thread");
    }
}

fn play(path: &Path) -> Result<()> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open launch sound {}", path.display()))?;
    let source = Decoder::new(BufReader::new(file))
        .with_context(|| format!("Failed to decode launch sound {}", path.display()))?;

    // The stream must stay alive until playback ends
    let (_stream, handle) = OutputStream::try_default().context("No audio output device available")?;
    let sink = Sink::try_new(&handle).context("Failed to create audio sink")?;
    sink.append(source);
    sink.sleep_until_end();
    Ok(())
}
