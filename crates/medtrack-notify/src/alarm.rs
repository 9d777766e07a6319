//! Alarm sound playback.
//!
//! A single shared sound asset backs every tune id; the tune chosen at
//! reminder creation is stored with the record but not acted on here.

use std::path::PathBuf;

use tokio::process::Command;
use tracing::{debug, warn};

/// Player commands probed in order, with the asset each plays.
const SOUND_CANDIDATES: &[(&str, &str)] = &[
    ("paplay", "/usr/share/sounds/freedesktop/stereo/complete.oga"),
    ("aplay", "/usr/share/sounds/sound-icons/guitar-11.wav"),
    ("aplay", "/usr/share/sounds/generic.wav"),
];

/// Spawns a system audio player for reminder alarms.
///
/// Playback is best-effort: construction resolves the first candidate
/// whose asset exists, and `play` is a no-op when none was found or the
/// spawn fails.
#[derive(Debug, Clone)]
pub struct Alarm {
    player: Option<(String, PathBuf)>,
}

impl Alarm {
    /// Resolve a player from the known asset locations.
    pub fn detect() -> Self {
        let player = resolve(SOUND_CANDIDATES);
        if player.is_none() {
            debug!("no alarm sound available, playback disabled");
        }
        Self { player }
    }

    /// An alarm that never plays anything.
    pub fn disabled() -> Self {
        Self { player: None }
    }

    /// Whether a player and asset were found.
    pub fn is_available(&self) -> bool {
        self.player.is_some()
    }

    /// Play the shared alarm sound. Every tune id maps to the same
    /// sound.
    pub fn play(&self, _tune_id: &str) {
        let Some((command, asset)) = &self.player else {
            return;
        };

        match Command::new(command)
            .arg(asset)
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .spawn()
        {
            Ok(_) => debug!(%command, asset = %asset.display(), "alarm playing"),
            Err(e) => warn!(%command, error = %e, "failed to spawn alarm player"),
        }
    }
}

fn resolve(candidates: &[(&str, &str)]) -> Option<(String, PathBuf)> {
    candidates
        .iter()
        .map(|(command, asset)| (command.to_string(), PathBuf::from(asset)))
        .find(|(_, asset)| asset.exists())
}
