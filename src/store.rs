use std::path::{Path, PathBuf};

use eyre::Result;
use log::debug;

use crate::Track;

fn default_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ytdeck")
        .join("tracks.json")
}

/// The track library, persisted as a single JSON document.
#[derive(Debug, Clone)]
pub struct TrackStore {
    path: PathBuf,
}

impl TrackStore {
    /// Store at the platform-local data directory.
    pub fn open_default() -> Self {
        Self { path: default_path() }
    }

    /// Store under a caller-chosen directory.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join("tracks.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all tracks, newest first. A missing file is an empty library,
    /// not an error.
    pub fn load(&self) -> Result<Vec<Track>> {
        if !self.path.exists() {
            debug!("No track file at {}, starting empty", self.path.display());
            return Ok(Vec::new());
        }
        let data = std::fs::read_to_string(&self.path)?;
        let mut tracks: Vec<Track> = serde_json::from_str(&data)?;
        tracks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        debug!("Loaded {} tracks from {}", tracks.len(), self.path.display());
        Ok(tracks)
    }

    /// Write the whole library back out.
    pub fn save(&self, tracks: &[Track]) -> Result<()> {
        std::fs::create_dir_all(self.path.parent().unwrap())?;
        let data = serde_json::to_string_pretty(tracks)?;
        std::fs::write(&self.path, data)?;
        debug!("Saved {} tracks to {}", tracks.len(), self.path.display());
        Ok(())
    }
}
