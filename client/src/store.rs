//! Local persistence for the scene and the group mapping.
//!
//! DESIGN
//! ======
//! An explicitly owned store with caller-controlled load/save timing, not
//! ambient module-level storage. Two JSON files under one data directory:
//! `scene.json` (the whole scene, written wholesale) and `groups.json` (the
//! group-id to element-ids mapping).
//!
//! ERROR HANDLING
//! ==============
//! Loads never fail the caller: a missing or corrupt file is "nothing
//! saved", logged at warn level. Saves return errors — the autosaver
//! swallows them, but explicit user actions want to know.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::fs;
use std::path::{Path, PathBuf};

use canvas::{GroupTracker, Scene};
use tracing::warn;

const SCENE_FILE: &str = "scene.json";
const GROUPS_FILE: &str = "groups.json";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// File-backed store rooted at one data directory.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The saved scene, or `None` when nothing usable is on disk.
    #[must_use]
    pub fn load_scene(&self) -> Option<Scene> {
        self.load_json(SCENE_FILE)
    }

    /// Persist the whole scene.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` on serialization or write failure.
    pub fn save_scene(&self, scene: &Scene) -> Result<(), StoreError> {
        self.save_json(SCENE_FILE, scene)
    }

    /// The saved group mapping, or `None` when nothing usable is on disk.
    #[must_use]
    pub fn load_groups(&self) -> Option<GroupTracker> {
        self.load_json(GROUPS_FILE)
    }

    /// Persist the group mapping.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` on serialization or write failure.
    pub fn save_groups(&self, tracker: &GroupTracker) -> Result<(), StoreError> {
        self.save_json(GROUPS_FILE, tracker)
    }

    fn load_json<T: serde::de::DeserializeOwned>(&self, file: &str) -> Option<T> {
        let path = self.dir.join(file);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read saved state");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to parse saved state");
                None
            }
        }
    }

    fn save_json<T: serde::Serialize>(&self, file: &str, value: &T) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let raw = serde_json::to_string(value)?;
        fs::write(self.dir.join(file), raw)?;
        Ok(())
    }

    /// The directory this store writes into.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
