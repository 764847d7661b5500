//! Local persistence of the current build.
//!
//! One blob under a fixed key in the storage directory. Loading is
//! best-effort: a missing blob means "no saved build", and a blob that does
//! not parse is deleted and treated the same way.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::aggregate;
use crate::error::Result;
use crate::selection::{Build, BuildSnapshot};

/// File name of the saved build inside the storage directory
pub const SNAPSHOT_KEY: &str = "saved-pc-build.json";

/// What gets written to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedBuild {
    pub components: BuildSnapshot,
    #[serde(default)]
    pub total_price: u64,
    #[serde(default)]
    pub power_consumption: u32,
    pub timestamp: DateTime<Utc>,
}

impl SavedBuild {
    pub fn capture(build: &Build) -> Self {
        Self {
            components: build.snapshot(),
            total_price: aggregate::total_price(build),
            power_consumption: aggregate::total_power(build),
            timestamp: Utc::now(),
        }
    }
}

/// Result of a best-effort load
#[derive(Debug, Clone, PartialEq)]
pub enum StoredBuild {
    Missing,
    /// The blob was unreadable and has been removed
    Discarded(String),
    Found(SavedBuild),
}

/// The saved-build slot of one session
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(SNAPSHOT_KEY)
    }

    pub fn save(&self, build: &Build) -> Result<SavedBuild> {
        let saved = SavedBuild::capture(build);
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(&saved)?;
        fs::write(self.path(), json)?;
        debug!("Saved build with {} components to {:?}", saved.components.len(), self.path());
        Ok(saved)
    }

    pub fn load(&self) -> StoredBuild {
        let path = self.path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return StoredBuild::Missing,
            Err(e) => {
                warn!("Cannot read saved build {:?}: {}", path, e);
                return StoredBuild::Discarded(e.to_string());
            }
        };

        match serde_json::from_str::<SavedBuild>(&content) {
            Ok(saved) => {
                info!("Restored saved build from {}", saved.timestamp.to_rfc3339());
                StoredBuild::Found(saved)
            }
            Err(e) => {
                warn!("Discarding malformed saved build {:?}: {}", path, e);
                if let Err(remove_err) = fs::remove_file(&path) {
                    warn!("Could not remove {:?}: {}", path, remove_err);
                }
                StoredBuild::Discarded(e.to_string())
            }
        }
    }

    /// Forget the saved build. Missing is not an error.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(self.path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
