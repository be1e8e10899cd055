//! Persistence capability: fire-and-forget plan storage.
//!
//! One trait, one production implementation (a JSON file in the platform
//! data directory). A failed save never rolls back in-memory state; the
//! app surfaces it as a status-bar warning.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::Task;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("could not determine a data directory for this platform")]
    NoDataDir,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Storage boundary for the task list. The host environment picks the
/// implementation at startup.
pub trait Persistence {
    fn save(&self, tasks: &[Task]) -> Result<(), PersistenceError>;
    fn load(&self) -> Result<Vec<Task>, PersistenceError>;
}

/// Pretty-printed JSON file storage.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store at an explicit path.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the platform per-user data directory.
    pub fn in_user_data_dir() -> Result<Self, PersistenceError> {
        let dirs = directories::ProjectDirs::from("", "", "planify")
            .ok_or(PersistenceError::NoDataDir)?;
        Ok(Self::at_path(dirs.data_dir().join("tasks.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Persistence for JsonFileStore {
    fn save(&self, tasks: &[Task]) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(tasks)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    fn load(&self) -> Result<Vec<Task>, PersistenceError> {
        // No save file yet is a normal first run, not an error.
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let json = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }
}
