use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use super::state::GradebookState;

/// Storage abstraction so the service can be exercised without a disk.
pub trait SnapshotStore: Send + Sync {
    fn load(&self) -> Result<Option<GradebookState>, StoreError>;
    fn save(&self, state: &GradebookState) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("snapshot io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("snapshot store unavailable: {0}")]
    Unavailable(String),
}

/// Pretty-printed JSON snapshot on the local filesystem.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Sibling file each save goes through before it is renamed into place.
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Result<Option<GradebookState>, StoreError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let mut state: GradebookState = serde_json::from_slice(&bytes)?;
        state.sanitize();
        Ok(Some(state))
    }

    fn save(&self, state: &GradebookState) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec_pretty(state)?;
        let staging = self.staging_path();
        std::fs::write(&staging, json)?;
        if let Err(err) = std::fs::rename(&staging, &self.path) {
            let _ = std::fs::remove_file(&staging);
            return Err(err.into());
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    snapshot: Arc<Mutex<Option<GradebookState>>>,
}

impl SnapshotStore for InMemoryStore {
    fn load(&self) -> Result<Option<GradebookState>, StoreError> {
        let guard = self
            .snapshot
            .lock()
            .map_err(|_| StoreError::Unavailable("snapshot mutex poisoned".to_string()))?;
        Ok(guard.clone())
    }

    fn save(&self, state: &GradebookState) -> Result<(), StoreError> {
        let mut guard = self
            .snapshot
            .lock()
            .map_err(|_| StoreError::Unavailable("snapshot mutex poisoned".to_string()))?;
        *guard = Some(state.clone());
        Ok(())
    }
}
