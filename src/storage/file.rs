//! File-backed state storage
//!
//! Persists the state document as JSON under the platform data directory,
//! following the XDG Base Directory Specification. A missing or malformed
//! file degrades to an empty document with a warning; write failures are
//! real errors.

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, error, warn};

use super::{StateDocument, StateStorage};
use crate::Result;

/// File-backed implementation of [`StateStorage`]
#[derive(Debug)]
pub struct FileStore {
    /// Path to the state file
    state_path: PathBuf,
}

impl FileStore {
    /// Create a store over the given state file path
    pub fn new(state_path: PathBuf) -> Self {
        Self { state_path }
    }

    /// Create a store at the default platform location
    pub fn at_default_path() -> Result<Self> {
        Ok(Self::new(default_state_path()?))
    }

    /// The path this store reads and writes
    pub fn path(&self) -> &PathBuf {
        &self.state_path
    }
}

#[async_trait]
impl StateStorage for FileStore {
    async fn load(&self) -> Result<StateDocument> {
        if !self.state_path.exists() {
            debug!("State file does not exist: {:?}", self.state_path);
            return Ok(StateDocument::default());
        }

        match fs::read_to_string(&self.state_path).await {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(document) => {
                    debug!("Loaded state from: {:?}", self.state_path);
                    Ok(document)
                }
                Err(e) => {
                    warn!("Error parsing state file, starting fresh: {}", e);
                    Ok(StateDocument::default())
                }
            },
            Err(e) => {
                warn!("Failed to read state file {:?}: {}", self.state_path, e);
                Ok(StateDocument::default())
            }
        }
    }

    async fn save(&self, document: &StateDocument) -> Result<()> {
        let content = serde_json::to_string_pretty(document)?;

        // Ensure parent directory exists
        if let Some(parent) = self.state_path.parent()
            && let Err(e) = fs::create_dir_all(parent).await
        {
            error!("Failed to create state directory {:?}: {}", parent, e);
            return Err(crate::Error::storage(
                "directory_creation",
                &format!("Directory creation failed: {}", e),
            ));
        }

        match fs::write(&self.state_path, content).await {
            Ok(_) => {
                debug!("State saved to: {:?}", self.state_path);
                Ok(())
            }
            Err(e) => {
                error!("Failed to write state file {:?}: {}", self.state_path, e);
                Err(crate::Error::storage(
                    "file_write",
                    &format!("Write failed: {}", e),
                ))
            }
        }
    }
}

/// Get the state file path following the XDG Base Directory Specification
pub fn default_state_path() -> Result<PathBuf> {
    let data_dir = if let Ok(xdg_data) = std::env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg_data).join("slt-usage-checker")
    } else if let Some(data_dir) = dirs::data_dir() {
        data_dir.join("slt-usage-checker")
    } else {
        // Fallback to current directory if no data dir is available
        warn!("Could not determine data directory, using current directory for state");
        std::env::current_dir()?.join(".slt-usage-checker")
    };

    Ok(data_dir.join("state.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Credentials;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_save_and_load_state() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("state.json"));

        let mut doc = StateDocument::default();
        doc.set_credentials(&Credentials::new("token", "client", "94712345678"));
        doc.app_version = Some("1.4.0".to_string());

        store.save(&doc).await.unwrap();
        let loaded = store.load().await.unwrap();

        assert_eq!(loaded.credentials().unwrap().auth_token, "token");
        assert_eq!(loaded.app_version.as_deref(), Some("1.4.0"));
    }

    #[tokio::test]
    async fn test_load_nonexistent_state() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("missing.json"));

        let loaded = store.load().await.unwrap();
        assert!(loaded.credentials().is_none());
    }

    #[tokio::test]
    async fn test_malformed_state_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        tokio::fs::write(&path, "invalid json content").await.unwrap();

        let store = FileStore::new(path);
        let loaded = store.load().await.unwrap();

        // Should return an empty document on parse error
        assert!(loaded.credentials().is_none());
    }

    #[tokio::test]
    async fn test_save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("state.json"));

        store.save(&StateDocument::default()).await.unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_default_state_path_with_xdg() {
        unsafe {
            std::env::set_var("XDG_DATA_HOME", "/tmp/test_data");
        }

        let path = default_state_path().unwrap();
        assert!(path.to_string_lossy().contains("slt-usage-checker"));
        assert!(path.to_string_lossy().ends_with("state.json"));

        unsafe {
            std::env::remove_var("XDG_DATA_HOME");
        }
    }
}
