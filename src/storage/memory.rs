//! In-memory state storage
//!
//! Fake implementation of [`StateStorage`] used by the test suite and as the
//! natural substitution seam for the storage capability.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{StateDocument, StateStorage};
use crate::Result;

/// In-memory implementation of [`StateStorage`]
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: RwLock<StateDocument>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with the given document
    pub fn with_document(document: StateDocument) -> Self {
        Self {
            document: RwLock::new(document),
        }
    }
}

#[async_trait]
impl StateStorage for MemoryStore {
    async fn load(&self) -> Result<StateDocument> {
        Ok(self.document.read().await.clone())
    }

    async fn save(&self, document: &StateDocument) -> Result<()> {
        *self.document.write().await = document.clone();
        Ok(())
    }
}
