//! In-process analysis store

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::AnalysisStore;
use crate::models::{OwnerId, StoredDocument};
use crate::Result;

/// Analysis store backed by a map; contents vanish with the process
#[derive(Debug, Default)]
pub struct MemoryAnalysisStore {
    documents: RwLock<HashMap<OwnerId, StoredDocument>>,
}

impl MemoryAnalysisStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AnalysisStore for MemoryAnalysisStore {
    async fn get(&self, owner: &OwnerId) -> Result<Option<StoredDocument>> {
        Ok(self.documents.read().await.get(owner).cloned())
    }

    async fn put(&self, document: &StoredDocument) -> Result<()> {
        self.documents
            .write()
            .await
            .insert(document.owner_id().clone(), document.clone());
        Ok(())
    }
}
