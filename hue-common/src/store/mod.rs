//! Durable storage for analysis documents and images

mod images;
mod memory;
mod sqlite;

pub use images::FsImageStore;
pub use memory::MemoryAnalysisStore;
pub use sqlite::SqliteAnalysisStore;

use async_trait::async_trait;

use crate::models::{OwnerId, StoredDocument};
use crate::Result;

/// One document per owner, replaced wholesale on every write
#[async_trait]
pub trait AnalysisStore: Send + Sync {
    /// Current document for `owner`, tombstones included
    async fn get(&self, owner: &OwnerId) -> Result<Option<StoredDocument>>;

    /// Replace the owner's document (last write wins)
    async fn put(&self, document: &StoredDocument) -> Result<()>;
}
