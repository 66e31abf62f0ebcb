//! SQLite analysis store
//!
//! Documents live in the `color_analysis` table as JSON, one row per owner.
//! Tombstones keep their row with `deleted = 1`.

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use super::AnalysisStore;
use crate::models::{OwnerId, StoredDocument};
use crate::Result;

/// Analysis store on the shared database pool
#[derive(Debug, Clone)]
pub struct SqliteAnalysisStore {
    pool: SqlitePool,
}

impl SqliteAnalysisStore {
    /// Create store on an initialized pool (see `db::init_database`)
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl AnalysisStore for SqliteAnalysisStore {
    async fn get(&self, owner: &OwnerId) -> Result<Option<StoredDocument>> {
        let document: Option<String> =
            sqlx::query_scalar("SELECT document FROM color_analysis WHERE owner_id = ?")
                .bind(owner.as_str())
                .fetch_optional(&self.pool)
                .await?;

        match document {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, document: &StoredDocument) -> Result<()> {
        let json = serde_json::to_string(document)?;
        let updated_at = match document {
            StoredDocument::Live(p) => p.timestamp,
            StoredDocument::Tombstone(t) => t.timestamp,
        };

        sqlx::query(
            r#"
            INSERT INTO color_analysis (owner_id, deleted, document, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(owner_id) DO UPDATE SET
                deleted = excluded.deleted,
                document = excluded.document,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(document.owner_id().as_str())
        .bind(document.is_deleted() as i64)
        .bind(&json)
        .bind(updated_at.timestamp_millis())
        .execute(&self.pool)
        .await?;

        debug!(
            owner = %document.owner_id(),
            deleted = document.is_deleted(),
            "Stored analysis document"
        );
        Ok(())
    }
}
