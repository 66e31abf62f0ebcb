//! Contracts for external providers
//!
//! The core never talks to a concrete auth, image storage or vision backend;
//! services plug implementations of these traits in.

use async_trait::async_trait;
use thiserror::Error;

use crate::classify::fuser::VisionSignal;
use crate::models::OwnerId;
use crate::Result;

/// Vision analysis could not produce a signal
///
/// Never surfaced to callers of the classifier; it only moves
/// classification into questionnaire-only mode.
#[derive(Debug, Error)]
#[error("External vision signal unavailable: {reason}")]
pub struct ExternalSignalUnavailable {
    pub reason: String,
}

impl ExternalSignalUnavailable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

/// Image bytes in, undertone signal out
#[async_trait]
pub trait VisionAnalyzer: Send + Sync {
    async fn analyze(&self, image: &[u8]) -> std::result::Result<VisionSignal, ExternalSignalUnavailable>;
}

/// Resolves a request credential to a stable owner id
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn owner_id(&self, credential: &str) -> Result<OwnerId>;
}

/// Blob storage for user images
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store `bytes` at `path` and return a retrievable URL
    async fn put(&self, path: &str, bytes: &[u8], content_type: Option<&str>) -> Result<String>;

    /// Remove the object at `path`. Missing objects are not an error.
    async fn delete(&self, path: &str) -> Result<()>;
}
