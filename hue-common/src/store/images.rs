//! Filesystem image store

use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};

use crate::collaborators::ImageStore;
use crate::{Error, Result};

/// Image store writing objects below a root directory
///
/// URLs are `file://` URLs of the written files.
#[derive(Debug, Clone)]
pub struct FsImageStore {
    root: PathBuf,
}

impl FsImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve an object path, refusing anything that escapes the root
    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path);
        let safe = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !safe || path.is_empty() {
            return Err(Error::Validation(format!("Invalid image path: '{}'", path)));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ImageStore for FsImageStore {
    async fn put(&self, path: &str, bytes: &[u8], _content_type: Option<&str>) -> Result<String> {
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, bytes).await?;
        Ok(format!("file://{}", target.display()))
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let target = self.resolve(path)?;
        match tokio::fs::remove_file(&target).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
