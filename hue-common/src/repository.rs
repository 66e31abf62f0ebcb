//! Owner-scoped profile repository
//!
//! Every mutation runs in three steps:
//! 1. apply the change to a copy of the owner's document and put it in the cache
//! 2. write the new document to the durable store
//! 3. keep the cached copy, or put the previous one back if the write failed
//!
//! Callers must not run overlapping mutations for the same owner; there is
//! no cross-call ordering beyond last write wins.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::collaborators::ImageStore;
use crate::models::{
    Analysis, ColorInfo, CustomCombination, InspirationImage, OwnerId, PersistedAnalysis, PersonalNote,
    StoredDocument,
};
use crate::store::AnalysisStore;
use crate::time;
use crate::{Error, Result};

/// Cached analysis documents in front of a durable store
pub struct ProfileRepository {
    store: Arc<dyn AnalysisStore>,
    cache: Mutex<HashMap<OwnerId, PersistedAnalysis>>,
}

impl ProfileRepository {
    pub fn new(store: Arc<dyn AnalysisStore>) -> Self {
        Self {
            store,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Current analysis of `owner`
    pub async fn load_analysis(&self, owner: &OwnerId) -> Result<Analysis> {
        Ok(self.current(owner).await?.analysis)
    }

    /// Full persisted document of `owner`
    pub async fn load_persisted(&self, owner: &OwnerId) -> Result<PersistedAnalysis> {
        self.current(owner).await
    }

    /// Store a new analysis, or a tombstone when `analysis` is `None`
    ///
    /// A new analysis replaces the whole document, including combinations,
    /// notes and images.
    pub async fn save_analysis(&self, owner: &OwnerId, analysis: Option<Analysis>) -> Result<()> {
        let previous = self.cache.lock().await.get(owner).cloned();
        let now = time::now();

        let (document, cached) = match analysis {
            Some(analysis) => {
                let persisted = PersistedAnalysis::new(owner.clone(), analysis, now);
                (StoredDocument::Live(persisted.clone()), Some(persisted))
            }
            None => (StoredDocument::tombstone(owner.clone(), now), None),
        };

        self.set_cached(owner, cached).await;
        if let Err(e) = self.store.put(&document).await {
            warn!(%owner, "Saving analysis failed, restoring cached state: {}", e);
            self.set_cached(owner, previous).await;
            return Err(e);
        }

        if document.is_deleted() {
            info!(%owner, "Analysis deleted (tombstone written)");
        } else {
            info!(%owner, "Analysis saved");
        }
        Ok(())
    }

    /// Flip membership of `hex` in favorites; returns the new membership
    pub async fn toggle_favorite(&self, owner: &OwnerId, hex: &str) -> Result<bool> {
        self.mutate(owner, "toggle_favorite", |doc| {
            let now_favorite = doc.analysis.toggle_favorite(hex);
            Ok((now_favorite, true))
        })
        .await
    }

    /// Append a color to the own-season palette unless its hex is present
    ///
    /// Returns `false` for the no-op case.
    pub async fn add_color(&self, owner: &OwnerId, color: ColorInfo) -> Result<bool> {
        if color.hex.trim().is_empty() {
            return Err(Error::Validation("Color hex must not be empty".to_string()));
        }
        self.mutate(owner, "add_color", |doc| {
            let added = doc.analysis.add_color(color);
            Ok((added, added))
        })
        .await
    }

    /// Remove every own-season palette entry matching `hex`
    ///
    /// Returns how many entries were removed; zero is not an error.
    pub async fn remove_color(&self, owner: &OwnerId, hex: &str) -> Result<usize> {
        self.mutate(owner, "remove_color", |doc| {
            let removed = doc.analysis.remove_color(hex);
            Ok((removed, removed > 0))
        })
        .await
    }

    /// Append a named color combination
    pub async fn save_custom_combination(&self, owner: &OwnerId, combination: CustomCombination) -> Result<()> {
        if combination.name.trim().is_empty() {
            return Err(Error::Validation("Combination name must not be empty".to_string()));
        }
        self.mutate(owner, "save_custom_combination", |doc| {
            doc.custom_combinations
                .get_or_insert_with(Vec::new)
                .push(combination);
            Ok(((), true))
        })
        .await
    }

    /// Append a personal note and return it
    pub async fn add_personal_note(&self, owner: &OwnerId, text: &str, created_by: &str) -> Result<PersonalNote> {
        if text.trim().is_empty() {
            return Err(Error::Validation("Note text must not be empty".to_string()));
        }
        let note = PersonalNote {
            id: Uuid::new_v4(),
            text: text.to_string(),
            created_at: time::now(),
            created_by: created_by.to_string(),
        };
        self.mutate(owner, "add_personal_note", |doc| {
            doc.personal_notes.get_or_insert_with(Vec::new).push(note.clone());
            Ok(((), true))
        })
        .await?;
        Ok(note)
    }

    /// Delete a personal note; returns whether it existed
    pub async fn delete_personal_note(&self, owner: &OwnerId, note_id: Uuid) -> Result<bool> {
        self.mutate(owner, "delete_personal_note", |doc| {
            let notes = doc.personal_notes.get_or_insert_with(Vec::new);
            let before = notes.len();
            notes.retain(|n| n.id != note_id);
            let removed = notes.len() != before;
            Ok((removed, removed))
        })
        .await
    }

    /// Upload an inspiration image and record it on the document
    ///
    /// If recording fails the uploaded object is removed again.
    pub async fn add_inspiration_image(
        &self,
        owner: &OwnerId,
        images: &dyn ImageStore,
        file_name: &str,
        bytes: &[u8],
        content_type: Option<&str>,
    ) -> Result<InspirationImage> {
        // Refuse uploads for owners without an analysis
        self.current(owner).await?;

        let id = Uuid::new_v4();
        let storage_path = format!("inspiration/{}/{}-{}", owner, id, sanitize_file_name(file_name));
        let url = images.put(&storage_path, bytes, content_type).await.map_err(|e| {
            Error::Persistence(format!("Image upload to '{}' failed: {}", storage_path, e))
        })?;

        let image = InspirationImage {
            id,
            url,
            caption: String::new(),
            created_at: time::now(),
            storage_path: storage_path.clone(),
        };

        let recorded = self
            .mutate(owner, "add_inspiration_image", |doc| {
                doc.inspiration_images.get_or_insert_with(Vec::new).push(image.clone());
                Ok(((), true))
            })
            .await;

        if let Err(e) = recorded {
            if let Err(cleanup) = images.delete(&storage_path).await {
                warn!(%owner, "Could not remove orphaned image '{}': {}", storage_path, cleanup);
            }
            return Err(e);
        }

        Ok(image)
    }

    /// Delete an inspiration image and its stored bytes; returns whether it existed
    ///
    /// The document is written first. The stored object is removed only once
    /// the write has committed; a failed removal leaves an orphan and is logged.
    pub async fn delete_inspiration_image(&self, owner: &OwnerId, images: &dyn ImageStore, image_id: Uuid) -> Result<bool> {
        let removed = self
            .mutate(owner, "delete_inspiration_image", |doc| {
                let Some(list) = doc.inspiration_images.as_mut() else {
                    return Ok((None, false));
                };
                let position = list.iter().position(|img| img.id == image_id);
                let entry = position.map(|i| list.remove(i));
                let changed = entry.is_some();
                Ok((entry, changed))
            })
            .await?;

        let Some(entry) = removed else {
            return Ok(false);
        };

        if let Err(e) = images.delete(&entry.storage_path).await {
            warn!(%owner, "Could not remove stored image '{}': {}", entry.storage_path, e);
        }
        Ok(true)
    }

    /// Drop the cached copy so the next read goes to the store
    pub async fn evict(&self, owner: &OwnerId) {
        self.cache.lock().await.remove(owner);
    }

    /// Cached document, falling back to the store
    async fn current(&self, owner: &OwnerId) -> Result<PersistedAnalysis> {
        if let Some(doc) = self.cache.lock().await.get(owner) {
            return Ok(doc.clone());
        }

        let stored = self.store.get(owner).await?;
        match stored.and_then(StoredDocument::into_live) {
            Some(doc) => {
                debug!(%owner, "Loaded analysis from store");
                self.cache.lock().await.insert(owner.clone(), doc.clone());
                Ok(doc)
            }
            None => Err(Error::NotFound(format!("No analysis for owner '{}'", owner))),
        }
    }

    async fn set_cached(&self, owner: &OwnerId, document: Option<PersistedAnalysis>) {
        let mut cache = self.cache.lock().await;
        match document {
            Some(doc) => {
                cache.insert(owner.clone(), doc);
            }
            None => {
                cache.remove(owner);
            }
        }
    }

    /// Apply `change` optimistically and persist it
    ///
    /// `change` returns the caller's result plus whether the document
    /// changed; unchanged documents are not written.
    async fn mutate<T, F>(&self, owner: &OwnerId, operation: &str, change: F) -> Result<T>
    where
        F: FnOnce(&mut PersistedAnalysis) -> Result<(T, bool)>,
    {
        let previous = self.current(owner).await?;
        let mut next = previous.clone();

        let (output, changed) = change(&mut next)?;
        if !changed {
            debug!(%owner, operation, "No change, skipping write");
            return Ok(output);
        }
        next.timestamp = time::now();

        self.set_cached(owner, Some(next.clone())).await;

        if let Err(e) = self.store.put(&StoredDocument::Live(next)).await {
            warn!(%owner, operation, "Durable write failed, rolling back: {}", e);
            self.set_cached(owner, Some(previous)).await;
            return Err(e);
        }

        debug!(%owner, operation, "Mutation committed");
        Ok(output)
    }
}

/// Replace anything outside `[A-Za-z0-9.]` with `_`
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' { c } else { '_' })
        .collect()
}
