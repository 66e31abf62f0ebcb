//! Profile endpoints
//!
//! All handlers act on the document of the requesting owner only.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hue_common::models::{CustomCombination, InspirationImage, PersonalNote};
use hue_common::{Analysis, ColorInfo, PersistedAnalysis};

use super::classify::decode_image;
use super::ApiError;
use crate::auth::Owner;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct FavoriteRequest {
    pub hex: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FavoriteResponse {
    pub hex: String,
    pub favorite: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddColorResponse {
    pub added: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RemoveColorResponse {
    pub removed: usize,
}

#[derive(Debug, Deserialize)]
pub struct NoteRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUpload {
    pub file_name: String,
    #[serde(default)]
    pub content_type: Option<String>,
    /// Base64-encoded image bytes
    pub data: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub deleted: bool,
}

/// Hex from a path segment; the leading `#` is optional in URLs
fn hex_from_path(raw: &str) -> String {
    if raw.starts_with('#') {
        raw.to_string()
    } else {
        format!("#{}", raw)
    }
}

/// GET /api/analysis
pub async fn get_analysis(State(state): State<AppState>, Owner(owner): Owner) -> Result<Json<Analysis>, ApiError> {
    Ok(Json(state.repository.load_analysis(&owner).await?))
}

/// GET /api/analysis/document
///
/// Full stored document: analysis plus combinations, notes and images.
pub async fn get_document(
    State(state): State<AppState>,
    Owner(owner): Owner,
) -> Result<Json<PersistedAnalysis>, ApiError> {
    Ok(Json(state.repository.load_persisted(&owner).await?))
}

/// PUT /api/analysis
pub async fn put_analysis(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Json(analysis): Json<Analysis>,
) -> Result<StatusCode, ApiError> {
    state.repository.save_analysis(&owner, Some(analysis)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/analysis
///
/// Writes a tombstone; the document is never physically removed.
pub async fn delete_analysis(State(state): State<AppState>, Owner(owner): Owner) -> Result<StatusCode, ApiError> {
    state.repository.save_analysis(&owner, None).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/analysis/favorites
pub async fn toggle_favorite(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Json(req): Json<FavoriteRequest>,
) -> Result<Json<FavoriteResponse>, ApiError> {
    let favorite = state.repository.toggle_favorite(&owner, &req.hex).await?;
    Ok(Json(FavoriteResponse { hex: req.hex, favorite }))
}

/// POST /api/analysis/colors
pub async fn add_color(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Json(color): Json<ColorInfo>,
) -> Result<(StatusCode, Json<AddColorResponse>), ApiError> {
    let added = state.repository.add_color(&owner, color).await?;
    let status = if added { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(AddColorResponse { added })))
}

/// DELETE /api/analysis/colors/:hex
pub async fn remove_color(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Path(hex): Path<String>,
) -> Result<Json<RemoveColorResponse>, ApiError> {
    let removed = state.repository.remove_color(&owner, &hex_from_path(&hex)).await?;
    Ok(Json(RemoveColorResponse { removed }))
}

/// POST /api/analysis/combinations
pub async fn save_combination(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Json(combination): Json<CustomCombination>,
) -> Result<StatusCode, ApiError> {
    state.repository.save_custom_combination(&owner, combination).await?;
    Ok(StatusCode::CREATED)
}

/// POST /api/analysis/notes
pub async fn add_note(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Json(req): Json<NoteRequest>,
) -> Result<(StatusCode, Json<PersonalNote>), ApiError> {
    let note = state
        .repository
        .add_personal_note(&owner, &req.text, owner.as_str())
        .await?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// DELETE /api/analysis/notes/:id
pub async fn delete_note(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let deleted = state.repository.delete_personal_note(&owner, id).await?;
    Ok(Json(DeletedResponse { deleted }))
}

/// POST /api/analysis/images
pub async fn add_image(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Json(upload): Json<ImageUpload>,
) -> Result<(StatusCode, Json<InspirationImage>), ApiError> {
    let bytes = decode_image(&upload.data, state.max_image_bytes)?;
    let image = state
        .repository
        .add_inspiration_image(
            &owner,
            state.images.as_ref(),
            &upload.file_name,
            &bytes,
            upload.content_type.as_deref(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(image)))
}

/// DELETE /api/analysis/images/:id
pub async fn delete_image(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let deleted = state
        .repository
        .delete_inspiration_image(&owner, state.images.as_ref(), id)
        .await?;
    Ok(Json(DeletedResponse { deleted }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_from_path() {
        assert_eq!(hex_from_path("FF7F50"), "#FF7F50");
        assert_eq!(hex_from_path("#ff7f50"), "#ff7f50");
    }
}
