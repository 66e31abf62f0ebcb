//! Classification endpoint

use axum::{extract::State, Json};
use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;

use hue_common::{ClassificationOutcome, ClassificationRequest};

use super::ApiError;
use crate::AppState;

/// Request body for POST /api/classify
#[derive(Debug, Deserialize)]
pub struct ClassifyBody {
    #[serde(flatten)]
    pub request: ClassificationRequest,
    /// Optional base64-encoded photo for vision analysis
    #[serde(default)]
    pub image: Option<String>,
}

/// Decode a base64 image payload, enforcing the size limit
pub(crate) fn decode_image(encoded: &str, max_bytes: usize) -> Result<Vec<u8>, ApiError> {
    let bytes = general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|e| ApiError::BadRequest(format!("Invalid base64 image: {}", e)))?;

    if bytes.len() > max_bytes {
        return Err(ApiError::PayloadTooLarge(format!(
            "Image of {} bytes exceeds limit of {} bytes",
            bytes.len(),
            max_bytes
        )));
    }
    Ok(bytes)
}

/// POST /api/classify
///
/// Classifies a questionnaire. Does not persist anything; clients store the
/// accepted result with PUT /api/analysis.
pub async fn classify(
    State(state): State<AppState>,
    Json(body): Json<ClassifyBody>,
) -> Result<Json<ClassificationOutcome>, ApiError> {
    let image = body
        .image
        .as_deref()
        .map(|encoded| decode_image(encoded, state.max_image_bytes))
        .transpose()?;

    let outcome = state.analyzer.analyze(&body.request, image.as_deref()).await?;
    Ok(Json(outcome))
}
