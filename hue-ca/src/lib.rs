//! hue-ca library - Color Analysis service
//!
//! HTTP front end for the seasonal classifier and the per-owner profile
//! repository.

use axum::extract::DefaultBodyLimit;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use hue_common::collaborators::{AuthProvider, ImageStore};
use hue_common::{ColorAnalyzer, ProfileRepository};

pub mod api;
pub mod auth;
pub mod vision;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<ProfileRepository>,
    pub analyzer: ColorAnalyzer,
    pub auth: Arc<dyn AuthProvider>,
    pub images: Arc<dyn ImageStore>,
    /// Largest accepted decoded image, in bytes
    pub max_image_bytes: usize,
}

impl AppState {
    pub fn new(
        repository: Arc<ProfileRepository>,
        analyzer: ColorAnalyzer,
        auth: Arc<dyn AuthProvider>,
        images: Arc<dyn ImageStore>,
        max_image_bytes: usize,
    ) -> Self {
        Self {
            repository,
            analyzer,
            auth,
            images,
            max_image_bytes,
        }
    }
}

/// Build application router
///
/// `/health` and `/api/classify` are public; everything under
/// `/api/analysis` resolves the owner from the request.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{delete, get, post};

    // Image routes must admit a full base64 image; the decoded size is
    // checked against `max_image_bytes` in the handler.
    let image_limit = DefaultBodyLimit::max(image_body_limit(state.max_image_bytes));

    let analysis = Router::new()
        .route(
            "/api/analysis",
            get(api::get_analysis).put(api::put_analysis).delete(api::delete_analysis),
        )
        .route("/api/analysis/document", get(api::get_document))
        .route("/api/analysis/favorites", post(api::toggle_favorite))
        .route("/api/analysis/colors", post(api::add_color))
        .route("/api/analysis/colors/:hex", delete(api::remove_color))
        .route("/api/analysis/combinations", post(api::save_combination))
        .route("/api/analysis/notes", post(api::add_note))
        .route("/api/analysis/notes/:id", delete(api::delete_note))
        .route(
            "/api/analysis/images",
            post(api::add_image).layer(image_limit),
        )
        .route("/api/analysis/images/:id", delete(api::delete_image));

    let public = Router::new()
        .route("/api/classify", post(api::classify).layer(image_limit))
        .merge(api::health_routes());

    Router::new()
        .merge(analysis)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Headroom for the JSON fields around an encoded image
const BODY_SLACK: usize = 64 * 1024;

/// Request body limit for routes carrying a base64 image of `max_image_bytes`
pub fn image_body_limit(max_image_bytes: usize) -> usize {
    max_image_bytes
        .div_ceil(3)
        .saturating_mul(4)
        .saturating_add(BODY_SLACK)
}
