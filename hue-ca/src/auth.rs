//! Owner resolution
//!
//! The service trusts an upstream gateway that has already authenticated
//! the caller and forwards the stable owner id in `x-owner-id`.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tracing::debug;

use hue_common::collaborators::AuthProvider;
use hue_common::models::OwnerId;
use hue_common::Result;

use crate::api::ApiError;
use crate::AppState;

/// Header carrying the caller's credential
pub const OWNER_HEADER: &str = "x-owner-id";

/// Auth provider that takes the header value as the owner id
#[derive(Debug, Clone, Default)]
pub struct HeaderAuthProvider;

#[async_trait]
impl AuthProvider for HeaderAuthProvider {
    async fn owner_id(&self, credential: &str) -> Result<OwnerId> {
        OwnerId::new(credential.trim())
    }
}

/// Extractor for the authenticated owner of a request
#[derive(Debug, Clone)]
pub struct Owner(pub OwnerId);

#[async_trait]
impl FromRequestParts<AppState> for Owner {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> std::result::Result<Self, Self::Rejection> {
        let credential = parts
            .headers
            .get(OWNER_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized(format!("Missing {} header", OWNER_HEADER)))?;

        let owner = state.auth.owner_id(credential).await.map_err(|e| {
            debug!("Rejected credential: {}", e);
            ApiError::Unauthorized("Invalid owner credential".to_string())
        })?;

        Ok(Owner(owner))
    }
}
