//! HTTP vision analysis client
//!
//! Posts the photo as base64 JSON to a configured endpoint and expects
//! `{"undertone": "warm"|"cool", "intensity": f64, "confidence": f64}` back.

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use hue_common::classify::VisionSignal;
use hue_common::collaborators::{ExternalSignalUnavailable, VisionAnalyzer};

const USER_AGENT: &str = concat!("hue-ca/", env!("CARGO_PKG_VERSION"));

/// Vision client errors
#[derive(Debug, Error)]
pub enum VisionError {
    /// Network communication error
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Vision service returned an error response
    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    /// Failed to parse the response JSON
    #[error("Parse error: {0}")]
    ParseError(String),
}

#[derive(Debug, Serialize)]
struct AnalyzeRequest {
    image: String,
}

/// Vision analysis over HTTP
pub struct HttpVisionClient {
    http_client: reqwest::Client,
    endpoint: String,
}

impl HttpVisionClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, VisionError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| VisionError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one image for analysis
    pub async fn analyze_image(&self, image: &[u8]) -> Result<VisionSignal, VisionError> {
        let body = AnalyzeRequest {
            image: general_purpose::STANDARD.encode(image),
        };

        debug!(bytes = image.len(), endpoint = %self.endpoint, "Requesting vision analysis");

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| VisionError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(VisionError::ApiError(status.as_u16(), text));
        }

        response
            .json::<VisionSignal>()
            .await
            .map_err(|e| VisionError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl VisionAnalyzer for HttpVisionClient {
    async fn analyze(&self, image: &[u8]) -> Result<VisionSignal, ExternalSignalUnavailable> {
        self.analyze_image(image)
            .await
            .map_err(|e| ExternalSignalUnavailable::new(e.to_string()))
    }
}
