use base64::Engine;
use relisten_http::HttpClient;

use crate::error::Error;
use crate::types::{AlignRequest, AlignResponse, AlignSegment, HealthResponse};

/// Typed client for the forced-alignment backend.
pub struct AlignClient<C> {
    http: C,
}

impl<C: HttpClient> AlignClient<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    pub async fn health(&self) -> Result<HealthResponse, Error> {
        let bytes = self.http.get("/health").await.map_err(Error::Http)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Submit audio plus the speaker-corrected segment list for forced
    /// alignment. The response's segments come back positionally aligned
    /// 1:1 with the request — the caller owns checking that parity before
    /// merging timestamps.
    pub async fn align(
        &self,
        audio: &[u8],
        segments: Vec<AlignSegment>,
    ) -> Result<AlignResponse, Error> {
        let request = AlignRequest {
            audio_base64: base64::engine::general_purpose::STANDARD.encode(audio),
            segments,
        };
        let body = serde_json::to_vec(&request)?;
        let bytes = self
            .http
            .post("/align", body, "application/json")
            .await
            .map_err(Error::Http)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
