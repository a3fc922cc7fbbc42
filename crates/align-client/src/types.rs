use serde::{Deserialize, Serialize};

/// One segment of the align request: the already speaker-corrected text and
/// the model's provisional timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignSegment {
    pub speaker_id: String,
    pub text: String,
    pub start_ms: i64,
    pub end_ms: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlignRequest {
    pub audio_base64: String,
    pub segments: Vec<AlignSegment>,
}

/// Response segment, positionally aligned 1:1 with the request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignedSegment {
    pub speaker_id: String,
    pub text: String,
    pub start_ms: i64,
    pub end_ms: i64,
    pub confidence: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlignResponse {
    pub segments: Vec<AlignedSegment>,
    pub average_confidence: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub replicate_configured: bool,
}
