mod client;
mod error;
mod types;

pub use client::AlignClient;
pub use error::Error;
pub use types::{AlignRequest, AlignResponse, AlignSegment, AlignedSegment, HealthResponse};
