use std::future::Future;
use std::pin::Pin;

use relisten_transcript::{Segment, Speaker};

pub type ReviewError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Async contract for the secondary speaker-review pass.
///
/// An implementation receives the segment text plus the speaker roster and
/// returns the raw correction payload (a JSON array per the correction
/// contract). Implementations should only propose corrections they are at
/// least 80% certain about; the pipeline applies whatever validates.
///
/// The pass is advisory and non-blocking: the pipeline maps any error from
/// `review` to an empty correction set and proceeds with the unmodified
/// transcript, so implementations are free to surface timeouts and transport
/// failures as plain errors.
///
/// Object-safe via the explicit `BoxFuture` return type; use
/// `dyn SpeakerReviewer` for dynamic dispatch.
pub trait SpeakerReviewer: Send + Sync {
    fn review<'a>(
        &'a self,
        segments: &'a [Segment],
        speakers: &'a [Speaker],
    ) -> BoxFuture<'a, Result<String, ReviewError>>;
}
