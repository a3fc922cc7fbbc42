use crate::types::{AlignmentStatus, Conversation, DriftCorrection};

/// Minimum relative drift before a rescale is worth applying. Below this the
/// desync is imperceptible and a global rescale would only churn persistence.
pub const MIN_DRIFT_RATIO: f64 = 0.005;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DriftDecision {
    Rescale { ratio: f64 },
    Skip(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Force-aligned timestamps must never be globally rescaled by a coarse
    /// duration ratio.
    Aligned,
    /// The fallback rescale already ran for this conversation.
    AlreadyCorrected,
    /// Drift is within tolerance.
    WithinTolerance,
    /// Transcript or audio duration is missing/zero; no ratio to compute.
    UnknownDuration,
}

/// Decide what to do when playback reports the audio's actual duration.
///
/// Pure function of the conversation's timing state: the caller applies the
/// result (and persists) only on [`DriftDecision::Rescale`].
pub fn evaluate(conversation: &Conversation, actual_duration_ms: i64) -> DriftDecision {
    if conversation.alignment_status == AlignmentStatus::Aligned {
        return DriftDecision::Skip(SkipReason::Aligned);
    }
    if conversation.drift_correction.is_some() {
        return DriftDecision::Skip(SkipReason::AlreadyCorrected);
    }
    if conversation.duration_ms <= 0 || actual_duration_ms <= 0 {
        return DriftDecision::Skip(SkipReason::UnknownDuration);
    }

    let ratio = actual_duration_ms as f64 / conversation.duration_ms as f64;
    if (ratio - 1.0).abs() <= MIN_DRIFT_RATIO {
        return DriftDecision::Skip(SkipReason::WithinTolerance);
    }
    DriftDecision::Rescale { ratio }
}

/// Rescale every segment's timestamps by `ratio`, adopt the actual audio
/// duration, and record the correction marker for UI disclosure and
/// idempotency.
pub fn apply(mut conversation: Conversation, ratio: f64, actual_duration_ms: i64) -> Conversation {
    let drift_ms = actual_duration_ms - conversation.duration_ms;
    for segment in &mut conversation.segments {
        segment.start_ms = (segment.start_ms as f64 * ratio).round() as i64;
        segment.end_ms = (segment.end_ms as f64 * ratio).round() as i64;
    }
    conversation.duration_ms = actual_duration_ms;
    conversation.drift_correction = Some(DriftCorrection { ratio, drift_ms });
    tracing::info!(
        conversation = %conversation.id,
        ratio,
        drift_ms,
        "applied drift correction"
    );
    conversation
}
