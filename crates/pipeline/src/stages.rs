use relisten_align_client::{AlignClient, AlignSegment};
use relisten_http::HttpClient;
use relisten_speaker_review::{SpeakerReviewer, apply_corrections, parse_corrections};
use relisten_transcript::{
    AlignmentStatus, Conversation, DriftDecision, Person, RawTranscription, Speaker, Term, id,
    normalize, drift, terms, topics,
};

use crate::error::Error;

/// Below this average confidence the merge still proceeds (the backend has
/// already interpolated weak words) but the result is flagged in the logs.
pub const MIN_ALIGN_CONFIDENCE: f64 = 0.55;

/// Stages 1–3 in one synchronous pass: stable-sort raw segments into their
/// permanent order, resolve topic boundaries through stable handles, and
/// index term occurrences over the normalized text.
pub fn normalize_and_index(raw: RawTranscription) -> Conversation {
    let normalized = normalize(&raw.segments);
    let resolved_topics = topics::resolve(&raw.topics, &normalized);

    let known_terms: Vec<Term> = raw.terms.iter().map(terms::term_from_raw).collect();
    let occurrences = terms::index_occurrences(&normalized.segments, &known_terms);

    let speakers = raw
        .speakers
        .iter()
        .enumerate()
        .map(|(position, speaker)| Speaker {
            id: speaker.id.clone(),
            display_name: speaker.name.clone(),
            color_index: position as u32,
        })
        .collect();

    let people = raw
        .people
        .iter()
        .map(|person| Person {
            id: id::entity_id(),
            name: person.name.clone(),
            affiliation: person.affiliation.clone(),
            user_notes: None,
        })
        .collect();

    let duration_ms = normalized.duration_ms();
    Conversation {
        id: id::entity_id(),
        title: raw.title,
        speakers,
        segments: normalized.segments,
        terms: known_terms,
        term_occurrences: occurrences,
        topics: resolved_topics,
        people,
        duration_ms,
        alignment_status: AlignmentStatus::Idle,
        drift_correction: None,
    }
}

/// Stage 4: run the advisory speaker-review pass and apply whatever
/// validates.
///
/// Non-blocking by contract — a reviewer failure, an unparsable payload, or
/// an empty correction set all return the conversation unmodified. A
/// correction naming a speaker outside the roster is discarded so that
/// `Segment.speaker_id` always resolves.
pub async fn correct_speakers(
    mut conversation: Conversation,
    reviewer: &dyn SpeakerReviewer,
) -> Conversation {
    let payload = match reviewer
        .review(&conversation.segments, &conversation.speakers)
        .await
    {
        Ok(payload) => payload,
        Err(error) => {
            tracing::warn!(%error, "speaker review failed, keeping transcript as-is");
            return conversation;
        }
    };

    let mut corrections = parse_corrections(&payload);
    corrections.retain(|correction| {
        let known = correction
            .speakers_referenced()
            .iter()
            .all(|speaker_id| conversation.speakers.iter().any(|s| s.id == *speaker_id));
        if !known {
            tracing::warn!(
                index = correction.segment_index,
                "correction references unknown speaker, discarding"
            );
        }
        known
    });
    if corrections.is_empty() {
        return conversation;
    }

    tracing::info!(
        conversation = %conversation.id,
        count = corrections.len(),
        "applying speaker corrections"
    );
    conversation.segments = apply_corrections(std::mem::take(&mut conversation.segments), &corrections);
    // splits change segment ids and character offsets, so occurrences are
    // re-derived over the rewritten text
    conversation.term_occurrences =
        terms::index_occurrences(&conversation.segments, &conversation.terms);
    conversation.recompute_duration();
    conversation
}

/// Stage-5 failure: the retryable error plus the conversation value the
/// caller should persist (status `Error`, timestamps untouched).
#[derive(Debug)]
pub struct AlignFailed {
    pub conversation: Conversation,
    pub error: Error,
}

impl AlignFailed {
    fn new(mut conversation: Conversation, error: Error) -> Self {
        conversation.alignment_status = AlignmentStatus::Error;
        Self { conversation, error }
    }

    /// Audio that cannot be loaded is the same retryable surface as a
    /// request that cannot be sent.
    pub fn from_load_failure(conversation: Conversation, error: crate::error::RuntimeError) -> Self {
        Self::new(conversation, Error::AudioLoad(error))
    }
}

/// Stage 5: forced alignment. Sends the speaker-corrected segments plus the
/// audio to the alignment backend and merges precise timestamps back.
///
/// Merge policy: only `start_ms`/`end_ms` are adopted, positionally; id,
/// index, speaker and text stay ours. The response must preserve segment
/// count — a mismatch fails closed rather than pairing the wrong timestamps
/// with the wrong text. Low average confidence is a soft warning, never a
/// rejection.
pub async fn align<C: HttpClient>(
    mut conversation: Conversation,
    audio: &[u8],
    client: &AlignClient<C>,
) -> Result<Conversation, AlignFailed> {
    conversation.alignment_status = AlignmentStatus::Aligning;

    let request: Vec<AlignSegment> = conversation
        .segments
        .iter()
        .map(|segment| AlignSegment {
            speaker_id: segment.speaker_id.clone(),
            text: segment.text.clone(),
            start_ms: segment.start_ms,
            end_ms: segment.end_ms,
        })
        .collect();
    let sent = request.len();

    let response = match client.align(audio, request).await {
        Ok(response) => response,
        Err(error) => {
            return Err(AlignFailed::new(
                conversation,
                Error::AlignmentUnavailable(error),
            ));
        }
    };

    let received = response.segments.len();
    if received != sent {
        return Err(AlignFailed::new(
            conversation,
            Error::AlignmentContractViolation { sent, received },
        ));
    }

    if response.average_confidence < MIN_ALIGN_CONFIDENCE {
        tracing::warn!(
            conversation = %conversation.id,
            average_confidence = response.average_confidence,
            "alignment confidence below threshold, merging anyway"
        );
    }

    for (segment, aligned) in conversation.segments.iter_mut().zip(&response.segments) {
        segment.start_ms = aligned.start_ms;
        segment.end_ms = aligned.end_ms;
    }
    conversation.recompute_duration();
    conversation.alignment_status = AlignmentStatus::Aligned;
    Ok(conversation)
}

/// Stage 6: playback drift correction, gated by the alignment status tag and
/// the applied-correction marker.
pub fn on_audio_metadata_loaded(conversation: Conversation, actual_duration_ms: i64) -> Conversation {
    match drift::evaluate(&conversation, actual_duration_ms) {
        DriftDecision::Skip(reason) => {
            tracing::debug!(
                conversation = %conversation.id,
                ?reason,
                "drift correction skipped"
            );
            conversation
        }
        DriftDecision::Rescale { ratio } => drift::apply(conversation, ratio, actual_duration_ms),
    }
}
