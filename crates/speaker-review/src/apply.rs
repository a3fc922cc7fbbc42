use relisten_transcript::{Segment, id, reindex};

use crate::types::{CorrectionAction, SpeakerCorrection};

/// Rewrite the segment sequence according to a batch of advisory corrections.
///
/// Corrections are applied in strictly descending `segment_index` order.
/// This is a correctness requirement, not an optimization: a split grows the
/// array by one at its position, so applying higher indices first means the
/// still-pending lower indices stay valid. Malformed records (index out of
/// bounds, split offset outside the text, split offset not on a char
/// boundary) are discarded individually; the batch as a whole still applies.
///
/// Afterwards the sequence is re-indexed `0..n`, re-deriving segment ids,
/// restoring the normalizer's invariant.
pub fn apply_corrections(
    segments: Vec<Segment>,
    corrections: &[SpeakerCorrection],
) -> Vec<Segment> {
    if corrections.is_empty() {
        return segments;
    }

    let mut ordered: Vec<&SpeakerCorrection> = corrections.iter().collect();
    ordered.sort_by(|a, b| b.segment_index.cmp(&a.segment_index));

    let mut segments = segments;
    for correction in ordered {
        let index = correction.segment_index;
        let Some(segment) = segments.get_mut(index) else {
            tracing::warn!(index, "correction references segment out of bounds, discarding");
            continue;
        };

        match &correction.action {
            CorrectionAction::Reassign { new_speaker } => {
                segment.speaker_id = new_speaker.clone();
            }
            CorrectionAction::Split {
                split_at_char,
                speaker_before,
                speaker_after,
            } => {
                let Some((before, after)) =
                    split_segment(segment, *split_at_char, speaker_before, speaker_after)
                else {
                    tracing::warn!(
                        index,
                        split_at_char,
                        "split offset invalid for segment text, discarding"
                    );
                    continue;
                };
                segments.splice(index..=index, [before, after]);
            }
        }
    }

    reindex(segments)
}

fn split_segment(
    segment: &Segment,
    split_at_char: usize,
    speaker_before: &str,
    speaker_after: &str,
) -> Option<(Segment, Segment)> {
    let text = &segment.text;
    if text.is_empty() || split_at_char > text.len() || !text.is_char_boundary(split_at_char) {
        return None;
    }

    let (text_before, text_after) = text.split_at(split_at_char);
    let char_ratio = split_at_char as f64 / text.len() as f64;
    let span_ms = segment.end_ms - segment.start_ms;
    let split_time_ms = segment.start_ms + (span_ms as f64 * char_ratio).floor() as i64;

    // ids/indices are provisional; reindex re-derives them once the whole
    // batch has been applied
    let before = Segment {
        id: id::segment_id(segment.index),
        index: segment.index,
        speaker_id: speaker_before.to_string(),
        start_ms: segment.start_ms,
        end_ms: split_time_ms,
        text: text_before.to_string(),
    };
    let after = Segment {
        id: id::segment_id(segment.index + 1),
        index: segment.index + 1,
        speaker_id: speaker_after.to_string(),
        start_ms: split_time_ms,
        end_ms: segment.end_ms,
        text: text_after.to_string(),
    };
    Some((before, after))
}
