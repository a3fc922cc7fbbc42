use std::collections::HashMap;

use crate::id;
use crate::input::RawSegment;
use crate::types::Segment;

/// Stable handle into the pre-sort segment arena.
///
/// Raw model segments have no stable position until they are sorted, so every
/// cross-reference computed against the pre-sort order (topic boundaries) is
/// resolved through one of these handles instead of a positional index. The
/// handle is simply the arena slot the raw segment occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TempId(pub usize);

/// Output of the normalizer: the chronologically ordered segment sequence
/// plus the `TempId → final index` lookup retained for topic resolution.
#[derive(Debug)]
pub struct Normalized {
    pub segments: Vec<Segment>,
    index_of: HashMap<TempId, usize>,
}

impl Normalized {
    pub fn final_index(&self, temp: TempId) -> Option<usize> {
        self.index_of.get(&temp).copied()
    }

    /// Convert a pre-sort position into a stable handle, clamping
    /// out-of-range references to the first/last raw segment. `None` only
    /// when there are no segments at all.
    pub fn handle_at(&self, pre_sort_index: i64) -> Option<TempId> {
        let len = self.segments.len();
        if len == 0 {
            return None;
        }
        let clamped = pre_sort_index.clamp(0, len as i64 - 1) as usize;
        Some(TempId(clamped))
    }

    pub fn duration_ms(&self) -> i64 {
        self.segments.last().map(|s| s.end_ms).unwrap_or(0)
    }
}

/// Stable-sort raw segments chronologically and assign permanent
/// ids/indices.
///
/// The sort must be stable: the model may emit several fragments with the
/// same `start_ms` whose relative order is meaningful.
pub fn normalize(raw: &[RawSegment]) -> Normalized {
    let mut order: Vec<(TempId, &RawSegment)> = raw
        .iter()
        .enumerate()
        .map(|(slot, segment)| (TempId(slot), segment))
        .collect();
    order.sort_by_key(|(_, segment)| segment.start_ms);

    let mut segments = Vec::with_capacity(order.len());
    let mut index_of = HashMap::with_capacity(order.len());
    for (index, (temp, segment)) in order.into_iter().enumerate() {
        index_of.insert(temp, index);
        segments.push(Segment {
            id: id::segment_id(index),
            index,
            speaker_id: segment.speaker_id.clone(),
            start_ms: segment.start_ms,
            end_ms: segment.end_ms,
            text: segment.text.clone(),
        });
    }

    Normalized { segments, index_of }
}

/// Restore the normalizer's invariant on an already-constructed sequence:
/// stable-sort by `start_ms` and re-derive `index`/`id` positionally.
///
/// Used after any pass that restructures the sequence (speaker correction
/// splits). Idempotent: an already-normalized sequence comes back identical.
pub fn reindex(mut segments: Vec<Segment>) -> Vec<Segment> {
    segments.sort_by_key(|s| s.start_ms);
    for (index, segment) in segments.iter_mut().enumerate() {
        segment.index = index;
        segment.id = id::segment_id(index);
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(speaker: &str, start_ms: i64, end_ms: i64, text: &str) -> RawSegment {
        RawSegment {
            speaker_id: speaker.to_string(),
            start_ms,
            end_ms,
            text: text.to_string(),
        }
    }

    #[test]
    fn sorts_by_start_and_assigns_contiguous_indices() {
        let normalized = normalize(&[
            raw("s2", 2000, 3000, "second"),
            raw("s1", 0, 1000, "first"),
            raw("s3", 4000, 5000, "third"),
        ]);

        let starts: Vec<i64> = normalized.segments.iter().map(|s| s.start_ms).collect();
        assert_eq!(starts, [0, 2000, 4000]);
        for (position, segment) in normalized.segments.iter().enumerate() {
            assert_eq!(segment.index, position);
            assert_eq!(segment.id, format!("seg_{position}"));
        }
    }

    #[test]
    fn equal_timestamps_keep_original_relative_order() {
        let normalized = normalize(&[
            raw("s1", 1000, 1500, "a"),
            raw("s2", 1000, 1500, "b"),
            raw("s3", 1000, 1500, "c"),
        ]);

        let texts: Vec<&str> = normalized
            .segments
            .iter()
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(texts, ["a", "b", "c"]);
    }

    #[test]
    fn temp_handles_resolve_to_final_positions() {
        let normalized = normalize(&[
            raw("s1", 5000, 6000, "late"),
            raw("s2", 0, 1000, "early"),
        ]);

        // raw slot 0 ("late") sorted to final index 1
        assert_eq!(normalized.final_index(TempId(0)), Some(1));
        assert_eq!(normalized.final_index(TempId(1)), Some(0));
    }

    #[test]
    fn handle_at_clamps_out_of_range_references() {
        let normalized = normalize(&[raw("s1", 0, 1000, "a"), raw("s2", 1000, 2000, "b")]);

        assert_eq!(normalized.handle_at(-3), Some(TempId(0)));
        assert_eq!(normalized.handle_at(99), Some(TempId(1)));
        assert_eq!(normalized.handle_at(1), Some(TempId(1)));
    }

    #[test]
    fn handle_at_on_empty_transcript_is_none() {
        let normalized = normalize(&[]);
        assert_eq!(normalized.handle_at(0), None);
    }

    #[test]
    fn reindex_is_idempotent() {
        let normalized = normalize(&[
            raw("s1", 3000, 4000, "b"),
            raw("s2", 0, 1000, "a"),
        ]);

        let once = reindex(normalized.segments.clone());
        assert_eq!(once, normalized.segments);
        let twice = reindex(once.clone());
        assert_eq!(twice, once);
    }

    #[test]
    fn duration_is_last_segment_end() {
        let normalized = normalize(&[raw("s1", 0, 1000, "a"), raw("s2", 1000, 2500, "b")]);
        assert_eq!(normalized.duration_ms(), 2500);
        assert_eq!(normalize(&[]).duration_ms(), 0);
    }
}
