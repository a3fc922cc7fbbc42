use crate::id;
use crate::input::RawTopic;
use crate::normalize::Normalized;
use crate::types::Topic;

/// Map topic boundary references from the model's pre-sort index space onto
/// the normalized index space.
///
/// Each pre-sort position is converted to a stable handle (clamped to the
/// first/last raw segment when the model supplied an out-of-range index),
/// then looked up in the normalizer's final-index map. An unresolvable
/// handle defaults to index 0 rather than failing. Because sorting can
/// invert a pair's relative order, the resolved pair is re-ordered so that
/// `start_index <= end_index` always holds.
///
/// Topics on an empty transcript are dropped — there is no index space for
/// them to live in.
pub fn resolve(raw_topics: &[RawTopic], normalized: &Normalized) -> Vec<Topic> {
    if normalized.segments.is_empty() {
        if !raw_topics.is_empty() {
            tracing::warn!(count = raw_topics.len(), "dropping topics on empty transcript");
        }
        return Vec::new();
    }

    raw_topics
        .iter()
        .map(|topic| {
            let start = resolve_boundary(topic.start_segment_index, normalized);
            let end = resolve_boundary(topic.end_segment_index, normalized);
            let (start_index, end_index) = if start <= end { (start, end) } else { (end, start) };
            Topic {
                id: id::entity_id(),
                title: topic.title.clone(),
                start_index,
                end_index,
                kind: topic.kind,
            }
        })
        .collect()
}

fn resolve_boundary(pre_sort_index: i64, normalized: &Normalized) -> usize {
    normalized
        .handle_at(pre_sort_index)
        .and_then(|temp| normalized.final_index(temp))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::RawSegment;
    use crate::normalize::normalize;
    use crate::types::TopicKind;

    fn raw_segment(start_ms: i64) -> RawSegment {
        RawSegment {
            speaker_id: "s1".to_string(),
            start_ms,
            end_ms: start_ms + 1000,
            text: String::new(),
        }
    }

    fn raw_topic(start: i64, end: i64) -> RawTopic {
        RawTopic {
            title: "Topic".to_string(),
            start_segment_index: start,
            end_segment_index: end,
            kind: TopicKind::Main,
        }
    }

    #[test]
    fn boundaries_follow_segments_through_the_sort() {
        // raw order: [2000, 0, 1000] → sorted: [0, 1000, 2000]
        let normalized = normalize(&[raw_segment(2000), raw_segment(0), raw_segment(1000)]);

        // topic covers raw positions 1..=2, i.e. the segments at 0ms and 1000ms
        let topics = resolve(&[raw_topic(1, 2)], &normalized);
        assert_eq!(topics[0].start_index, 0);
        assert_eq!(topics[0].end_index, 1);
    }

    #[test]
    fn out_of_range_references_clamp_into_bounds() {
        let normalized = normalize(&[raw_segment(0), raw_segment(1000)]);

        let topics = resolve(&[raw_topic(-5, 40)], &normalized);
        assert_eq!(topics[0].start_index, 0);
        assert_eq!(topics[0].end_index, 1);
    }

    #[test]
    fn inverted_boundaries_are_reordered() {
        // raw position 0 sorts after raw position 1
        let normalized = normalize(&[raw_segment(5000), raw_segment(0)]);

        let topics = resolve(&[raw_topic(0, 1)], &normalized);
        assert!(topics[0].start_index <= topics[0].end_index);
        assert_eq!((topics[0].start_index, topics[0].end_index), (0, 1));
    }

    #[test]
    fn invariant_holds_for_arbitrary_model_indices() {
        let normalized = normalize(&[raw_segment(0), raw_segment(1000), raw_segment(2000)]);
        let n = normalized.segments.len();

        for (start, end) in [(-9, -1), (0, 99), (99, -9), (2, 2)] {
            let topics = resolve(&[raw_topic(start, end)], &normalized);
            let topic = &topics[0];
            assert!(topic.start_index <= topic.end_index);
            assert!(topic.end_index <= n - 1);
        }
    }

    #[test]
    fn topics_on_empty_transcript_are_dropped() {
        let normalized = normalize(&[]);
        assert!(resolve(&[raw_topic(0, 0)], &normalized).is_empty());
    }
}
