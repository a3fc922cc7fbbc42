/// Segment ids are a pure function of the segment's position at the moment
/// of (re-)ordering, so normalization and correction passes that rebuild the
/// sequence produce identical ids for identical orderings.
pub fn segment_id(index: usize) -> String {
    format!("seg_{index}")
}

/// Random id for entities that are minted once and never re-derived
/// (conversations, terms, occurrences, topics, people).
pub fn entity_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
