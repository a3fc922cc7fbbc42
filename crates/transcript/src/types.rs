/// One contiguous span of transcript text attributed to a single speaker.
///
/// Within a [`Conversation`], segments are ordered by `start_ms` ascending
/// and `index` is exactly the array position. `id` is re-derived from `index`
/// whenever the sequence is (re-)ordered, so it stays deterministic across
/// normalization and correction passes.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, specta::Type)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub id: String,
    pub index: usize,
    pub speaker_id: String,
    pub start_ms: i64,
    pub end_ms: i64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, specta::Type)]
#[serde(rename_all = "camelCase")]
pub struct Speaker {
    pub id: String,
    pub display_name: String,
    pub color_index: u32,
}

/// A known domain term. `key` is the lowercased canonical form used for
/// dedup; `display` and `aliases` are what the occurrence indexer scans for.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, specta::Type)]
#[serde(rename_all = "camelCase")]
pub struct Term {
    pub id: String,
    pub key: String,
    pub display: String,
    pub definition: String,
    pub aliases: Vec<String>,
}

/// One match of a term inside one segment's text.
///
/// `start_char`/`end_char` are byte offsets on UTF-8 boundaries with
/// `0 <= start_char < end_char <= text.len()`. Occurrences of distinct terms
/// may overlap; resolving that is a presentation concern.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, specta::Type)]
#[serde(rename_all = "camelCase")]
pub struct TermOccurrence {
    pub id: String,
    pub term_id: String,
    pub segment_id: String,
    pub start_char: usize,
    pub end_char: usize,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, specta::Type,
)]
#[serde(rename_all = "snake_case")]
pub enum TopicKind {
    Main,
    Tangent,
}

/// A titled span of segments, expressed in the final (normalized) index
/// space: `0 <= start_index <= end_index <= n-1`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, specta::Type)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: String,
    pub title: String,
    pub start_index: usize,
    pub end_index: usize,
    pub kind: TopicKind,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, specta::Type)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    pub name: String,
    pub affiliation: Option<String>,
    pub user_notes: Option<String>,
}

/// Trust level of the transcript's timestamps, and the single source of
/// truth gating the drift corrector. Force-aligned timestamps must never be
/// globally rescaled, which is why this is one tagged enum instead of a pair
/// of booleans.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, specta::Type,
)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentStatus {
    Idle,
    Aligning,
    Aligned,
    Error,
}

/// Recorded when the playback-time fallback rescale has been applied. Doubles
/// as the idempotency marker: a conversation carrying `Some(DriftCorrection)`
/// is never rescaled again.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize, specta::Type)]
#[serde(rename_all = "camelCase")]
pub struct DriftCorrection {
    pub ratio: f64,
    pub drift_ms: i64,
}

/// Aggregate root owning the transcript and everything attached to it.
///
/// Every pipeline stage consumes a `Conversation` by value and returns a
/// fully-updated one, or an error leaving the caller's value untouched —
/// nothing is ever partially committed. `duration_ms` always equals the last
/// segment's `end_ms` after a stage completes.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, specta::Type)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub title: String,
    pub speakers: Vec<Speaker>,
    pub segments: Vec<Segment>,
    pub terms: Vec<Term>,
    pub term_occurrences: Vec<TermOccurrence>,
    pub topics: Vec<Topic>,
    pub people: Vec<Person>,
    pub duration_ms: i64,
    pub alignment_status: AlignmentStatus,
    pub drift_correction: Option<DriftCorrection>,
}

impl Conversation {
    /// Duration implied by the segment sequence: the last segment's `end_ms`,
    /// or zero for an empty transcript.
    pub fn last_end_ms(&self) -> i64 {
        self.segments.last().map(|s| s.end_ms).unwrap_or(0)
    }

    pub fn recompute_duration(&mut self) {
        self.duration_ms = self.last_end_ms();
    }
}
