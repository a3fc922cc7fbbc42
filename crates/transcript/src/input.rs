use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("malformed model output: {0}")]
    MalformedModelOutput(#[from] serde_json::Error),
}

/// The transcription model's wire contract, exactly as it comes off the
/// generative backend: segments in arbitrary order, topic boundaries
/// expressed against that pre-sort order.
///
/// This is untrusted structured data. Parse it with
/// [`RawTranscription::from_json`] and let the caller decide how to degrade —
/// the pipeline treats a failed parse as an empty result, never a panic.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTranscription {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub speakers: Vec<RawSpeaker>,
    #[serde(default)]
    pub segments: Vec<RawSegment>,
    #[serde(default)]
    pub terms: Vec<RawTerm>,
    #[serde(default)]
    pub topics: Vec<RawTopic>,
    #[serde(default)]
    pub people: Vec<RawPerson>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSpeaker {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSegment {
    pub speaker_id: String,
    pub start_ms: i64,
    pub end_ms: i64,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTerm {
    #[serde(default)]
    pub id: Option<String>,
    pub term: String,
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Topic boundaries reference **pre-sort** segment positions. The model may
/// hand back out-of-range indices; the resolver clamps rather than fails.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTopic {
    pub title: String,
    pub start_segment_index: i64,
    pub end_segment_index: i64,
    #[serde(rename = "type", default = "default_topic_kind")]
    pub kind: crate::types::TopicKind,
}

fn default_topic_kind() -> crate::types::TopicKind {
    crate::types::TopicKind::Main
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPerson {
    pub name: String,
    #[serde(default)]
    pub affiliation: Option<String>,
}

impl RawTranscription {
    pub fn from_json(payload: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(payload)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TopicKind;

    #[test]
    fn parses_full_contract() {
        let raw = RawTranscription::from_json(
            r#"{
                "title": "Standup",
                "speakers": [{"id": "s1", "name": "Ada"}],
                "segments": [
                    {"speakerId": "s1", "startMs": 0, "endMs": 900, "text": "Morning."}
                ],
                "terms": [{"id": "t1", "term": "OKR", "definition": "objective", "aliases": ["OKRs"]}],
                "topics": [{"title": "Intro", "startSegmentIndex": 0, "endSegmentIndex": 0, "type": "main"}],
                "people": [{"name": "Ada", "affiliation": "Engineering"}]
            }"#,
        )
        .unwrap();

        assert_eq!(raw.title, "Standup");
        assert_eq!(raw.segments.len(), 1);
        assert_eq!(raw.segments[0].speaker_id, "s1");
        assert_eq!(raw.topics[0].kind, TopicKind::Main);
        assert_eq!(raw.people[0].affiliation.as_deref(), Some("Engineering"));
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let raw = RawTranscription::from_json(r#"{"title": "Sparse"}"#).unwrap();
        assert!(raw.segments.is_empty());
        assert!(raw.topics.is_empty());
        assert!(raw.terms.is_empty());
    }

    #[test]
    fn garbage_is_a_structured_error() {
        let err = RawTranscription::from_json("not json at all").unwrap_err();
        assert!(matches!(err, Error::MalformedModelOutput(_)));
    }

    #[test]
    fn tangent_topic_kind_round_trips() {
        let raw = RawTranscription::from_json(
            r#"{"topics": [{"title": "Aside", "startSegmentIndex": 2, "endSegmentIndex": 3, "type": "tangent"}]}"#,
        )
        .unwrap();
        assert_eq!(raw.topics[0].kind, TopicKind::Tangent);
    }
}
