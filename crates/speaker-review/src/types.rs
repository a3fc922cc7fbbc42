use serde::Deserialize;

/// One advisory edit proposed by the secondary review pass.
///
/// Transient: produced by an LLM call, consumed once by
/// [`crate::apply_corrections`], then discarded. `segment_index` references
/// the segment array as it stood when the reviewer saw it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakerCorrection {
    pub segment_index: usize,
    #[serde(default)]
    pub reason: String,
    #[serde(flatten)]
    pub action: CorrectionAction,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum CorrectionAction {
    /// Relabel the whole segment; text and timestamps untouched.
    Reassign { new_speaker: String },
    /// Partition the segment's text at `split_at_char` and attribute the two
    /// halves to different speakers. The split timestamp is interpolated
    /// linearly from the character ratio, assuming constant local speech
    /// rate — an acknowledged approximation.
    Split {
        split_at_char: usize,
        speaker_before: String,
        speaker_after: String,
    },
}

impl SpeakerCorrection {
    /// Speaker ids this correction would write into the transcript.
    pub fn speakers_referenced(&self) -> Vec<&str> {
        match &self.action {
            CorrectionAction::Reassign { new_speaker } => vec![new_speaker],
            CorrectionAction::Split {
                speaker_before,
                speaker_after,
                ..
            } => vec![speaker_before, speaker_after],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_reassign() {
        let correction: SpeakerCorrection = serde_json::from_str(
            r#"{"segmentIndex": 4, "action": "reassign", "reason": "wrong voice", "newSpeaker": "s2"}"#,
        )
        .unwrap();
        assert_eq!(correction.segment_index, 4);
        assert_eq!(
            correction.action,
            CorrectionAction::Reassign {
                new_speaker: "s2".to_string()
            }
        );
    }

    #[test]
    fn deserializes_split() {
        let correction: SpeakerCorrection = serde_json::from_str(
            r#"{"segmentIndex": 1, "action": "split", "reason": "handoff mid-segment",
                "splitAtChar": 12, "speakerBefore": "s1", "speakerAfter": "s3"}"#,
        )
        .unwrap();
        match correction.action {
            CorrectionAction::Split {
                split_at_char,
                speaker_before,
                speaker_after,
            } => {
                assert_eq!(split_at_char, 12);
                assert_eq!(speaker_before, "s1");
                assert_eq!(speaker_after, "s3");
            }
            other => panic!("expected split, got {other:?}"),
        }
    }

    #[test]
    fn unknown_action_is_an_error() {
        let result = serde_json::from_str::<SpeakerCorrection>(
            r#"{"segmentIndex": 0, "action": "merge", "reason": "nope"}"#,
        );
        assert!(result.is_err());
    }
}
