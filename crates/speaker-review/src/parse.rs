use crate::types::SpeakerCorrection;

/// Parse the reviewer's raw payload into corrections.
///
/// Never fails. An unparsable payload or a non-array top level yields an
/// empty set; individually malformed records are dropped while the rest of
/// the batch survives. The pipeline proceeds with whatever remains — the
/// review pass is advisory.
pub fn parse_corrections(payload: &str) -> Vec<SpeakerCorrection> {
    let stripped = strip_code_fences(payload);

    let values = match serde_json::from_str::<serde_json::Value>(stripped) {
        Ok(serde_json::Value::Array(values)) => values,
        Ok(other) => {
            tracing::warn!(got = other.to_string(), "correction payload is not an array");
            return Vec::new();
        }
        Err(error) => {
            tracing::warn!(%error, "correction payload failed to parse");
            return Vec::new();
        }
    };

    values
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(correction) => Some(correction),
            Err(error) => {
                tracing::warn!(%error, "dropping malformed correction record");
                None
            }
        })
        .collect()
}

/// LLMs routinely wrap JSON in markdown fences despite being told not to.
fn strip_code_fences(payload: &str) -> &str {
    let trimmed = payload.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CorrectionAction;

    #[test]
    fn parses_a_plain_array() {
        let corrections = parse_corrections(
            r#"[{"segmentIndex": 2, "action": "reassign", "reason": "r", "newSpeaker": "s1"}]"#,
        );
        assert_eq!(corrections.len(), 1);
        assert_eq!(corrections[0].segment_index, 2);
    }

    #[test]
    fn strips_markdown_fences() {
        let corrections = parse_corrections(
            "```json\n[{\"segmentIndex\": 0, \"action\": \"reassign\", \"reason\": \"r\", \"newSpeaker\": \"s2\"}]\n```",
        );
        assert_eq!(corrections.len(), 1);
    }

    #[test]
    fn garbage_yields_empty_set() {
        assert!(parse_corrections("the model refused to answer").is_empty());
        assert!(parse_corrections("{\"not\": \"an array\"}").is_empty());
        assert!(parse_corrections("").is_empty());
    }

    #[test]
    fn malformed_records_are_dropped_individually() {
        let corrections = parse_corrections(
            r#"[
                {"segmentIndex": 0, "action": "reassign", "reason": "ok", "newSpeaker": "s2"},
                {"segmentIndex": 1, "action": "merge", "reason": "unknown action"},
                {"segmentIndex": "two", "action": "reassign", "newSpeaker": "s1"},
                {"segmentIndex": 3, "action": "split", "reason": "ok",
                 "splitAtChar": 5, "speakerBefore": "s1", "speakerAfter": "s2"}
            ]"#,
        );
        assert_eq!(corrections.len(), 2);
        assert!(matches!(
            corrections[1].action,
            CorrectionAction::Split { split_at_char: 5, .. }
        ));
    }

    #[test]
    fn missing_reason_defaults_to_empty() {
        let corrections = parse_corrections(
            r#"[{"segmentIndex": 0, "action": "reassign", "newSpeaker": "s2"}]"#,
        );
        assert_eq!(corrections.len(), 1);
        assert!(corrections[0].reason.is_empty());
    }
}
