use regex::Regex;

use crate::id;
use crate::input::RawTerm;
use crate::types::{Segment, Term, TermOccurrence};

pub fn term_from_raw(raw: &RawTerm) -> Term {
    Term {
        id: raw.id.clone().unwrap_or_else(id::entity_id),
        key: raw.term.to_lowercase(),
        display: raw.term.clone(),
        definition: raw.definition.clone(),
        aliases: raw.aliases.clone(),
    }
}

/// Scan every segment for every known term and record character-offset
/// occurrences.
///
/// Matching is case-insensitive and word-bounded over the escaped
/// alternation of the term's display form and all aliases. Occurrences of
/// distinct terms may overlap — no cross-term dedup happens here.
pub fn index_occurrences(segments: &[Segment], terms: &[Term]) -> Vec<TermOccurrence> {
    let patterns: Vec<(&Term, Regex)> = terms
        .iter()
        .filter_map(|term| match pattern_for(term) {
            Some(pattern) => Some((term, pattern)),
            None => {
                tracing::warn!(term = %term.display, "term has no scannable forms, skipping");
                None
            }
        })
        .collect();

    let mut occurrences = Vec::new();
    for segment in segments {
        for (term, pattern) in &patterns {
            for found in pattern.find_iter(&segment.text) {
                occurrences.push(TermOccurrence {
                    id: id::entity_id(),
                    term_id: term.id.clone(),
                    segment_id: segment.id.clone(),
                    start_char: found.start(),
                    end_char: found.end(),
                });
            }
        }
    }
    occurrences
}

fn pattern_for(term: &Term) -> Option<Regex> {
    let forms: Vec<String> = std::iter::once(term.display.as_str())
        .chain(term.aliases.iter().map(String::as_str))
        .filter(|form| !form.trim().is_empty())
        .map(regex::escape)
        .collect();
    if forms.is_empty() {
        return None;
    }
    Regex::new(&format!(r"(?i)\b(?:{})\b", forms.join("|"))).ok()
}
