// ============================================
// Field Matcher
// ============================================
//
// Scores term occurrence across the weighted fields of a candidate and
// extracts one highlight window per matched field. A candidate with zero
// accumulated relevance across all fields and terms is excluded from
// results entirely.

use crate::config::FieldWeights;
use crate::models::{Candidate, Highlight, SearchField};

/// Characters of context kept on each side of a highlighted match.
const HIGHLIGHT_CONTEXT: usize = 20;

#[derive(Debug, Clone)]
pub(crate) struct FieldMatch {
    pub relevance: f32,
    pub highlights: Vec<Highlight>,
    pub matched_fields: Vec<SearchField>,
}

/// Match every term against the candidate's weighted fields. Returns
/// `None` when nothing matched anywhere.
pub(crate) fn match_candidate(
    candidate: &Candidate,
    terms: &[String],
    weights: &FieldWeights,
) -> Option<FieldMatch> {
    let tags_text = candidate.tags.join(" ");
    let fields: [(SearchField, &str, f32); 4] = [
        (SearchField::Title, candidate.title.as_str(), weights.title),
        (
            SearchField::Description,
            candidate.description.as_str(),
            weights.description,
        ),
        (SearchField::Body, candidate.body.as_str(), weights.body),
        (SearchField::Tags, tags_text.as_str(), weights.tags),
    ];

    let mut relevance = 0.0f32;
    let mut highlights = Vec::new();
    let mut matched_fields = Vec::new();

    for (field, text, weight) in fields {
        let text_lower = text.to_lowercase();
        let mut first_hit: Option<(usize, usize)> = None;

        for term in terms {
            let occurrences = count_whole_word(&text_lower, term);
            if occurrences == 0 {
                continue;
            }
            relevance += occurrences as f32 * weight;

            if let Some(position) = find_whole_word(&text_lower, term) {
                let earlier = first_hit.map_or(true, |(start, _)| position < start);
                if earlier {
                    first_hit = Some((position, term.len()));
                }
            }
        }

        if let Some((start, len)) = first_hit {
            matched_fields.push(field);
            highlights.push(Highlight {
                field,
                snippet: extract_snippet(text, start, len),
            });
        }
    }

    if relevance > 0.0 {
        Some(FieldMatch {
            relevance,
            highlights,
            matched_fields,
        })
    } else {
        None
    }
}

/// Count whole-word occurrences of an already-lowercased term.
fn count_whole_word(text_lower: &str, term: &str) -> usize {
    if term.is_empty() {
        return 0;
    }
    text_lower
        .match_indices(term)
        .filter(|&(idx, matched)| is_word_boundary(text_lower, idx, matched.len()))
        .count()
}

/// Byte offset of the first whole-word occurrence, if any.
fn find_whole_word(text_lower: &str, term: &str) -> Option<usize> {
    if term.is_empty() {
        return None;
    }
    text_lower
        .match_indices(term)
        .find(|&(idx, matched)| is_word_boundary(text_lower, idx, matched.len()))
        .map(|(idx, _)| idx)
}

fn is_word_boundary(text: &str, start: usize, len: usize) -> bool {
    let before_ok = text[..start]
        .chars()
        .next_back()
        .map_or(true, |c| !c.is_alphanumeric());
    let after_ok = text[start + len..]
        .chars()
        .next()
        .map_or(true, |c| !c.is_alphanumeric());
    before_ok && after_ok
}

/// Extract a window around a match, marked with ellipses where truncated.
///
/// Offsets come from the lowercased copy of the field; the clamping below
/// keeps slicing safe on char boundaries even when lowercasing changed
/// byte lengths.
fn extract_snippet(text: &str, start: usize, match_len: usize) -> String {
    let start = start.min(text.len());

    let mut begin = start.saturating_sub(HIGHLIGHT_CONTEXT);
    while begin > 0 && !text.is_char_boundary(begin) {
        begin -= 1;
    }

    let mut end = (start + match_len + HIGHLIGHT_CONTEXT).min(text.len());
    while end < text.len() && !text.is_char_boundary(end) {
        end += 1;
    }

    let mut snippet = String::new();
    if begin > 0 {
        snippet.push_str("...");
    }
    snippet.push_str(&text[begin..end]);
    if end < text.len() {
        snippet.push_str("...");
    }
    snippet
}
