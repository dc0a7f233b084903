// ============================================
// Suggestion Generator
// ============================================
//
// Case-insensitive substring completions drawn from titles, instructor
// names, categories, and tags, deduplicated by exact string and capped.
// No ranking beyond catalog insertion order.

use crate::models::Candidate;
use std::collections::HashSet;

pub(crate) fn suggestions(catalog: &[Candidate], query: &str, limit: usize) -> Vec<String> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();

    for candidate in catalog {
        let sources = std::iter::once(&candidate.title)
            .chain(candidate.instructor_name.iter())
            .chain(candidate.category.iter())
            .chain(candidate.tags.iter());

        for source in sources {
            if source.to_lowercase().contains(&needle) && seen.insert(source.clone()) {
                out.push(source.clone());
                if out.len() == limit {
                    return out;
                }
            }
        }
    }

    out
}
