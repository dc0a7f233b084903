// ============================================
// Result Ranker
// ============================================
//
// Sorts matched candidates by a selectable key, descending unless
// ascending is requested. Ties always break by candidate id ascending so
// repeated runs over identical input produce identical order.

use super::matcher::FieldMatch;
use crate::models::Candidate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Relevance,
    Popularity,
    Rating,
    Date,
    Title,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

/// A matched candidate awaiting ranking.
pub(crate) struct RankedEntry<'a> {
    pub candidate: &'a Candidate,
    pub matched: FieldMatch,
}

pub(crate) fn sort_entries(entries: &mut [RankedEntry<'_>], key: SortKey, order: SortOrder) {
    entries.sort_by(|a, b| {
        // Primary comparison in descending orientation
        let primary = match key {
            SortKey::Relevance => b
                .matched
                .relevance
                .partial_cmp(&a.matched.relevance)
                .unwrap_or(Ordering::Equal),
            SortKey::Popularity => b.candidate.popularity.cmp(&a.candidate.popularity),
            SortKey::Rating => b
                .candidate
                .rating
                .partial_cmp(&a.candidate.rating)
                .unwrap_or(Ordering::Equal),
            SortKey::Date => b.candidate.published_at.cmp(&a.candidate.published_at),
            SortKey::Title => b.candidate.title.cmp(&a.candidate.title),
        };

        let primary = match order {
            SortOrder::Descending => primary,
            SortOrder::Ascending => primary.reverse(),
        };

        // The tie-break stays ascending regardless of sort order
        primary.then_with(|| a.candidate.id.cmp(&b.candidate.id))
    });
}

/// Offset/limit slice applied after sorting.
pub(crate) fn paginate<T>(items: Vec<T>, offset: usize, limit: usize) -> Vec<T> {
    items.into_iter().skip(offset).take(limit).collect()
}
