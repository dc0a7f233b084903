// ============================================
// Search Engine
// ============================================
//
// Query flow: tokenize -> match weighted fields -> apply structured
// filters -> rank -> paginate. An empty or whitespace-only query
// short-circuits to an empty result set: it is "no search", never "match
// everything".

pub mod filter;
pub mod matcher;
pub mod ranker;
pub mod suggest;
pub mod tokenizer;

pub use filter::SearchFilters;
pub use ranker::{SortKey, SortOrder};
pub use tokenizer::tokenize;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::models::{Candidate, SearchMatch};
use ranker::RankedEntry;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub filters: SearchFilters,
    pub limit: usize,
    pub offset: usize,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            filters: SearchFilters::default(),
            limit: 20,
            offset: 0,
            sort_by: SortKey::default(),
            sort_order: SortOrder::default(),
        }
    }
}

pub struct SearchEngine {
    config: EngineConfig,
}

impl SearchEngine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Run one search over the supplied catalog snapshot.
    pub fn search(&self, catalog: &[Candidate], request: &SearchRequest) -> Vec<SearchMatch> {
        let terms = tokenize(&request.query);
        if terms.is_empty() {
            debug!("Empty query after tokenization, returning no results");
            return Vec::new();
        }

        let mut entries: Vec<RankedEntry<'_>> = catalog
            .iter()
            .filter(|candidate| request.filters.matches(candidate))
            .filter_map(|candidate| {
                matcher::match_candidate(candidate, &terms, &self.config.fields)
                    .map(|matched| RankedEntry { candidate, matched })
            })
            .collect();

        ranker::sort_entries(&mut entries, request.sort_by, request.sort_order);

        let page = ranker::paginate(entries, request.offset, request.limit);
        let results: Vec<SearchMatch> = page
            .into_iter()
            .map(|entry| SearchMatch {
                candidate_id: entry.candidate.id,
                relevance: entry.matched.relevance,
                highlights: entry.matched.highlights,
                matched_fields: entry.matched.matched_fields,
            })
            .collect();

        info!(
            term_count = terms.len(),
            catalog_size = catalog.len(),
            returned = results.len(),
            "Search complete"
        );

        results
    }

    /// Prefix/substring completions from titles, instructor names,
    /// categories, and tags.
    pub fn suggest(&self, catalog: &[Candidate], query: &str, limit: usize) -> Vec<String> {
        suggest::suggestions(catalog, query, limit.min(self.config.suggestion_limit))
    }
}
