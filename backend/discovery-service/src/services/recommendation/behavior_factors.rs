// ============================================
// Behavior-Based Factor Calculator
// ============================================
//
// Derives factors from the subject's own interaction history: completions,
// view counts, recent searches, and time spent. Every ratio is guarded
// against a zero denominator and degrades to the neutral default of the
// factor instead of producing NaN/Inf.

use super::CandidateText;
use crate::config::FactorWeights;
use crate::models::{BehaviorSnapshot, Candidate, Factor, FactorGroup, ProgressSnapshot};
use crate::utils::contains_term;
use std::collections::HashSet;

/// Catalog-level aggregates shared by every candidate scored in one run.
#[derive(Debug, Clone, Default)]
pub(crate) struct BehaviorStats {
    /// Lowercased categories of candidates the subject has completed.
    pub completed_categories: HashSet<String>,
    pub total_views: u64,
    /// Average time spent per candidate present in the time-spent map.
    /// An empty map is treated as an average of 1 second.
    pub avg_time_spent: f64,
}

impl BehaviorStats {
    pub(crate) fn derive(
        catalog: &[Candidate],
        progress: &ProgressSnapshot,
        behavior: &BehaviorSnapshot,
    ) -> Self {
        let completed_categories = catalog
            .iter()
            .filter(|c| progress.is_completed(c.id))
            .filter_map(|c| c.category.as_ref())
            .map(|category| category.to_lowercase())
            .collect();

        let total_views = behavior.views.values().map(|&v| v as u64).sum();

        let avg_time_spent = if behavior.time_spent_seconds.is_empty() {
            1.0
        } else {
            let total: u64 = behavior.time_spent_seconds.values().sum();
            let avg = total as f64 / behavior.time_spent_seconds.len() as f64;
            if avg > 0.0 {
                avg
            } else {
                1.0
            }
        };

        Self {
            completed_categories,
            total_views,
            avg_time_spent,
        }
    }
}

pub(crate) fn compute(
    weights: &FactorWeights,
    progress: &ProgressSnapshot,
    behavior: &BehaviorSnapshot,
    stats: &BehaviorStats,
    candidate: &Candidate,
    text: &CandidateText,
    out: &mut Vec<Factor>,
) {
    // Completion pattern: does the subject finish material in this category?
    let (score, reason) = if progress.completed_count() == 0 {
        (0.5, "No completion history".to_string())
    } else {
        let same_category = candidate
            .category
            .as_ref()
            .is_some_and(|c| stats.completed_categories.contains(&c.to_lowercase()));
        if same_category {
            (0.8, "Completed courses in this category before".to_string())
        } else {
            (0.3, "No completions in this category".to_string())
        }
    };
    out.push(Factor::new(
        "completion_pattern",
        FactorGroup::Behavior,
        weights.completion_pattern,
        score,
        reason,
    ));

    if !behavior.views.is_empty() {
        let candidate_views = behavior.views.get(&candidate.id).copied().unwrap_or(0);
        let score = if stats.total_views == 0 {
            0.5
        } else {
            (candidate_views as f32 / stats.total_views as f32 * 2.0).min(1.0)
        };
        out.push(Factor::new(
            "viewing_pattern",
            FactorGroup::Behavior,
            weights.viewing_pattern,
            score,
            format!("{} of {} recent views", candidate_views, stats.total_views),
        ));
    }

    if !behavior.recent_searches.is_empty() {
        let matched = behavior
            .recent_searches
            .iter()
            .filter(|term| contains_term(&text.blob, term))
            .count();
        out.push(Factor::new(
            "search_pattern",
            FactorGroup::Behavior,
            weights.search_pattern,
            (0.3 * matched as f32).min(1.0),
            format!("{} recent search terms appear in this candidate", matched),
        ));
    }

    if !behavior.time_spent_seconds.is_empty() {
        let spent = behavior
            .time_spent_seconds
            .get(&candidate.id)
            .copied()
            .unwrap_or(0);
        let score = (spent as f64 / stats.avg_time_spent).min(1.0) as f32;
        out.push(Factor::new(
            "time_spent",
            FactorGroup::Behavior,
            weights.time_spent,
            score,
            format!("{}s spent against a {:.0}s average", spent, stats.avg_time_spent),
        ));
    }
}
