// ============================================
// Collaborative Factor Calculator
// ============================================
//
// Scores a candidate from other subjects' behavior rather than its own
// content. The similar-users signal sits behind the SimilarityModel seam:
// the shipped ActivityTierModel is a coarse activity proxy, and a true
// user-user similarity (e.g. Jaccard over completed-candidate sets) can be
// substituted without touching the aggregator contract.

use crate::config::FactorWeights;
use crate::models::{Candidate, Factor, FactorGroup, ProgressSnapshot};
use crate::utils::normalize_score;

/// Seam for the user-user similarity signal.
pub trait SimilarityModel: Send + Sync {
    /// Similarity-derived score for the subject, in [0, 1].
    fn similar_user_score(&self, progress: &ProgressSnapshot) -> f32;
}

/// Coarse placeholder: more completed candidates map to higher tiers.
#[derive(Debug, Default)]
pub struct ActivityTierModel;

impl SimilarityModel for ActivityTierModel {
    fn similar_user_score(&self, progress: &ProgressSnapshot) -> f32 {
        match progress.completed_count() {
            n if n >= 10 => 0.8,
            n if n >= 3 => 0.6,
            _ => 0.4,
        }
    }
}

/// Engagement mass of one candidate: progress events weigh 0.3,
/// completion events 0.7.
pub(crate) fn engagement_score(candidate: &Candidate) -> f32 {
    candidate.progress_events as f32 * 0.3 + candidate.completion_events as f32 * 0.7
}

/// Highest engagement observed in the current catalog snapshot, used to
/// scale popularity into [0, 1].
pub(crate) fn max_engagement(catalog: &[Candidate]) -> f32 {
    catalog
        .iter()
        .map(engagement_score)
        .fold(0.0, f32::max)
}

pub(crate) fn compute(
    weights: &FactorWeights,
    similarity: &dyn SimilarityModel,
    progress: &ProgressSnapshot,
    max_engagement: f32,
    candidate: &Candidate,
    out: &mut Vec<Factor>,
) {
    let score = similarity.similar_user_score(progress);
    out.push(Factor::new(
        "similar_users",
        FactorGroup::Collaborative,
        weights.similar_users,
        score,
        format!(
            "Activity tier {:.1} from {} completed courses",
            score,
            progress.completed_count()
        ),
    ));

    // normalize_score degrades to 0.5 when the catalog has no engagement
    let raw = engagement_score(candidate);
    let score = normalize_score(raw, 0.0, max_engagement);
    let reason = if max_engagement > 0.0 {
        format!(
            "Engagement {:.1} of catalog maximum {:.1}",
            raw, max_engagement
        )
    } else {
        "No engagement observed in catalog".to_string()
    };
    out.push(Factor::new(
        "popularity",
        FactorGroup::Collaborative,
        weights.popularity,
        score,
        reason,
    ));
}
