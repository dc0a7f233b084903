// ============================================
// Score Aggregator & Classifier
// ============================================
//
// Blends every fired factor into one normalized score, estimates how much
// signal backed the result, and labels which groups drove it.

use crate::models::{Factor, FactorGroup, RecommendationKind};
use std::collections::HashSet;

/// Weighted mean of factor scores. Zero total weight yields a zero score,
/// never a division error.
pub(crate) fn aggregate(factors: &[Factor]) -> f32 {
    let total_weight: f32 = factors.iter().map(|f| f.weight).sum();
    if total_weight <= 0.0 {
        return 0.0;
    }

    let weighted_sum: f32 = factors.iter().map(|f| f.score * f.weight).sum();
    (weighted_sum / total_weight).clamp(0.0, 1.0)
}

/// Confidence ladder: 0.5 base, +0.2 for profile data, +0.2 for any
/// behavior-derived factor, +0.1 once more than five factors fired.
pub(crate) fn confidence(factors: &[Factor], profile_present: bool) -> f32 {
    let mut confidence: f32 = 0.5;

    if profile_present {
        confidence += 0.2;
    }
    if factors.iter().any(|f| f.group == FactorGroup::Behavior) {
        confidence += 0.2;
    }
    if factors.len() > 5 {
        confidence += 0.1;
    }

    confidence.min(1.0)
}

/// Label the result by the groups that produced factors. Contextual
/// factors only name the result when nothing else fired.
pub(crate) fn classify(factors: &[Factor]) -> RecommendationKind {
    let groups: HashSet<FactorGroup> = factors.iter().map(|f| f.group).collect();

    let core: Vec<FactorGroup> = [
        FactorGroup::Profile,
        FactorGroup::Behavior,
        FactorGroup::Collaborative,
    ]
    .into_iter()
    .filter(|g| groups.contains(g))
    .collect();

    match core.as_slice() {
        [FactorGroup::Profile] => RecommendationKind::Profile,
        [FactorGroup::Behavior] => RecommendationKind::Behavior,
        [FactorGroup::Collaborative] => RecommendationKind::Collaborative,
        [] if groups.contains(&FactorGroup::Contextual) => RecommendationKind::Contextual,
        _ => RecommendationKind::Hybrid,
    }
}
