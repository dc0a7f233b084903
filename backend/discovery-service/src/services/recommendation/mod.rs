// ============================================
// Recommendation Engine
// ============================================
//
// Per-request flow: collect inputs -> compute factors per candidate
// (fanned out across a core-bounded worker pool) -> aggregate -> classify
// -> rank -> truncate. Candidates the subject already completed are
// excluded before scoring. Missing optional signals suppress their
// factors; they are never an error.

pub mod aggregator;
pub mod behavior_factors;
pub mod collaborative_factors;
pub mod contextual_factors;
pub mod profile_factors;

pub use collaborative_factors::{ActivityTierModel, SimilarityModel};

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::models::{
    BehaviorSnapshot, Candidate, ProgressSnapshot, RecommendStats, ScoredResult, SessionContext,
    SubjectProfile,
};
use behavior_factors::BehaviorStats;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Below this many candidates the fan-out overhead outweighs the work.
const PARALLEL_THRESHOLD: usize = 64;

/// Lowercased candidate text, built once per candidate and shared by the
/// factor calculators.
pub(crate) struct CandidateText {
    pub title_description: String,
    pub blob: String,
}

impl CandidateText {
    pub(crate) fn of(candidate: &Candidate) -> Self {
        Self {
            title_description: candidate.title_description(),
            blob: candidate.text_blob(),
        }
    }
}

/// Everything one scoring pass needs, owned so chunks can move across
/// worker tasks.
struct ScoringContext {
    config: EngineConfig,
    profile: SubjectProfile,
    progress: ProgressSnapshot,
    behavior: BehaviorSnapshot,
    session: SessionContext,
    stats: BehaviorStats,
    max_engagement: f32,
    behavior_active: bool,
    similarity: Arc<dyn SimilarityModel>,
}

pub struct RecommendationEngine {
    config: EngineConfig,
    similarity: Arc<dyn SimilarityModel>,
}

impl RecommendationEngine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            similarity: Arc::new(ActivityTierModel),
        })
    }

    /// Create an engine with a custom similarity model in place of the
    /// activity-tier placeholder.
    pub fn with_similarity_model(
        config: EngineConfig,
        similarity: Arc<dyn SimilarityModel>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, similarity })
    }

    /// Score and rank the catalog for one subject.
    ///
    /// Output is ordered by descending aggregate score with ties broken by
    /// ascending candidate id, and holds at most `limit` entries.
    pub async fn recommend(
        &self,
        profile: &SubjectProfile,
        catalog: &[Candidate],
        progress: &ProgressSnapshot,
        behavior: &BehaviorSnapshot,
        context: &SessionContext,
        limit: usize,
    ) -> Result<Vec<ScoredResult>> {
        if let Some(bad) = catalog.iter().find(|c| !c.rating.is_finite()) {
            return Err(EngineError::InvalidInput(format!(
                "Candidate {} has a non-finite rating",
                bad.id
            )));
        }

        let mut run_stats = RecommendStats {
            catalog_size: catalog.len(),
            ..Default::default()
        };

        let ctx = Arc::new(ScoringContext {
            config: self.config.clone(),
            profile: profile.clone(),
            progress: progress.clone(),
            behavior: behavior.clone(),
            session: context.clone(),
            stats: BehaviorStats::derive(catalog, progress, behavior),
            max_engagement: collaborative_factors::max_engagement(catalog),
            behavior_active: !progress.is_empty() || !behavior.is_empty(),
            similarity: Arc::clone(&self.similarity),
        });

        // Hard filter: fully completed candidates never reach scoring.
        let eligible: Vec<Candidate> = catalog
            .iter()
            .filter(|c| !progress.is_completed(c.id))
            .cloned()
            .collect();
        run_stats.completed_excluded = catalog.len() - eligible.len();

        let mut results = if eligible.len() < PARALLEL_THRESHOLD {
            eligible
                .iter()
                .map(|c| score_candidate(&ctx, c))
                .collect::<Vec<_>>()
        } else {
            score_in_parallel(Arc::clone(&ctx), eligible).await
        };
        run_stats.scored = results.len();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.candidate_id.cmp(&b.candidate_id))
        });
        results.truncate(limit);
        run_stats.returned = results.len();

        info!(
            catalog_size = run_stats.catalog_size,
            completed_excluded = run_stats.completed_excluded,
            scored = run_stats.scored,
            returned = run_stats.returned,
            "Recommendation run complete"
        );

        Ok(results)
    }
}

/// Fan candidate scoring out over a worker pool bounded by available
/// cores, then join before sorting.
async fn score_in_parallel(
    ctx: Arc<ScoringContext>,
    eligible: Vec<Candidate>,
) -> Vec<ScoredResult> {
    let workers = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4);
    let chunk_size = ((eligible.len() + workers - 1) / workers).max(1);

    let mut tasks = Vec::with_capacity(workers);
    for chunk in eligible.chunks(chunk_size) {
        let ctx = Arc::clone(&ctx);
        let chunk = chunk.to_vec();
        tasks.push(tokio::task::spawn_blocking(move || {
            chunk
                .iter()
                .map(|c| score_candidate(&ctx, c))
                .collect::<Vec<_>>()
        }));
    }

    let mut results = Vec::with_capacity(eligible.len());
    for outcome in futures::future::join_all(tasks).await {
        match outcome {
            Ok(scored) => results.extend(scored),
            Err(e) => warn!("Scoring task failed: {}", e),
        }
    }
    results
}

fn score_candidate(ctx: &ScoringContext, candidate: &Candidate) -> ScoredResult {
    let text = CandidateText::of(candidate);
    let mut factors = Vec::new();

    profile_factors::compute(&ctx.config.factors, &ctx.profile, &text, &mut factors);
    if ctx.behavior_active {
        behavior_factors::compute(
            &ctx.config.factors,
            &ctx.progress,
            &ctx.behavior,
            &ctx.stats,
            candidate,
            &text,
            &mut factors,
        );
    }
    collaborative_factors::compute(
        &ctx.config.factors,
        ctx.similarity.as_ref(),
        &ctx.progress,
        ctx.max_engagement,
        candidate,
        &mut factors,
    );
    contextual_factors::compute(&ctx.config.factors, &ctx.session, &text, &mut factors);

    let score = aggregator::aggregate(&factors);
    let confidence = aggregator::confidence(&factors, ctx.profile.has_data());
    let kind = aggregator::classify(&factors);

    debug!(
        candidate_id = %candidate.id,
        score = score,
        factor_count = factors.len(),
        kind = kind.as_str(),
        "Candidate scored"
    );

    ScoredResult {
        candidate_id: candidate.id,
        score,
        confidence,
        factors,
        kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CandidateKind;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn test_candidate(id: u128, title: &str, category: &str) -> Candidate {
        Candidate {
            id: Uuid::from_u128(id),
            kind: CandidateKind::Course,
            title: title.to_string(),
            description: String::new(),
            body: String::new(),
            tags: Vec::new(),
            category: Some(category.to_string()),
            instructor_id: None,
            instructor_name: None,
            language: None,
            rating: 4.2,
            popularity: 100,
            duration_seconds: 3600,
            progress_events: 10,
            completion_events: 4,
            has_transcript: true,
            has_subtitles: false,
            is_free: false,
            is_featured: false,
            published_at: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
        }
    }

    fn test_context() -> SessionContext {
        SessionContext {
            now: Utc.with_ymd_and_hms(2026, 3, 10, 14, 0, 0).unwrap(),
            session_duration_seconds: 900,
            device: None,
            recent_actions: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_recommend_excludes_completed() {
        let engine = RecommendationEngine::new(EngineConfig::default()).unwrap();
        let catalog = vec![
            test_candidate(1, "Business Fundamentals", "business"),
            test_candidate(2, "Advanced Business Strategy", "business"),
        ];

        let mut progress = ProgressSnapshot::default();
        progress.completions.insert(Uuid::from_u128(1), 1);

        let results = engine
            .recommend(
                &SubjectProfile::default(),
                &catalog,
                &progress,
                &BehaviorSnapshot::default(),
                &test_context(),
                10,
            )
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].candidate_id, Uuid::from_u128(2));
    }

    #[tokio::test]
    async fn test_recommend_sorted_and_limited() {
        let engine = RecommendationEngine::new(EngineConfig::default()).unwrap();
        let profile = SubjectProfile {
            interests: vec!["rust".to_string()],
            ..Default::default()
        };
        let catalog = vec![
            test_candidate(1, "Gardening Basics", "lifestyle"),
            test_candidate(2, "Rust in Practice", "programming"),
            test_candidate(3, "Watercolor Painting", "art"),
        ];

        let results = engine
            .recommend(
                &profile,
                &catalog,
                &ProgressSnapshot::default(),
                &BehaviorSnapshot::default(),
                &test_context(),
                2,
            )
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert!(results[0].score >= results[1].score);
        assert_eq!(results[0].candidate_id, Uuid::from_u128(2));
    }

    #[tokio::test]
    async fn test_recommend_parallel_path_matches_inline() {
        let engine = RecommendationEngine::new(EngineConfig::default()).unwrap();
        let profile = SubjectProfile {
            interests: vec!["data".to_string()],
            ..Default::default()
        };

        // Enough candidates to cross the fan-out threshold.
        let catalog: Vec<Candidate> = (0..200)
            .map(|i| {
                test_candidate(
                    i,
                    if i % 3 == 0 { "Data Engineering" } else { "History" },
                    "general",
                )
            })
            .collect();

        let first = engine
            .recommend(
                &profile,
                &catalog,
                &ProgressSnapshot::default(),
                &BehaviorSnapshot::default(),
                &test_context(),
                50,
            )
            .await
            .unwrap();
        let second = engine
            .recommend(
                &profile,
                &catalog,
                &ProgressSnapshot::default(),
                &BehaviorSnapshot::default(),
                &test_context(),
                50,
            )
            .await
            .unwrap();

        let first_ids: Vec<_> = first.iter().map(|r| r.candidate_id).collect();
        let second_ids: Vec<_> = second.iter().map(|r| r.candidate_id).collect();
        assert_eq!(first_ids, second_ids);
    }

    #[tokio::test]
    async fn test_recommend_rejects_non_finite_rating() {
        let engine = RecommendationEngine::new(EngineConfig::default()).unwrap();
        let mut candidate = test_candidate(1, "Broken", "general");
        candidate.rating = f32::NAN;

        let result = engine
            .recommend(
                &SubjectProfile::default(),
                &[candidate],
                &ProgressSnapshot::default(),
                &BehaviorSnapshot::default(),
                &test_context(),
                10,
            )
            .await;

        assert!(matches!(result, Err(EngineError::InvalidInput(_))));
    }
}
