// ============================================
// Filter Pipeline
// ============================================
//
// Structured constraints applied as an AND-conjunction over matched
// candidates. A field left unset is a no-op. Filtering never raises for an
// unknown value; non-matching candidates are simply excluded.

use crate::models::{Candidate, Difficulty, DurationBucket};
use crate::services::recommendation::profile_factors::estimate_difficulty;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchFilters {
    pub category: Option<String>,
    pub instructor_id: Option<Uuid>,
    /// Compared against the text-derived difficulty estimate; candidates
    /// carry no declared difficulty.
    pub difficulty: Option<Difficulty>,
    pub duration: Option<DurationBucket>,
    pub min_rating: Option<f32>,
    pub language: Option<String>,
    /// Keeps candidates whose tag set intersects this one.
    pub tags: Vec<String>,
    pub has_transcript: Option<bool>,
    pub has_subtitles: Option<bool>,
    pub is_free: Option<bool>,
    pub is_featured: Option<bool>,
}

impl SearchFilters {
    pub(crate) fn matches(&self, candidate: &Candidate) -> bool {
        if let Some(category) = &self.category {
            let hit = candidate
                .category
                .as_ref()
                .is_some_and(|c| c.eq_ignore_ascii_case(category));
            if !hit {
                return false;
            }
        }

        if let Some(instructor_id) = self.instructor_id {
            if candidate.instructor_id != Some(instructor_id) {
                return false;
            }
        }

        if let Some(difficulty) = self.difficulty {
            let estimated = Difficulty::from_estimate(estimate_difficulty(&candidate.text_blob()));
            if estimated != difficulty {
                return false;
            }
        }

        if let Some(duration) = self.duration {
            if DurationBucket::of(candidate.duration_seconds) != duration {
                return false;
            }
        }

        if let Some(min_rating) = self.min_rating {
            if candidate.rating < min_rating {
                return false;
            }
        }

        if let Some(language) = &self.language {
            let hit = candidate
                .language
                .as_ref()
                .is_some_and(|l| l.eq_ignore_ascii_case(language));
            if !hit {
                return false;
            }
        }

        if !self.tags.is_empty() {
            let hit = self.tags.iter().any(|wanted| {
                candidate
                    .tags
                    .iter()
                    .any(|tag| tag.eq_ignore_ascii_case(wanted))
            });
            if !hit {
                return false;
            }
        }

        if let Some(wanted) = self.has_transcript {
            if candidate.has_transcript != wanted {
                return false;
            }
        }
        if let Some(wanted) = self.has_subtitles {
            if candidate.has_subtitles != wanted {
                return false;
            }
        }
        if let Some(wanted) = self.is_free {
            if candidate.is_free != wanted {
                return false;
            }
        }
        if let Some(wanted) = self.is_featured {
            if candidate.is_featured != wanted {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CandidateKind;
    use chrono::Utc;

    fn test_candidate() -> Candidate {
        Candidate {
            id: Uuid::from_u128(1),
            kind: CandidateKind::Course,
            title: "Intermediate SQL".to_string(),
            description: "Joins, windows, and query plans".to_string(),
            body: String::new(),
            tags: vec!["sql".to_string(), "databases".to_string()],
            category: Some("Data".to_string()),
            instructor_id: Some(Uuid::from_u128(42)),
            instructor_name: Some("Dana Reyes".to_string()),
            language: Some("en".to_string()),
            rating: 4.3,
            popularity: 900,
            duration_seconds: 5400,
            progress_events: 0,
            completion_events: 0,
            has_transcript: true,
            has_subtitles: false,
            is_free: false,
            is_featured: true,
            published_at: Utc::now(),
        }
    }

    #[test]
    fn test_unset_filters_match_everything() {
        assert!(SearchFilters::default().matches(&test_candidate()));
    }

    #[test]
    fn test_category_case_insensitive() {
        let filters = SearchFilters {
            category: Some("data".to_string()),
            ..Default::default()
        };
        assert!(filters.matches(&test_candidate()));

        let filters = SearchFilters {
            category: Some("art".to_string()),
            ..Default::default()
        };
        assert!(!filters.matches(&test_candidate()));
    }

    #[test]
    fn test_instructor_filter() {
        let filters = SearchFilters {
            instructor_id: Some(Uuid::from_u128(42)),
            ..Default::default()
        };
        assert!(filters.matches(&test_candidate()));

        let filters = SearchFilters {
            instructor_id: Some(Uuid::from_u128(7)),
            ..Default::default()
        };
        assert!(!filters.matches(&test_candidate()));
    }

    #[test]
    fn test_difficulty_uses_text_estimate() {
        let filters = SearchFilters {
            difficulty: Some(Difficulty::Intermediate),
            ..Default::default()
        };
        assert!(filters.matches(&test_candidate()));

        let filters = SearchFilters {
            difficulty: Some(Difficulty::Advanced),
            ..Default::default()
        };
        assert!(!filters.matches(&test_candidate()));
    }

    #[test]
    fn test_duration_and_rating() {
        let filters = SearchFilters {
            duration: Some(DurationBucket::Medium),
            min_rating: Some(4.0),
            ..Default::default()
        };
        assert!(filters.matches(&test_candidate()));

        let filters = SearchFilters {
            min_rating: Some(4.5),
            ..Default::default()
        };
        assert!(!filters.matches(&test_candidate()));
    }

    #[test]
    fn test_tag_intersection() {
        let filters = SearchFilters {
            tags: vec!["SQL".to_string(), "nosql".to_string()],
            ..Default::default()
        };
        assert!(filters.matches(&test_candidate()));

        let filters = SearchFilters {
            tags: vec!["painting".to_string()],
            ..Default::default()
        };
        assert!(!filters.matches(&test_candidate()));
    }

    #[test]
    fn test_boolean_flags() {
        let filters = SearchFilters {
            has_transcript: Some(true),
            is_featured: Some(true),
            ..Default::default()
        };
        assert!(filters.matches(&test_candidate()));

        let filters = SearchFilters {
            is_free: Some(true),
            ..Default::default()
        };
        assert!(!filters.matches(&test_candidate()));
    }

    #[test]
    fn test_missing_candidate_language_excluded() {
        let mut candidate = test_candidate();
        candidate.language = None;
        let filters = SearchFilters {
            language: Some("en".to_string()),
            ..Default::default()
        };
        assert!(!filters.matches(&candidate));
    }
}
