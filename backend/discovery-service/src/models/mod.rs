use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// An item eligible for ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub id: Uuid,
    pub kind: CandidateKind,
    pub title: String,
    pub description: String,
    /// Free-text body: lesson content, transcript text, instructor bio.
    pub body: String,
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub instructor_id: Option<Uuid>,
    pub instructor_name: Option<String>,
    pub language: Option<String>,
    pub rating: f32,
    pub popularity: u64,
    pub duration_seconds: u32,
    /// Progress events recorded against this candidate across all subjects.
    pub progress_events: u64,
    /// Completion events recorded against this candidate across all subjects.
    pub completion_events: u64,
    pub has_transcript: bool,
    pub has_subtitles: bool,
    pub is_free: bool,
    pub is_featured: bool,
    pub published_at: DateTime<Utc>,
}

impl Candidate {
    /// Lowercased title + description, the corpus for interest matching.
    pub fn title_description(&self) -> String {
        format!("{} {}", self.title, self.description).to_lowercase()
    }

    /// Lowercased full text: title, description, body, and tags.
    pub fn text_blob(&self) -> String {
        format!(
            "{} {} {} {}",
            self.title,
            self.description,
            self.body,
            self.tags.join(" ")
        )
        .to_lowercase()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CandidateKind {
    Course,
    Instructor,
    Lesson,
    Transcript,
}

impl CandidateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateKind::Course => "course",
            CandidateKind::Instructor => "instructor",
            CandidateKind::Lesson => "lesson",
            CandidateKind::Transcript => "transcript",
        }
    }
}

/// Profile attributes of the requesting user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubjectProfile {
    pub interests: Vec<String>,
    pub education_level: Option<EducationLevel>,
    pub experience_level: Option<ExperienceLevel>,
    pub industry: Option<String>,
    pub location: Option<Location>,
}

impl SubjectProfile {
    pub fn has_data(&self) -> bool {
        !self.interests.is_empty()
            || self.education_level.is_some()
            || self.experience_level.is_some()
            || self.industry.is_some()
            || self.location.is_some()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EducationLevel {
    HighSchool,
    Associate,
    Bachelor,
    Master,
    Phd,
}

impl EducationLevel {
    /// Fixed lookup mapping a level onto the difficulty scale.
    pub fn weight(&self) -> f32 {
        match self {
            EducationLevel::HighSchool => 0.3,
            EducationLevel::Associate => 0.45,
            EducationLevel::Bachelor => 0.6,
            EducationLevel::Master => 0.8,
            EducationLevel::Phd => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
}

impl ExperienceLevel {
    pub fn weight(&self) -> f32 {
        match self {
            ExperienceLevel::Entry => 0.3,
            ExperienceLevel::Mid => 0.6,
            ExperienceLevel::Senior => 0.9,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub country: String,
}

/// Per-candidate completion counts for the subject.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub completions: HashMap<Uuid, u32>,
}

impl ProgressSnapshot {
    pub fn is_empty(&self) -> bool {
        self.completions.is_empty()
    }

    pub fn is_completed(&self, candidate_id: Uuid) -> bool {
        self.completions
            .get(&candidate_id)
            .is_some_and(|&count| count > 0)
    }

    /// Number of distinct candidates the subject has completed.
    pub fn completed_count(&self) -> usize {
        self.completions.values().filter(|&&n| n > 0).count()
    }
}

/// Interaction history of the requesting user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BehaviorSnapshot {
    pub views: HashMap<Uuid, u32>,
    pub time_spent_seconds: HashMap<Uuid, u64>,
    pub recent_searches: Vec<String>,
    pub recent_categories: Vec<String>,
    pub recent_instructors: Vec<Uuid>,
    pub learning_pattern: Option<String>,
}

impl BehaviorSnapshot {
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
            && self.time_spent_seconds.is_empty()
            && self.recent_searches.is_empty()
            && self.recent_categories.is_empty()
            && self.recent_instructors.is_empty()
    }
}

/// Request-scoped context supplied by the caller.
///
/// `now` is caller-supplied so the engine stays a pure function of its
/// inputs and repeated calls are reproducible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    pub now: DateTime<Utc>,
    pub session_duration_seconds: u64,
    pub device: Option<DeviceClass>,
    pub recent_actions: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DeviceClass {
    Mobile,
    Desktop,
    Tablet,
}

impl DeviceClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceClass::Mobile => "mobile",
            DeviceClass::Desktop => "desktop",
            DeviceClass::Tablet => "tablet",
        }
    }
}

/// One named, weighted, explained sub-score contributing to an aggregate.
///
/// Factors are pure outputs and are never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Factor {
    pub name: String,
    pub group: FactorGroup,
    pub weight: f32,
    pub score: f32,
    pub reason: String,
}

impl Factor {
    pub fn new(
        name: &str,
        group: FactorGroup,
        weight: f32,
        score: f32,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            name: name.to_string(),
            group,
            weight,
            score: score.clamp(0.0, 1.0),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FactorGroup {
    Profile,
    Behavior,
    Collaborative,
    Contextual,
}

impl FactorGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            FactorGroup::Profile => "profile",
            FactorGroup::Behavior => "behavior",
            FactorGroup::Collaborative => "collaborative",
            FactorGroup::Contextual => "contextual",
        }
    }
}

/// Which signal groups drove a recommendation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RecommendationKind {
    Profile,
    Behavior,
    Collaborative,
    Contextual,
    Hybrid,
}

impl RecommendationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationKind::Profile => "profile",
            RecommendationKind::Behavior => "behavior",
            RecommendationKind::Collaborative => "collaborative",
            RecommendationKind::Contextual => "contextual",
            RecommendationKind::Hybrid => "hybrid",
        }
    }
}

/// A ranked personalization result with its audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredResult {
    pub candidate_id: Uuid,
    /// Weighted mean of factor scores, in [0, 1].
    pub score: f32,
    pub confidence: f32,
    pub factors: Vec<Factor>,
    pub kind: RecommendationKind,
}

/// A field of candidate text that search terms can match against.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SearchField {
    Title,
    Description,
    Body,
    Tags,
}

impl SearchField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchField::Title => "title",
            SearchField::Description => "description",
            SearchField::Body => "body",
            SearchField::Tags => "tags",
        }
    }
}

/// A short excerpt surrounding a matched search term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Highlight {
    pub field: SearchField,
    pub snippet: String,
}

/// A search hit. The relevance number is comparative only: it ranks items
/// within one query execution and is not normalized across queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchMatch {
    pub candidate_id: Uuid,
    pub relevance: f32,
    pub highlights: Vec<Highlight>,
    pub matched_fields: Vec<SearchField>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DurationBucket {
    Short,
    Medium,
    Long,
}

impl DurationBucket {
    /// Bucket boundaries: short <= 30 min, medium <= 2 h, long beyond.
    pub fn of(duration_seconds: u32) -> Self {
        match duration_seconds {
            0..=1800 => DurationBucket::Short,
            1801..=7200 => DurationBucket::Medium,
            _ => DurationBucket::Long,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Map a difficulty estimate on the [0, 1] scale onto a level.
    pub fn from_estimate(estimate: f32) -> Self {
        if estimate >= 0.75 {
            Difficulty::Advanced
        } else if estimate >= 0.45 {
            Difficulty::Intermediate
        } else {
            Difficulty::Beginner
        }
    }
}

/// Per-request counters emitted alongside a recommendation run.
#[derive(Debug, Clone, Default)]
pub struct RecommendStats {
    pub catalog_size: usize,
    pub completed_excluded: usize,
    pub scored: usize,
    pub returned: usize,
}
