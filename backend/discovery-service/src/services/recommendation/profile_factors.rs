// ============================================
// Profile-Based Factor Calculator
// ============================================
//
// Matches subject profile attributes (interests, education, experience,
// industry, location) against candidate text. Each factor is emitted only
// when the corresponding attribute is present on the profile; an absent
// attribute suppresses the factor rather than scoring it zero.

use super::CandidateText;
use crate::config::FactorWeights;
use crate::models::{Factor, FactorGroup, SubjectProfile};
use crate::utils::contains_term;

const ADVANCED_MARKERS: [&str; 3] = ["advanced", "expert", "master"];
const BEGINNER_MARKERS: [&str; 3] = ["beginner", "intro", "basic"];

/// Estimate candidate difficulty on the [0, 1] scale from marker words.
pub(crate) fn estimate_difficulty(text_lower: &str) -> f32 {
    if ADVANCED_MARKERS.iter().any(|m| text_lower.contains(m)) {
        0.9
    } else if text_lower.contains("intermediate") {
        0.6
    } else if BEGINNER_MARKERS.iter().any(|m| text_lower.contains(m)) {
        0.3
    } else {
        0.5
    }
}

/// Fixed keyword sets per industry. Unknown industries have no set and
/// suppress the industry factor.
fn industry_keywords(industry: &str) -> Option<&'static [&'static str]> {
    match industry {
        "technology" | "tech" | "software" => Some(&[
            "software",
            "programming",
            "developer",
            "cloud",
            "data",
        ]),
        "finance" | "banking" => Some(&[
            "finance",
            "accounting",
            "investment",
            "trading",
            "economics",
        ]),
        "healthcare" | "medical" => {
            Some(&["health", "medical", "clinical", "patient", "nursing"])
        }
        "marketing" | "advertising" => {
            Some(&["marketing", "branding", "seo", "advertising", "analytics"])
        }
        "education" | "teaching" => Some(&[
            "teaching",
            "curriculum",
            "pedagogy",
            "classroom",
            "learning",
        ]),
        "design" => Some(&["design", "ux", "typography", "illustration", "figma"]),
        _ => None,
    }
}

pub(crate) fn compute(
    weights: &FactorWeights,
    profile: &SubjectProfile,
    text: &CandidateText,
    out: &mut Vec<Factor>,
) {
    if !profile.interests.is_empty() {
        let matched = profile
            .interests
            .iter()
            .filter(|interest| contains_term(&text.title_description, interest))
            .count();
        let total = profile.interests.len();
        out.push(Factor::new(
            "interest_match",
            FactorGroup::Profile,
            weights.interest_match,
            matched as f32 / total as f32,
            format!("{} of {} interests matched", matched, total),
        ));
    }

    let difficulty = estimate_difficulty(&text.blob);

    if let Some(level) = profile.education_level {
        let score = 1.0 - (difficulty - level.weight()).abs();
        out.push(Factor::new(
            "education_level",
            FactorGroup::Profile,
            weights.education_level,
            score,
            format!(
                "Estimated difficulty {:.1} against education weight {:.2}",
                difficulty,
                level.weight()
            ),
        ));
    }

    if let Some(level) = profile.experience_level {
        let score = 1.0 - (difficulty - level.weight()).abs();
        out.push(Factor::new(
            "experience_level",
            FactorGroup::Profile,
            weights.experience_level,
            score,
            format!(
                "Estimated difficulty {:.1} against experience weight {:.2}",
                difficulty,
                level.weight()
            ),
        ));
    }

    if let Some(industry) = &profile.industry {
        if let Some(keywords) = industry_keywords(&industry.to_lowercase()) {
            let found = keywords.iter().filter(|k| text.blob.contains(*k)).count();
            out.push(Factor::new(
                "industry_relevance",
                FactorGroup::Profile,
                weights.industry_relevance,
                found as f32 / keywords.len() as f32,
                format!("{} of {} {} keywords present", found, keywords.len(), industry),
            ));
        }
    }

    if let Some(location) = &profile.location {
        let (score, reason) = if text.blob.contains(&location.city.to_lowercase()) {
            (0.9, format!("Mentions city {}", location.city))
        } else if text.blob.contains(&location.country.to_lowercase()) {
            (0.8, format!("Mentions country {}", location.country))
        } else {
            (0.3, "No geographic overlap".to_string())
        };
        out.push(Factor::new(
            "geographic_relevance",
            FactorGroup::Profile,
            weights.geographic_relevance,
            score,
            reason,
        ));
    }
}
