// ============================================
// Contextual Factor Calculator
// ============================================
//
// Session-scoped heuristics: time of day, session length, and device
// class, matched against keyword sets in candidate text. Context factors
// always fire; an unknown device degrades to the 0.5 neutral default.

use super::CandidateText;
use crate::config::FactorWeights;
use crate::models::{DeviceClass, Factor, FactorGroup, SessionContext};
use chrono::Timelike;

/// Session shorter than this is a quick visit.
const SHORT_SESSION_SECONDS: u64 = 300;
/// Session longer than this is a deep-focus block.
const LONG_SESSION_SECONDS: u64 = 1800;

const MORNING_KEYWORDS: [&str; 3] = ["morning", "daily", "routine"];
const AFTERNOON_KEYWORDS: [&str; 3] = ["practical", "hands-on", "workshop"];
const EVENING_KEYWORDS: [&str; 3] = ["evening", "relaxed", "overview"];

const QUICK_KEYWORDS: [&str; 2] = ["quick", "intro"];
const DEEP_KEYWORDS: [&str; 2] = ["advanced", "comprehensive"];

const MOBILE_KEYWORDS: [&str; 3] = ["quick", "short", "bite-sized"];
const TABLET_KEYWORDS: [&str; 3] = ["interactive", "visual", "hands-on"];
const DESKTOP_KEYWORDS: [&str; 3] = ["comprehensive", "project", "deep dive"];

fn daypart_keywords(hour: u32) -> (&'static str, &'static [&'static str]) {
    match hour {
        5..=11 => ("morning", &MORNING_KEYWORDS),
        12..=17 => ("afternoon", &AFTERNOON_KEYWORDS),
        _ => ("evening", &EVENING_KEYWORDS),
    }
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

pub(crate) fn compute(
    weights: &FactorWeights,
    session: &SessionContext,
    text: &CandidateText,
    out: &mut Vec<Factor>,
) {
    let (daypart, keywords) = daypart_keywords(session.now.hour());
    let score = if contains_any(&text.blob, keywords) {
        0.8
    } else {
        0.5
    };
    out.push(Factor::new(
        "time_relevance",
        FactorGroup::Contextual,
        weights.time_relevance,
        score,
        format!("Scored for the {} slot", daypart),
    ));

    let duration = session.session_duration_seconds;
    let (score, reason) = if duration < SHORT_SESSION_SECONDS {
        if contains_any(&text.blob, &QUICK_KEYWORDS) {
            (0.8, "Quick content for a short session")
        } else {
            (0.4, "Short session without quick-format content")
        }
    } else if duration > LONG_SESSION_SECONDS {
        if contains_any(&text.blob, &DEEP_KEYWORDS) {
            (0.8, "In-depth content for a long session")
        } else {
            (0.6, "Long session without in-depth content")
        }
    } else {
        (0.5, "Mid-length session")
    };
    out.push(Factor::new(
        "session_context",
        FactorGroup::Contextual,
        weights.session_context,
        score,
        reason,
    ));

    let score = match session.device {
        Some(DeviceClass::Mobile) => {
            if contains_any(&text.blob, &MOBILE_KEYWORDS) {
                0.8
            } else {
                0.5
            }
        }
        Some(DeviceClass::Tablet) => {
            if contains_any(&text.blob, &TABLET_KEYWORDS) {
                0.8
            } else {
                0.5
            }
        }
        Some(DeviceClass::Desktop) => {
            if contains_any(&text.blob, &DESKTOP_KEYWORDS) {
                0.8
            } else {
                0.5
            }
        }
        None => 0.5,
    };
    let device_label = session
        .device
        .map(|d| d.as_str())
        .unwrap_or("unknown device");
    out.push(Factor::new(
        "device_context",
        FactorGroup::Contextual,
        weights.device_context,
        score,
        format!("Scored for {}", device_label),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn text(content: &str) -> CandidateText {
        CandidateText {
            title_description: content.to_lowercase(),
            blob: content.to_lowercase(),
        }
    }

    fn session(hour: u32, duration: u64, device: Option<DeviceClass>) -> SessionContext {
        SessionContext {
            now: Utc.with_ymd_and_hms(2026, 3, 10, hour, 15, 0).unwrap(),
            session_duration_seconds: duration,
            device,
            recent_actions: Vec::new(),
        }
    }

    fn factor<'a>(factors: &'a [Factor], name: &str) -> &'a Factor {
        factors
            .iter()
            .find(|f| f.name == name)
            .unwrap_or_else(|| panic!("missing factor {}", name))
    }

    #[test]
    fn test_all_three_factors_always_fire() {
        let mut factors = Vec::new();
        compute(
            &FactorWeights::default(),
            &session(10, 600, None),
            &text("Anything"),
            &mut factors,
        );
        assert_eq!(factors.len(), 3);
    }

    #[test]
    fn test_time_relevance_keyword_boost() {
        let weights = FactorWeights::default();

        let mut factors = Vec::new();
        compute(&weights, &session(8, 600, None), &text("Morning Yoga Routine"), &mut factors);
        assert_eq!(factor(&factors, "time_relevance").score, 0.8);

        factors.clear();
        compute(&weights, &session(8, 600, None), &text("Advanced Calculus"), &mut factors);
        assert_eq!(factor(&factors, "time_relevance").score, 0.5);
    }

    #[test]
    fn test_session_context_bands() {
        let weights = FactorWeights::default();

        let mut factors = Vec::new();
        compute(&weights, &session(14, 120, None), &text("Quick Intro to Git"), &mut factors);
        assert_eq!(factor(&factors, "session_context").score, 0.8);

        factors.clear();
        compute(&weights, &session(14, 120, None), &text("Compiler Construction"), &mut factors);
        assert_eq!(factor(&factors, "session_context").score, 0.4);

        factors.clear();
        compute(&weights, &session(14, 3600, None), &text("Comprehensive Rust"), &mut factors);
        assert_eq!(factor(&factors, "session_context").score, 0.8);

        factors.clear();
        compute(&weights, &session(14, 3600, None), &text("Short Stories"), &mut factors);
        assert_eq!(factor(&factors, "session_context").score, 0.6);

        factors.clear();
        compute(&weights, &session(14, 900, None), &text("Anything"), &mut factors);
        assert_eq!(factor(&factors, "session_context").score, 0.5);
    }

    #[test]
    fn test_device_context() {
        let weights = FactorWeights::default();

        let mut factors = Vec::new();
        compute(
            &weights,
            &session(14, 900, Some(DeviceClass::Mobile)),
            &text("Bite-sized Spanish lessons"),
            &mut factors,
        );
        assert_eq!(factor(&factors, "device_context").score, 0.8);

        factors.clear();
        compute(
            &weights,
            &session(14, 900, Some(DeviceClass::Desktop)),
            &text("Capstone project walkthrough"),
            &mut factors,
        );
        assert_eq!(factor(&factors, "device_context").score, 0.8);

        factors.clear();
        compute(&weights, &session(14, 900, None), &text("Anything"), &mut factors);
        assert_eq!(factor(&factors, "device_context").score, 0.5);
    }
}
