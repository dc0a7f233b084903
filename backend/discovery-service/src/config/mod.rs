// ============================================
// Engine Configuration
// ============================================
//
// A single named weight table covering every factor the engine can emit,
// plus the field weights used by search matching. Instances are immutable
// once constructed and injected into the engines; alternate tables can be
// supplied for experiments or tests.

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};

/// Fixed per-factor weights. Weights within one group do not need to sum
/// to 1: groups are blended by total-weight-normalized averaging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorWeights {
    // Profile group
    pub interest_match: f32,
    pub education_level: f32,
    pub experience_level: f32,
    pub industry_relevance: f32,
    pub geographic_relevance: f32,

    // Behavior group
    pub completion_pattern: f32,
    pub viewing_pattern: f32,
    pub search_pattern: f32,
    pub time_spent: f32,

    // Collaborative group
    pub similar_users: f32,
    pub popularity: f32,

    // Contextual group
    pub time_relevance: f32,
    pub session_context: f32,
    pub device_context: f32,
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            interest_match: 0.9,
            education_level: 0.6,
            experience_level: 0.6,
            industry_relevance: 0.5,
            geographic_relevance: 0.3,
            completion_pattern: 0.8,
            viewing_pattern: 0.7,
            search_pattern: 0.6,
            time_spent: 0.5,
            similar_users: 0.6,
            popularity: 0.7,
            time_relevance: 0.3,
            session_context: 0.4,
            device_context: 0.3,
        }
    }
}

impl FactorWeights {
    fn all(&self) -> [f32; 14] {
        [
            self.interest_match,
            self.education_level,
            self.experience_level,
            self.industry_relevance,
            self.geographic_relevance,
            self.completion_pattern,
            self.viewing_pattern,
            self.search_pattern,
            self.time_spent,
            self.similar_users,
            self.popularity,
            self.time_relevance,
            self.session_context,
            self.device_context,
        ]
    }
}

/// Weights applied to term occurrences per searchable field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldWeights {
    pub title: f32,
    pub description: f32,
    pub body: f32,
    pub tags: f32,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            title: 3.0,
            description: 2.0,
            body: 1.0,
            tags: 1.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub factors: FactorWeights,
    pub fields: FieldWeights,
    /// Hard cap on the number of suggestions returned per call.
    pub suggestion_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            factors: FactorWeights::default(),
            fields: FieldWeights::default(),
            suggestion_limit: 10,
        }
    }
}

impl EngineConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<()> {
        for weight in self.factors.all() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(EngineError::InvalidConfig(format!(
                    "Factor weights must be finite and non-negative, got {}",
                    weight
                )));
            }
        }

        let fields = [
            self.fields.title,
            self.fields.description,
            self.fields.body,
            self.fields.tags,
        ];
        for weight in fields {
            if !weight.is_finite() || weight < 0.0 {
                return Err(EngineError::InvalidConfig(format!(
                    "Field weights must be finite and non-negative, got {}",
                    weight
                )));
            }
        }

        if self.suggestion_limit == 0 {
            return Err(EngineError::InvalidConfig(
                "Suggestion limit must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut config = EngineConfig::default();
        config.factors.popularity = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nan_field_weight_rejected() {
        let mut config = EngineConfig::default();
        config.fields.title = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_suggestion_limit_rejected() {
        let config = EngineConfig {
            suggestion_limit: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
