//! Tunables for onboarding, diagnostics and the question generator.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::DEFAULT_SKIP_THRESHOLD;

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("skip threshold must be within 0..=100, got {0}")]
    InvalidSkipThreshold(f64),

    #[error("questions per unit must be > 0")]
    ZeroQuestionsPerUnit,

    #[error("minimum questions per unit ({min}) exceeds maximum ({max})")]
    InvalidQuestionRange { min: u32, max: u32 },

    #[error("estimated minutes per question must be positive")]
    InvalidMinutesPerQuestion,
}

/// Onboarding settings. Every field has a default, so a partial TOML file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OnboardingConfig {
    /// Unit score (percent) at or above which the unit may be skipped.
    pub skip_threshold: f64,
    pub min_questions_per_unit: u32,
    pub max_questions_per_unit: u32,
    /// Used by the overview step before any quiz has been generated.
    pub estimated_questions_per_unit: u32,
    pub estimated_minutes_per_question: f64,
}

impl Default for OnboardingConfig {
    fn default() -> Self {
        Self {
            skip_threshold: DEFAULT_SKIP_THRESHOLD,
            min_questions_per_unit: 3,
            max_questions_per_unit: 5,
            estimated_questions_per_unit: 4,
            estimated_minutes_per_question: 1.5,
        }
    }
}

impl OnboardingConfig {
    /// Check ranges and return the config unchanged.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` describing the first invalid field.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if !self.skip_threshold.is_finite() || !(0.0..=100.0).contains(&self.skip_threshold) {
            return Err(ConfigError::InvalidSkipThreshold(self.skip_threshold));
        }
        if self.min_questions_per_unit == 0 || self.estimated_questions_per_unit == 0 {
            return Err(ConfigError::ZeroQuestionsPerUnit);
        }
        if self.min_questions_per_unit > self.max_questions_per_unit {
            return Err(ConfigError::InvalidQuestionRange {
                min: self.min_questions_per_unit,
                max: self.max_questions_per_unit,
            });
        }
        if !self.estimated_minutes_per_question.is_finite()
            || self.estimated_minutes_per_question <= 0.0
        {
            return Err(ConfigError::InvalidMinutesPerQuestion);
        }
        Ok(self)
    }
}
