//! Service and analyzer configuration.
//!
//! Defaults are usable as-is. `ServiceConfig::from_env` layers environment
//! variables (and an optional `.env` file) over the defaults, and every
//! constructor path runs `validator` checks before a config is handed out.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tracing::{debug, warn};
use validator::{Validate, ValidationError};

use crate::error::AnalysisError;

pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_STUDY_TIME_MINUTES: u32 = 60;
pub const DEFAULT_MAX_KEYWORDS: usize = 10;
pub const DEFAULT_HISTORY_SIZE: usize = 100;
pub const DEFAULT_MAX_CONTENT_CHARS: usize = 2_000_000;

/// Topics substituted whenever the primary analysis path fails.
pub const FALLBACK_TOPICS: &[&str] = &["general", "study-material"];

/// Vocabulary scanned for keywords after the topic tags.
pub const ACADEMIC_VOCABULARY: &[&str] = &[
    "theory",
    "concept",
    "principle",
    "analysis",
    "method",
    "hypothesis",
    "experiment",
    "evidence",
    "definition",
    "theorem",
    "proof",
    "function",
    "model",
    "system",
    "process",
    "structure",
    "equation",
    "algorithm",
    "research",
    "data",
];

const ENV_TIMEOUT_MS: &str = "STUDYPLAN_TIMEOUT_MS";
const ENV_DEFAULT_STUDY_TIME: &str = "STUDYPLAN_DEFAULT_STUDY_TIME";
const ENV_FALLBACK_TOPICS: &str = "STUDYPLAN_FALLBACK_TOPICS";

/// Construction-time configuration of `ContentAnalysisService`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ServiceConfig {
    /// Deadline for one engine call, in milliseconds.
    #[validate(range(min = 1))]
    pub timeout_ms: u64,
    #[validate(length(min = 1))]
    pub fallback_topics: Vec<String>,
    /// Study time reported by fallback results, in minutes.
    #[validate(range(min = 1))]
    pub default_study_time: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            fallback_topics: FALLBACK_TOPICS.iter().map(|t| t.to_string()).collect(),
            default_study_time: DEFAULT_STUDY_TIME_MINUTES,
        }
    }
}

impl ServiceConfig {
    /// Default configuration with a different deadline.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout_ms: (timeout.as_millis() as u64).max(1),
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Reads overrides from the process environment (and `.env`, if present).
    pub fn from_env() -> Result<Self, AnalysisError> {
        if dotenv::dotenv().is_ok() {
            debug!("Loaded .env file");
        }

        let mut config = Self::default();

        if let Ok(raw) = env::var(ENV_TIMEOUT_MS) {
            config.timeout_ms = raw.trim().parse().map_err(|e| {
                AnalysisError::Config(format!("{} must be an integer: {}", ENV_TIMEOUT_MS, e))
            })?;
        }

        if let Ok(raw) = env::var(ENV_DEFAULT_STUDY_TIME) {
            config.default_study_time = raw.trim().parse().map_err(|e| {
                AnalysisError::Config(format!("{} must be an integer: {}", ENV_DEFAULT_STUDY_TIME, e))
            })?;
        }

        if let Ok(raw) = env::var(ENV_FALLBACK_TOPICS) {
            let topics: Vec<String> = raw
                .split(',')
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect();
            if topics.is_empty() {
                warn!("{} is set but empty, keeping defaults", ENV_FALLBACK_TOPICS);
            } else {
                config.fallback_topics = topics;
            }
        }

        config.validate()?;
        Ok(config)
    }
}

/// Weights and thresholds of the readability score.
///
/// score = avg_sentence_length * sentence_weight
///       + avg_word_length * word_weight
///       + offset(difficulty)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_thresholds"))]
pub struct ComplexitySettings {
    #[validate(range(min = 0.0))]
    pub sentence_weight: f64,
    #[validate(range(min = 0.0))]
    pub word_weight: f64,
    pub beginner_offset: f64,
    pub intermediate_offset: f64,
    pub advanced_offset: f64,
    /// Scores below this are `low`.
    pub low_threshold: f64,
    /// Scores below this (and not low) are `medium`.
    pub high_threshold: f64,
}

impl Default for ComplexitySettings {
    fn default() -> Self {
        Self {
            sentence_weight: 0.5,
            word_weight: 2.0,
            beginner_offset: 0.0,
            intermediate_offset: 5.0,
            advanced_offset: 10.0,
            low_threshold: 15.0,
            high_threshold: 25.0,
        }
    }
}

fn validate_thresholds(settings: &ComplexitySettings) -> Result<(), ValidationError> {
    if settings.low_threshold >= settings.high_threshold {
        return Err(ValidationError::new("low_threshold_not_below_high_threshold"));
    }
    if settings.beginner_offset > settings.intermediate_offset
        || settings.intermediate_offset > settings.advanced_offset
    {
        return Err(ValidationError::new("difficulty_offsets_not_ascending"));
    }
    Ok(())
}

/// Tuning of the post-processing stage of `ContentAnalyzer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AnalyzerConfig {
    #[validate(nested)]
    pub complexity: ComplexitySettings,
    pub academic_vocabulary: Vec<String>,
    #[validate(range(min = 1))]
    pub max_keywords: usize,
    /// Number of processing-time samples kept for the rolling average.
    #[validate(range(min = 1))]
    pub history_size: usize,
    /// Larger inputs fail post-processing.
    #[validate(range(min = 1))]
    pub max_content_chars: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            complexity: ComplexitySettings::default(),
            academic_vocabulary: ACADEMIC_VOCABULARY.iter().map(|t| t.to_string()).collect(),
            max_keywords: DEFAULT_MAX_KEYWORDS,
            history_size: DEFAULT_HISTORY_SIZE,
            max_content_chars: DEFAULT_MAX_CONTENT_CHARS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ServiceConfig::default().validate().is_ok());
        assert!(AnalyzerConfig::default().validate().is_ok());
        assert_eq!(ServiceConfig::default().timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = ServiceConfig {
            timeout_ms: 0,
            ..ServiceConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let mut config = AnalyzerConfig::default();
        config.complexity.low_threshold = 30.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_env_overrides() {
        temp_env::with_vars(
            [
                (ENV_TIMEOUT_MS, Some("250")),
                (ENV_FALLBACK_TOPICS, Some("Revision, Notes")),
                (ENV_DEFAULT_STUDY_TIME, None),
            ],
            || {
                let config = ServiceConfig::from_env().unwrap();
                assert_eq!(config.timeout_ms, 250);
                assert_eq!(config.fallback_topics, vec!["revision", "notes"]);
                assert_eq!(config.default_study_time, DEFAULT_STUDY_TIME_MINUTES);
            },
        );
    }

    #[test]
    fn test_from_env_rejects_garbage() {
        temp_env::with_var(ENV_TIMEOUT_MS, Some("soon"), || {
            let err = ServiceConfig::from_env().unwrap_err();
            assert!(matches!(err, AnalysisError::Config(_)));
        });

        temp_env::with_var(ENV_TIMEOUT_MS, Some("0"), || {
            assert!(ServiceConfig::from_env().is_err());
        });
    }
}
