//! Text Complexity Scoring.
//!
//! Weighted readability score: average sentence length and average word length,
//! shifted by a base offset for the difficulty reported upstream, then bucketed
//! into low / medium / high by two thresholds.

use serde::{Deserialize, Serialize};

use super::difficulty::TextStats;
use crate::config::ComplexitySettings;
use crate::models::{Complexity, Difficulty};

/// Intermediate values behind a complexity bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplexityMetrics {
    /// Average words per sentence
    pub avg_sentence_length: f64,
    /// Average characters per word
    pub avg_word_length: f64,
    /// Offset contributed by the upstream difficulty
    pub difficulty_offset: f64,
    /// Weighted score before bucketing
    pub score: f64,
    pub bucket: Complexity,
}

/// Complexity scorer for text analysis
pub struct ComplexityScorer {
    settings: ComplexitySettings,
}

impl Default for ComplexityScorer {
    fn default() -> Self {
        Self::new(ComplexitySettings::default())
    }
}

impl ComplexityScorer {
    pub fn new(settings: ComplexitySettings) -> Self {
        Self { settings }
    }

    fn offset_for(&self, difficulty: Difficulty) -> f64 {
        match difficulty {
            Difficulty::Beginner => self.settings.beginner_offset,
            Difficulty::Intermediate => self.settings.intermediate_offset,
            Difficulty::Advanced => self.settings.advanced_offset,
        }
    }

    fn bucket(&self, score: f64) -> Complexity {
        if score < self.settings.low_threshold {
            Complexity::Low
        } else if score < self.settings.high_threshold {
            Complexity::Medium
        } else {
            Complexity::High
        }
    }

    /// Score `text` given the difficulty the service assigned to it.
    pub fn analyze(&self, text: &str, difficulty: Difficulty) -> ComplexityMetrics {
        let stats = TextStats::from_text(text);
        let difficulty_offset = self.offset_for(difficulty);

        let score = stats.avg_sentence_length * self.settings.sentence_weight
            + stats.avg_word_length * self.settings.word_weight
            + difficulty_offset;

        ComplexityMetrics {
            avg_sentence_length: stats.avg_sentence_length,
            avg_word_length: stats.avg_word_length,
            difficulty_offset,
            score,
            bucket: self.bucket(score),
        }
    }

    /// Get just the bucket
    pub fn classify(&self, text: &str, difficulty: Difficulty) -> Complexity {
        self.analyze(text, difficulty).bucket
    }
}
