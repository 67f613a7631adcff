//! Heuristic analysis engine.
//!
//! Stands in for a remote AI call: sleeps for a bounded random delay, then
//! classifies the text with the deterministic rules of this module's siblings.
//! Apart from the delay, identical input gives identical output.

use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;
use tracing::debug;

use super::difficulty::{DifficultyClassifier, TextStats};
use super::topics::TopicClassifier;
use crate::error::AnalysisError;
use crate::models::{ContentAnalysis, Difficulty};
use crate::services::traits::AnalysisEngine;

/// Words per study "unit" before the difficulty factor is applied.
const WORDS_PER_UNIT: f64 = 50.0;
/// Extra minutes for every topic beyond the first.
const MINUTES_PER_EXTRA_TOPIC: u32 = 10;
const MIN_STUDY_MINUTES: u32 = 5;

/// Bounds of the artificial processing delay, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedLatency {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl Default for SimulatedLatency {
    fn default() -> Self {
        Self {
            min_ms: 50,
            max_ms: 250,
        }
    }
}

impl SimulatedLatency {
    pub fn none() -> Self {
        Self { min_ms: 0, max_ms: 0 }
    }

    pub fn fixed(ms: u64) -> Self {
        Self { min_ms: ms, max_ms: ms }
    }

    fn sample(&self) -> Duration {
        if self.max_ms <= self.min_ms {
            return Duration::from_millis(self.min_ms);
        }
        Duration::from_millis(rand::thread_rng().gen_range(self.min_ms..=self.max_ms))
    }
}

/// Estimated study minutes for `word_count` words across `topic_count` topics.
pub fn estimate_study_time(word_count: usize, difficulty: Difficulty, topic_count: usize) -> u32 {
    let factor = match difficulty {
        Difficulty::Beginner => 1.0,
        Difficulty::Intermediate => 1.5,
        Difficulty::Advanced => 2.0,
    };
    let base = (word_count as f64 / WORDS_PER_UNIT * factor).ceil() as u32;
    let extra = topic_count.saturating_sub(1) as u32 * MINUTES_PER_EXTRA_TOPIC;
    (base + extra).max(MIN_STUDY_MINUTES)
}

/// Rule-based engine with simulated latency.
pub struct HeuristicEngine {
    topics: TopicClassifier,
    difficulty: DifficultyClassifier,
    latency: SimulatedLatency,
}

impl Default for HeuristicEngine {
    fn default() -> Self {
        Self::new(SimulatedLatency::default())
    }
}

impl HeuristicEngine {
    pub fn new(latency: SimulatedLatency) -> Self {
        Self {
            topics: TopicClassifier::new(),
            difficulty: DifficultyClassifier::new(),
            latency,
        }
    }

    /// Engine without artificial delay.
    pub fn instant() -> Self {
        Self::new(SimulatedLatency::none())
    }

    /// The synchronous classification step, without the delay.
    pub fn classify(&self, content: &str) -> Result<ContentAnalysis, AnalysisError> {
        if content.trim().is_empty() {
            return Err(AnalysisError::InvalidInput("content is empty".to_string()));
        }

        let topics = self.topics.classify(content);
        let difficulty = self.difficulty.classify(content);
        let stats = TextStats::from_text(content);
        let estimated_study_time = estimate_study_time(stats.word_count, difficulty, topics.len());

        Ok(ContentAnalysis {
            topics,
            difficulty,
            estimated_study_time,
            fallback_used: false,
            error: None,
        })
    }
}

#[async_trait]
impl AnalysisEngine for HeuristicEngine {
    async fn analyze(&self, content: &str) -> Result<ContentAnalysis, AnalysisError> {
        let delay = self.latency.sample();
        debug!("Simulated engine latency: {:?}", delay);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.classify(content)
    }

    fn name(&self) -> &'static str {
        "heuristic"
    }
}
