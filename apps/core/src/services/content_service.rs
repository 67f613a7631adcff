use chrono::{DateTime, Utc};
use futures::FutureExt;
use std::any::Any;
use std::collections::HashSet;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::brain::HeuristicEngine;
use crate::config::ServiceConfig;
use crate::error::AnalysisError;
use crate::models::{
    ContentAnalysis, ContentInput, Flashcard, LearningPath, Quiz, ServiceStatistics,
};
use crate::services::stats::{Outcome, StatisticsTracker};
use crate::services::study_material;
use crate::services::timeout::TimeoutGuard;
use crate::services::traits::AnalysisEngine;

/// Façade over the analysis engine.
///
/// Owns the configuration, the deadline and the running statistics. None of
/// its operations fail: every failure path is turned into a fallback
/// `ContentAnalysis` with `fallback_used` set and `error` describing why.
pub struct ContentAnalysisService {
    engine: Arc<dyn AnalysisEngine>,
    guard: TimeoutGuard,
    config: ServiceConfig,
    stats: Mutex<StatisticsTracker>,
}

impl Default for ContentAnalysisService {
    fn default() -> Self {
        Self::build(ServiceConfig::default(), Arc::new(HeuristicEngine::default()))
    }
}

impl ContentAnalysisService {
    /// Creates a service backed by the heuristic engine.
    pub fn new(config: ServiceConfig) -> Result<Self, AnalysisError> {
        Self::with_engine(config, Arc::new(HeuristicEngine::default()))
    }

    /// Creates a service backed by an arbitrary engine.
    pub fn with_engine(
        config: ServiceConfig,
        engine: Arc<dyn AnalysisEngine>,
    ) -> Result<Self, AnalysisError> {
        config.validate()?;
        Ok(Self::build(config, engine))
    }

    /// Creates a heuristic-backed service configured from the environment.
    pub fn from_env() -> Result<Self, AnalysisError> {
        Self::new(ServiceConfig::from_env()?)
    }

    fn build(config: ServiceConfig, engine: Arc<dyn AnalysisEngine>) -> Self {
        info!(
            "Content analysis service ready (engine: {}, timeout: {} ms)",
            engine.name(),
            config.timeout_ms
        );
        Self {
            engine,
            guard: TimeoutGuard::new(config.timeout()),
            config,
            stats: Mutex::new(StatisticsTracker::default()),
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    fn stats(&self) -> MutexGuard<'_, StatisticsTracker> {
        self.stats.lock().unwrap_or_else(|poisoned| {
            warn!("Service statistics lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Fallback analysis carrying `error`.
    pub fn fallback_analysis(&self, error: &AnalysisError) -> ContentAnalysis {
        ContentAnalysis::fallback(
            &self.config.fallback_topics,
            self.config.default_study_time,
            error.to_string(),
        )
    }

    /// Classifies `content`, falling back on invalid input, engine failure or timeout.
    ///
    /// Statistics are updated exactly once per call, after the outcome is known.
    #[instrument(skip(self, content))]
    pub async fn analyze_content<'a>(&self, content: impl Into<ContentInput<'a>>) -> ContentAnalysis {
        let start = Instant::now();
        let result = self.run_engine(content.into()).await;

        let (analysis, outcome) = match result {
            Ok(analysis) => (analysis, Outcome::Success),
            Err(err) => {
                warn!(kind = err.kind(), "Content analysis fell back: {}", err);
                (self.fallback_analysis(&err), Outcome::Fallback)
            }
        };

        self.stats().record(outcome, start.elapsed());
        analysis
    }

    async fn run_engine(&self, input: ContentInput<'_>) -> Result<ContentAnalysis, AnalysisError> {
        let content = input.as_text().map_err(AnalysisError::InvalidInput)?;
        if content.trim().is_empty() {
            return Err(AnalysisError::InvalidInput("content is empty".to_string()));
        }

        // A panicking engine is reported as an execution failure.
        let work = AssertUnwindSafe(self.engine.analyze(content))
            .catch_unwind()
            .map(|outcome| outcome.unwrap_or_else(|payload| Err(panic_error(payload))));
        let analysis = self.guard.run(work).await?;
        normalize(analysis)
    }

    pub fn generate_flashcards(&self, analysis: &ContentAnalysis) -> Vec<Flashcard> {
        study_material::generate_flashcards(analysis)
    }

    pub fn generate_quizzes(&self, analysis: &ContentAnalysis) -> Vec<Quiz> {
        study_material::generate_quizzes(analysis)
    }

    pub fn create_learning_path(
        &self,
        analysis: &ContentAnalysis,
        exam_date: DateTime<Utc>,
    ) -> LearningPath {
        study_material::create_learning_path(analysis, exam_date)
    }

    pub fn create_learning_path_at(
        &self,
        analysis: &ContentAnalysis,
        exam_date: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> LearningPath {
        study_material::create_learning_path_at(analysis, exam_date, now)
    }

    /// Snapshot of the counters. Read-only.
    pub fn service_stats(&self) -> ServiceStatistics {
        self.stats().service_statistics()
    }
}

fn panic_error(payload: Box<dyn Any + Send>) -> AnalysisError {
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    AnalysisError::Execution(format!("engine panicked: {}", message))
}

/// Enforces the success-path invariants on whatever the engine returned.
fn normalize(mut analysis: ContentAnalysis) -> Result<ContentAnalysis, AnalysisError> {
    let mut seen = HashSet::new();
    analysis.topics.retain(|t| !t.trim().is_empty() && seen.insert(t.to_lowercase()));

    if analysis.topics.is_empty() {
        return Err(AnalysisError::Execution("engine returned no topics".to_string()));
    }

    analysis.estimated_study_time = analysis.estimated_study_time.max(1);
    analysis.fallback_used = false;
    analysis.error = None;
    Ok(analysis)
}
