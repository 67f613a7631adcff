use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

use crate::brain::HeuristicEngine;
use crate::config::ServiceConfig;
use crate::error::AnalysisError;
use crate::models::{ContentAnalysis, Difficulty};
use crate::services::{AnalysisEngine, ContentAnalysisService, ContentAnalyzer};

/// Always rejects with the given message.
pub struct FailingEngine {
    pub message: &'static str,
}

#[async_trait]
impl AnalysisEngine for FailingEngine {
    async fn analyze(&self, _content: &str) -> Result<ContentAnalysis, AnalysisError> {
        Err(AnalysisError::Execution(self.message.to_string()))
    }
}

/// Sleeps longer than any test timeout, then succeeds.
pub struct SlowEngine {
    pub delay: Duration,
    pub completed: Arc<AtomicUsize>,
}

#[async_trait]
impl AnalysisEngine for SlowEngine {
    async fn analyze(&self, content: &str) -> Result<ContentAnalysis, AnalysisError> {
        sleep(self.delay).await;
        self.completed.fetch_add(1, Ordering::SeqCst);
        HeuristicEngine::instant().classify(content)
    }
}

/// Returns a fixed set of topics, ignoring the content.
pub struct FixedEngine {
    pub topics: Vec<&'static str>,
    pub calls: Arc<AtomicUsize>,
}

impl FixedEngine {
    pub fn new(topics: Vec<&'static str>) -> Self {
        Self {
            topics,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl AnalysisEngine for FixedEngine {
    async fn analyze(&self, _content: &str) -> Result<ContentAnalysis, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ContentAnalysis {
            topics: self.topics.iter().map(|t| t.to_string()).collect(),
            difficulty: Difficulty::Beginner,
            estimated_study_time: 20,
            fallback_used: false,
            error: None,
        })
    }
}

pub fn service_with(engine: impl AnalysisEngine) -> Arc<ContentAnalysisService> {
    Arc::new(
        ContentAnalysisService::with_engine(ServiceConfig::default(), Arc::new(engine))
            .expect("default config is valid"),
    )
}

pub fn instant_service() -> Arc<ContentAnalysisService> {
    service_with(HeuristicEngine::instant())
}

pub fn instant_analyzer() -> ContentAnalyzer {
    ContentAnalyzer::new(instant_service())
}
