use crate::error::AnalysisError;
use crate::models::ContentAnalysis;
use async_trait::async_trait;

/// Defines the capability interface of an analysis backend.
///
/// `ContentAnalysisService` only talks to this trait. The in-process
/// implementation is `brain::HeuristicEngine`.
#[async_trait]
pub trait AnalysisEngine: Send + Sync + 'static {
    /// Classifies `content` into topics, a difficulty and an estimated study time.
    ///
    /// Implementations may take an arbitrary amount of time; the caller bounds
    /// them with a deadline.
    async fn analyze(&self, content: &str) -> Result<ContentAnalysis, AnalysisError>;

    /// Short identifier used in logs.
    fn name(&self) -> &'static str {
        "engine"
    }
}
