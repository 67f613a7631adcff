//! Deadline wrapper for engine calls.

use std::future::Future;
use std::time::Duration;
use tracing::warn;

use crate::error::AnalysisError;

/// Races a unit of work against a timer.
///
/// On expiry the work future is dropped, so whatever it would have produced
/// later is never observed by the caller.
#[derive(Debug, Clone, Copy)]
pub struct TimeoutGuard {
    timeout: Duration,
}

impl TimeoutGuard {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Runs `work` under the deadline.
    ///
    /// * completes first: its result, unchanged
    /// * fails first: its error, unchanged
    /// * timer first: [`AnalysisError::Timeout`]
    pub async fn run<T, F>(&self, work: F) -> Result<T, AnalysisError>
    where
        F: Future<Output = Result<T, AnalysisError>>,
    {
        match tokio::time::timeout(self.timeout, work).await {
            Ok(result) => result,
            Err(_) => {
                warn!("Analysis exceeded {} ms, abandoning", self.timeout.as_millis());
                Err(AnalysisError::Timeout(format!(
                    "no response within {} ms",
                    self.timeout.as_millis()
                )))
            }
        }
    }
}
