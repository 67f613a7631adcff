use std::collections::VecDeque;
use std::time::Duration;

use crate::models::{AnalyzerMetrics, ServiceStatistics};

/// Outcome of one public analysis call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Fallback,
}

/// Running counters with a bounded history of processing times.
///
/// The history behaves like a sliding window: once `capacity` samples are held,
/// recording a new one evicts the oldest.
#[derive(Debug, Clone)]
pub struct StatisticsTracker {
    request_count: u64,
    success_count: u64,
    fallback_count: u64,
    /// Processing times in milliseconds, oldest first.
    processing_times: VecDeque<f64>,
    capacity: usize,
}

impl Default for StatisticsTracker {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_HISTORY_SIZE)
    }
}

impl StatisticsTracker {
    /// Creates an empty tracker keeping at most `capacity` samples.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            request_count: 0,
            success_count: 0,
            fallback_count: 0,
            processing_times: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Records one finished call. Counters and history move together.
    pub fn record(&mut self, outcome: Outcome, elapsed: Duration) {
        self.request_count += 1;
        match outcome {
            Outcome::Success => self.success_count += 1,
            Outcome::Fallback => self.fallback_count += 1,
        }

        if self.processing_times.len() == self.capacity {
            self.processing_times.pop_front();
        }
        self.processing_times.push_back(elapsed.as_secs_f64() * 1000.0);
    }

    pub fn request_count(&self) -> u64 {
        self.request_count
    }

    pub fn history_len(&self) -> usize {
        self.processing_times.len()
    }

    pub fn average_processing_time(&self) -> f64 {
        if self.processing_times.is_empty() {
            return 0.0;
        }
        self.processing_times.iter().sum::<f64>() / self.processing_times.len() as f64
    }

    pub fn last_processing_time(&self) -> f64 {
        self.processing_times.back().copied().unwrap_or(0.0)
    }

    pub fn success_rate(&self) -> f64 {
        ratio(self.success_count, self.request_count)
    }

    pub fn fallback_rate(&self) -> f64 {
        ratio(self.fallback_count, self.request_count)
    }

    pub fn service_statistics(&self) -> ServiceStatistics {
        ServiceStatistics {
            request_count: self.request_count,
            success_count: self.success_count,
            fallback_count: self.fallback_count,
            success_rate: self.success_rate(),
            fallback_rate: self.fallback_rate(),
            average_processing_time: self.average_processing_time(),
        }
    }

    pub fn analyzer_metrics(&self) -> AnalyzerMetrics {
        AnalyzerMetrics {
            average_processing_time: self.average_processing_time(),
            last_processing_time: self.last_processing_time(),
            total_processed: self.request_count,
        }
    }
}

fn ratio(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}
