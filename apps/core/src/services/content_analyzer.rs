//! Content Analyzer - higher-level wrapper used by the ingestion flow.
//!
//! Delegates classification to `ContentAnalysisService`, then derives
//! structure, word count, reading time, complexity and keywords from the raw
//! text, and records how long each stage took.
//!
//! Pipeline per call:
//! 1. Validate the input (missing / non-text short-circuits to a fallback result)
//! 2. Await the service (engine time)
//! 3. Post-process the raw text (post-processing time)
//! 4. Record the total in the rolling history

use futures::future::join_all;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};
use validator::Validate;

use crate::brain::topics::{mentions_programming, PROGRAMMING_TOPIC};
use crate::brain::{extract_structure, ComplexityScorer, KeywordExtractor};
use crate::config::AnalyzerConfig;
use crate::error::AnalysisError;
use crate::models::{
    AnalyzerMetrics, Complexity, ContentAnalysis, ContentAnalysisResult, ContentInput,
    DocumentStructure, PerformanceMetrics,
};
use crate::services::content_service::ContentAnalysisService;
use crate::services::stats::{Outcome, StatisticsTracker};
use crate::text_extract::{self, DocumentKind};

const WORDS_PER_MINUTE: f64 = 200.0;
/// Reading time reported when the content could not be analysed at all.
const FALLBACK_READING_TIME: u32 = 30;

/// Which entry point a call came through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Pdf,
    Text,
}

/// Output of the post-processing stage.
struct Derived {
    topics: Vec<String>,
    structure: DocumentStructure,
    word_count: usize,
    reading_time: u32,
    complexity: Complexity,
    keywords: Vec<String>,
}

pub struct ContentAnalyzer {
    service: Arc<ContentAnalysisService>,
    complexity: ComplexityScorer,
    keywords: KeywordExtractor,
    max_content_chars: usize,
    history: Mutex<StatisticsTracker>,
}

impl ContentAnalyzer {
    pub fn new(service: Arc<ContentAnalysisService>) -> Self {
        Self::build(service, AnalyzerConfig::default())
    }

    pub fn with_config(
        service: Arc<ContentAnalysisService>,
        config: AnalyzerConfig,
    ) -> Result<Self, AnalysisError> {
        config.validate()?;
        Ok(Self::build(service, config))
    }

    fn build(service: Arc<ContentAnalysisService>, config: AnalyzerConfig) -> Self {
        Self {
            service,
            complexity: ComplexityScorer::new(config.complexity.clone()),
            keywords: KeywordExtractor::new(&config.academic_vocabulary, config.max_keywords),
            max_content_chars: config.max_content_chars,
            history: Mutex::new(StatisticsTracker::new(config.history_size)),
        }
    }

    pub fn service(&self) -> &Arc<ContentAnalysisService> {
        &self.service
    }

    fn history(&self) -> MutexGuard<'_, StatisticsTracker> {
        self.history.lock().unwrap_or_else(|poisoned| {
            warn!("Analyzer history lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Analyse text extracted from a PDF.
    pub async fn analyze_pdf_content<'a>(
        &self,
        content: impl Into<ContentInput<'a>>,
    ) -> ContentAnalysisResult {
        self.analyze(content.into(), SourceKind::Pdf).await
    }

    /// Analyse plain text; also tags programming material that the service missed.
    pub async fn analyze_text_content<'a>(
        &self,
        content: impl Into<ContentInput<'a>>,
    ) -> ContentAnalysisResult {
        self.analyze(content.into(), SourceKind::Text).await
    }

    /// Extracts text from an uploaded file and analyses it.
    ///
    /// PDFs go through the PDF entry point, everything else through the text one.
    pub async fn analyze_file(&self, file_name: &str, file_data: &[u8]) -> ContentAnalysisResult {
        let start = Instant::now();
        match text_extract::extract_document(file_name, file_data) {
            Ok(document) => {
                let source = match document.kind {
                    DocumentKind::Pdf => SourceKind::Pdf,
                    _ => SourceKind::Text,
                };
                self.analyze(ContentInput::Text(&document.text), source).await
            }
            Err(err) => {
                warn!("Could not extract text from {}: {}", file_name, err);
                let result = self.fallback_result(&err, PerformanceMetrics::default());
                self.finish(result, Outcome::Fallback, start)
            }
        }
    }

    /// Analyses several texts concurrently, in input order.
    pub async fn analyze_batch(&self, contents: &[String]) -> Vec<ContentAnalysisResult> {
        info!("Analyzing batch of {} documents", contents.len());
        join_all(contents.iter().map(|content| self.analyze_text_content(content))).await
    }

    /// Aggregate timings over the retained history.
    pub fn performance_metrics(&self) -> AnalyzerMetrics {
        self.history().analyzer_metrics()
    }

    #[instrument(skip(self, input))]
    async fn analyze(&self, input: ContentInput<'_>, source: SourceKind) -> ContentAnalysisResult {
        let start = Instant::now();

        let raw = match input.as_text() {
            Ok(text) => text,
            Err(reason) => {
                let err = AnalysisError::InvalidInput(reason);
                warn!("Rejected content before analysis: {}", err);
                let result = self.fallback_result(&err, PerformanceMetrics::default());
                return self.finish(result, Outcome::Fallback, start);
            }
        };

        let normalized;
        let content = match source {
            SourceKind::Pdf => {
                normalized = normalize_pdf_text(raw);
                normalized.as_str()
            }
            SourceKind::Text => raw,
        };

        let engine_start = Instant::now();
        let analysis = self.service.analyze_content(content).await;
        let engine_time = engine_start.elapsed();

        let post_start = Instant::now();
        let derived = self.post_process(content, &analysis, source);
        let post_processing_time = post_start.elapsed();

        let metrics = PerformanceMetrics {
            engine_time: millis(engine_time),
            post_processing_time: millis(post_processing_time),
            total_time: 0.0,
        };

        match derived {
            Ok(derived) => {
                let outcome = if analysis.fallback_used {
                    Outcome::Fallback
                } else {
                    Outcome::Success
                };
                let result = ContentAnalysisResult {
                    analysis: ContentAnalysis {
                        topics: derived.topics,
                        ..analysis
                    },
                    structure: derived.structure,
                    word_count: derived.word_count,
                    reading_time: derived.reading_time,
                    complexity: derived.complexity,
                    keywords: derived.keywords,
                    performance_metrics: metrics,
                };
                self.finish(result, outcome, start)
            }
            Err(err) => {
                warn!(kind = err.kind(), "{}", err);
                let result = self.fallback_result(&err, metrics);
                self.finish(result, Outcome::Fallback, start)
            }
        }
    }

    fn post_process(
        &self,
        content: &str,
        analysis: &ContentAnalysis,
        source: SourceKind,
    ) -> Result<Derived, AnalysisError> {
        let char_count = content.chars().count();
        if char_count > self.max_content_chars {
            return Err(AnalysisError::PostProcessing(format!(
                "content has {} characters, limit is {}",
                char_count, self.max_content_chars
            )));
        }

        let mut topics = analysis.topics.clone();
        if source == SourceKind::Text
            && mentions_programming(content)
            && !topics.iter().any(|t| t.eq_ignore_ascii_case(PROGRAMMING_TOPIC))
        {
            debug!("Adding programming topic missed by the service");
            topics.push(PROGRAMMING_TOPIC.to_string());
        }

        let word_count = content.split_whitespace().count();

        Ok(Derived {
            structure: extract_structure(content),
            word_count,
            reading_time: reading_time(word_count),
            complexity: self.complexity.classify(content, analysis.difficulty),
            keywords: self.keywords.extract(&topics, content),
            topics,
        })
    }

    /// Fallback-shaped result used for invalid input and post-processing failures.
    fn fallback_result(
        &self,
        err: &AnalysisError,
        metrics: PerformanceMetrics,
    ) -> ContentAnalysisResult {
        let analysis = self.service.fallback_analysis(err);
        let keywords = self.keywords.extract(&analysis.topics, "");
        ContentAnalysisResult {
            analysis,
            structure: DocumentStructure::default(),
            word_count: 0,
            reading_time: FALLBACK_READING_TIME,
            complexity: Complexity::Medium,
            keywords,
            performance_metrics: metrics,
        }
    }

    /// Stamps the total time and records the call.
    fn finish(
        &self,
        mut result: ContentAnalysisResult,
        outcome: Outcome,
        start: Instant,
    ) -> ContentAnalysisResult {
        let total = start.elapsed();
        let metrics = &mut result.performance_metrics;
        // Total never reads lower than its parts.
        metrics.total_time = millis(total).max(metrics.engine_time + metrics.post_processing_time);

        self.history().record(outcome, total);
        result
    }
}

/// Minutes to read `word_count` words, rounded up.
pub fn reading_time(word_count: usize) -> u32 {
    (word_count as f64 / WORDS_PER_MINUTE).ceil() as u32
}

/// PDF extraction leaves form feeds between pages and stray carriage returns.
fn normalize_pdf_text(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n").replace('\u{c}', "\n\n")
}

fn millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}
