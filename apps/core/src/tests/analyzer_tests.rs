//! ContentAnalyzer Tests
//!
//! Post-processing (structure, word count, complexity, keywords), the two
//! entry points, and per-stage timing.

use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use super::support::{instant_analyzer, instant_service, service_with, FailingEngine, FixedEngine};
use crate::brain::{HeuristicEngine, SimulatedLatency};
use crate::config::{AnalyzerConfig, FALLBACK_TOPICS};
use crate::models::{Complexity, DocumentStructure};
use crate::services::ContentAnalyzer;

const BIOLOGY_NOTES: &str = "# Cell Biology\n\n\
## Membranes\n\n\
Every cell is wrapped in a membrane. The membrane controls what enters.\n\n\
Proteins embedded in the membrane move molecules across it.";

#[cfg(test)]
mod structure_tests {
    use super::*;

    #[tokio::test]
    async fn test_one_chapter_one_section_two_paragraphs() {
        let analyzer = instant_analyzer();
        let result = analyzer.analyze_text_content(BIOLOGY_NOTES).await;
        assert_eq!(
            result.structure,
            DocumentStructure {
                chapters: 1,
                sections: 1,
                paragraphs: 2
            }
        );
    }

    #[tokio::test]
    async fn test_empty_string_floors_at_one() {
        let analyzer = instant_analyzer();
        let result = analyzer.analyze_text_content("").await;
        assert_eq!(result.structure, DocumentStructure::default());
    }

    #[tokio::test]
    async fn test_pdf_page_breaks_become_paragraph_breaks() {
        let analyzer = ContentAnalyzer::new(service_with(FixedEngine::new(vec!["history"])));
        let result = analyzer
            .analyze_pdf_content("The empire grew.\r\nIt fell later.\u{c}A new dynasty rose.")
            .await;

        assert_eq!(result.structure.paragraphs, 2);
        assert_eq!(result.word_count, 10);
    }
}

#[cfg(test)]
mod topic_tests {
    use super::*;

    #[tokio::test]
    async fn test_programming_appended_when_service_misses_it() {
        let analyzer = ContentAnalyzer::new(service_with(FixedEngine::new(vec!["mathematics"])));
        let result = analyzer
            .analyze_text_content("An introduction to programming with matrices.")
            .await;

        assert_eq!(result.analysis.topics, vec!["mathematics", "programming"]);
        assert!(!result.analysis.fallback_used);
    }

    #[tokio::test]
    async fn test_programming_not_duplicated() {
        let analyzer = ContentAnalyzer::new(service_with(FixedEngine::new(vec!["programming"])));
        let result = analyzer.analyze_text_content("Python programming basics").await;
        assert_eq!(result.analysis.topics, vec!["programming"]);
    }

    #[tokio::test]
    async fn test_pdf_entry_does_not_force_programming() {
        let analyzer = ContentAnalyzer::new(service_with(FixedEngine::new(vec!["history"])));
        let result = analyzer.analyze_pdf_content("A history of the Python language").await;
        assert_eq!(result.analysis.topics, vec!["history"]);
    }
}

#[cfg(test)]
mod keyword_tests {
    use super::*;

    #[tokio::test]
    async fn test_topics_then_vocabulary_in_scan_order() {
        let analyzer = ContentAnalyzer::new(service_with(FixedEngine::new(vec!["physics"])));
        let result = analyzer
            .analyze_text_content("This method rests on one concept and a theory.")
            .await;
        assert_eq!(result.keywords, vec!["physics", "theory", "concept", "method"]);
    }

    #[tokio::test]
    async fn test_keywords_capped_at_ten() {
        let analyzer = ContentAnalyzer::new(service_with(FixedEngine::new(vec![
            "mathematics",
            "physics",
            "chemistry",
        ])));
        let text = "theory concept principle analysis method hypothesis experiment \
                    evidence definition theorem proof structure model system process";
        let result = analyzer.analyze_text_content(text).await;

        assert_eq!(
            result.keywords,
            vec![
                "mathematics",
                "physics",
                "chemistry",
                "theory",
                "concept",
                "principle",
                "analysis",
                "method",
                "hypothesis",
                "experiment",
            ]
        );
    }

    #[tokio::test]
    async fn test_appended_programming_topic_leads_vocabulary() {
        let analyzer = ContentAnalyzer::new(service_with(FixedEngine::new(vec![
            "mathematics",
            "physics",
            "chemistry",
        ])));
        let text = "theory concept principle analysis method hypothesis experiment \
                    evidence definition theorem proof function model system process";
        let result = analyzer.analyze_text_content(text).await;

        assert_eq!(result.keywords.len(), 10);
        assert_eq!(
            &result.keywords[..5],
            &["mathematics", "physics", "chemistry", "programming", "theory"]
        );
    }

    #[tokio::test]
    async fn test_keywords_never_exceed_limit() {
        let analyzer = instant_analyzer();
        let inputs = [
            "",
            "theory",
            BIOLOGY_NOTES,
            "algebra physics acid cell python war market poem theory concept principle analysis",
        ];
        for input in inputs {
            let result = analyzer.analyze_text_content(input).await;
            assert!(result.keywords.len() <= 10, "too many keywords for '{}'", input);
        }
    }
}

#[cfg(test)]
mod metrics_tests {
    use super::*;

    #[tokio::test]
    async fn test_word_count_and_reading_time() {
        let analyzer = instant_analyzer();
        let text = "word ".repeat(450);
        let result = analyzer.analyze_text_content(&text).await;
        assert_eq!(result.word_count, 450);
        assert_eq!(result.reading_time, 3);
    }

    #[tokio::test]
    async fn test_complexity_buckets() {
        let analyzer = ContentAnalyzer::new(service_with(FixedEngine::new(vec!["biology"])));
        let result = analyzer.analyze_text_content("Plants turn light into food each day.").await;
        assert_eq!(result.complexity, Complexity::Low);
    }

    #[tokio::test]
    async fn test_stage_timings() {
        let service = service_with(HeuristicEngine::new(SimulatedLatency::fixed(25)));
        let analyzer = ContentAnalyzer::new(service);
        let result = analyzer.analyze_text_content(BIOLOGY_NOTES).await;

        let timings = result.performance_metrics;
        assert!(timings.engine_time >= 25.0);
        assert!(timings.post_processing_time >= 0.0);
        assert!(timings.total_time >= timings.engine_time + timings.post_processing_time);
    }

    #[tokio::test]
    async fn test_performance_metrics_count_every_call() {
        let analyzer = instant_analyzer();
        analyzer.analyze_text_content("Inflation and trade").await;
        analyzer.analyze_pdf_content("Shakespeare wrote poetry").await;
        analyzer.analyze_text_content(None::<&str>).await;

        let metrics = analyzer.performance_metrics();
        assert_eq!(metrics.total_processed, 3);
        assert!(metrics.average_processing_time >= 0.0);
    }

    #[tokio::test]
    async fn test_history_is_bounded() {
        let config = AnalyzerConfig {
            history_size: 2,
            ..AnalyzerConfig::default()
        };
        let analyzer = ContentAnalyzer::with_config(instant_service(), config).unwrap();
        for _ in 0..5 {
            analyzer.analyze_text_content("Gravity and force").await;
        }
        assert_eq!(analyzer.performance_metrics().total_processed, 5);
    }
}

#[cfg(test)]
mod fallback_tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_input_skips_service() {
        let engine = FixedEngine::new(vec!["physics"]);
        let calls = engine.calls.clone();
        let service = service_with(engine);
        let analyzer = ContentAnalyzer::new(service.clone());

        let result = analyzer.analyze_text_content(&json!(17)).await;

        assert!(result.analysis.fallback_used);
        assert!(result.analysis.error.is_some());
        assert_eq!(result.structure, DocumentStructure::default());
        assert_eq!(result.reading_time, 30);
        assert_eq!(result.word_count, 0);
        assert_eq!(result.complexity, Complexity::Medium);
        assert_eq!(result.keywords, FALLBACK_TOPICS);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(service.service_stats().request_count, 0);
    }

    #[tokio::test]
    async fn test_null_pdf_input() {
        let analyzer = instant_analyzer();
        let result = analyzer.analyze_pdf_content(&json!(null)).await;
        assert!(result.analysis.fallback_used);
        assert_eq!(result.analysis.topics, FALLBACK_TOPICS);
    }

    #[tokio::test]
    async fn test_service_failure_still_post_processes() {
        let analyzer = ContentAnalyzer::new(service_with(FailingEngine {
            message: "Service unavailable",
        }));
        let result = analyzer.analyze_text_content(BIOLOGY_NOTES).await;

        assert!(result.analysis.fallback_used);
        assert!(result.analysis.error.as_deref().unwrap().contains("Service unavailable"));
        assert_eq!(result.structure.paragraphs, 2);
        assert!(result.word_count > 0);
    }

    #[tokio::test]
    async fn test_post_processing_failure() {
        let config = AnalyzerConfig {
            max_content_chars: 20,
            ..AnalyzerConfig::default()
        };
        let analyzer = ContentAnalyzer::with_config(
            service_with(FixedEngine::new(vec!["history"])),
            config,
        )
        .unwrap();

        let result = analyzer
            .analyze_text_content("This passage is comfortably longer than twenty characters.")
            .await;

        assert!(result.analysis.fallback_used);
        let error = result.analysis.error.unwrap();
        assert_eq!(error.matches("Post-processing failed").count(), 1);
        assert!(error.contains("limit is 20"));
        assert_eq!(result.structure, DocumentStructure::default());
        assert!(result.performance_metrics.engine_time >= 0.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = AnalyzerConfig {
            max_keywords: 0,
            ..AnalyzerConfig::default()
        };
        assert!(ContentAnalyzer::with_config(instant_service(), config).is_err());
    }
}

#[cfg(test)]
mod entry_point_tests {
    use super::*;

    #[tokio::test]
    async fn test_idempotent_analysis() {
        let analyzer = instant_analyzer();
        let first = analyzer.analyze_text_content(BIOLOGY_NOTES).await;
        let second = analyzer.analyze_text_content(BIOLOGY_NOTES).await;

        assert_eq!(first.analysis.topics, second.analysis.topics);
        assert_eq!(first.structure, second.structure);
        assert_eq!(first.word_count, second.word_count);
        assert_eq!(first.complexity, second.complexity);
        assert_eq!(first.keywords, second.keywords);
    }

    #[tokio::test]
    async fn test_batch_preserves_order() {
        let analyzer = instant_analyzer();
        let docs = vec![
            "The French revolution".to_string(),
            "Acids and atoms".to_string(),
            "Supply and demand".to_string(),
        ];
        let results = analyzer.analyze_batch(&docs).await;

        let first_topics: Vec<&str> = results
            .iter()
            .map(|r| r.analysis.topics[0].as_str())
            .collect();
        assert_eq!(first_topics, vec!["history", "chemistry", "economics"]);
        assert_eq!(analyzer.performance_metrics().total_processed, 3);
        assert_eq!(analyzer.service().service_stats().request_count, 3);
    }

    #[tokio::test]
    async fn test_analyze_markdown_file() {
        let analyzer = instant_analyzer();
        let result = analyzer.analyze_file("notes.md", BIOLOGY_NOTES.as_bytes()).await;
        assert!(!result.analysis.fallback_used);
        assert!(result.analysis.topics.contains(&"biology".to_string()));
        assert_eq!(result.structure.chapters, 1);
    }

    #[tokio::test]
    async fn test_analyze_unsupported_file() {
        let analyzer = instant_analyzer();
        let result = analyzer.analyze_file("archive.bin", b"\x00\x01\x02").await;
        assert!(result.analysis.fallback_used);
        assert!(result.analysis.error.unwrap().contains("Unsupported"));
        assert_eq!(analyzer.performance_metrics().total_processed, 1);
    }

    #[tokio::test]
    async fn test_result_serializes_flat_camel_case() {
        let analyzer = instant_analyzer();
        let result = analyzer.analyze_text_content("Quantum energy levels").await;
        let value = serde_json::to_value(&result).unwrap();

        assert!(value["topics"].is_array());
        assert_eq!(value["fallbackUsed"], json!(false));
        assert!(value["wordCount"].is_u64());
        assert!(value["performanceMetrics"]["engineTime"].is_f64());
        assert!(value.get("error").is_none());
        assert!(value.get("analysis").is_none());
    }

    #[tokio::test]
    async fn test_shared_service_between_analyzers() {
        let service = instant_service();
        let a = ContentAnalyzer::new(Arc::clone(&service));
        let b = ContentAnalyzer::new(Arc::clone(&service));
        a.analyze_text_content("Ecosystem balance").await;
        b.analyze_text_content("Market trade").await;
        assert_eq!(service.service_stats().request_count, 2);
        assert_eq!(a.performance_metrics().total_processed, 1);
    }
}
