//! Test Module
//!
//! ## Test Categories
//! - `support`: mock engines shared by the suites below
//! - `brain_tests`: topics, difficulty, structure, complexity, keywords
//! - `service_tests`: fallback paths, timeout, statistics
//! - `analyzer_tests`: post-processing and timing of the analyzer
//! - `study_material_tests`: flashcards, quizzes, learning paths
//! - `text_extract_tests`: file ingestion
//! - `chaos_test`: concurrency and resilience

mod support;

pub mod analyzer_tests;
