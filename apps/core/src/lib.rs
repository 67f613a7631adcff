//! Content-analysis pipeline for a study planner.
//!
//! `ContentAnalysisService` classifies material (topics, difficulty, study
//! time) through a pluggable `AnalysisEngine`, never failing outward.
//! `ContentAnalyzer` wraps it with structure, readability and keyword
//! extraction. Study aids are derived from the resulting analysis.

pub mod brain;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod text_extract;

pub use config::{AnalyzerConfig, ServiceConfig};
pub use error::AnalysisError;
pub use models::{ContentAnalysis, ContentAnalysisResult, ContentInput};
pub use services::{AnalysisEngine, ContentAnalysisService, ContentAnalyzer};

#[cfg(test)]
mod tests;
