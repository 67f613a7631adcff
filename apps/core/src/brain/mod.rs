//! # Brain Module
//!
//! Fast, deterministic, rule-based text analysis. No model is involved: every
//! heuristic here is explainable and gives the same answer for the same text.
//!
//! ## Components
//! - `topics`: topic classification using regex keyword sets
//! - `difficulty`: beginner / intermediate / advanced estimation
//! - `engine`: the heuristic `AnalysisEngine` with simulated latency
//! - `structure`: chapter / section / paragraph counts
//! - `complexity`: weighted readability score
//! - `keywords`: academic-vocabulary keyword extraction

pub mod complexity;
pub mod difficulty;
pub mod engine;
pub mod keywords;
pub mod structure;
pub mod topics;

pub use complexity::{ComplexityMetrics, ComplexityScorer};
pub use difficulty::{DifficultyClassifier, TextStats};
pub use engine::{HeuristicEngine, SimulatedLatency};
pub use keywords::KeywordExtractor;
pub use structure::extract_structure;
pub use topics::TopicClassifier;
