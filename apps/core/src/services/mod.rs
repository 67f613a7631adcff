pub mod content_analyzer;
pub mod content_service;
pub mod stats;
pub mod study_material;
pub mod timeout;
pub mod traits;

pub use content_analyzer::ContentAnalyzer;
pub use content_service::ContentAnalysisService;
pub use traits::AnalysisEngine;
