use serde::Serialize;
use std::io;
use thiserror::Error;

/// Pipeline-wide error type.
///
/// Every public analysis operation absorbs these into data (`fallback_used` +
/// `error`), so they only travel between internal layers. The type is `Clone`
/// and `Serialize` so a failure can be stored verbatim in a result.
#[derive(Debug, Clone, Error, Serialize)]
pub enum AnalysisError {
    /// Content was missing, not text, or blank.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The analysis engine rejected the request. The message is kept verbatim.
    #[error("{0}")]
    Execution(String),

    /// The engine did not answer before the deadline.
    #[error("Analysis timeout: {0}")]
    Timeout(String),

    /// Deriving structure, complexity or keywords failed after the engine answered.
    #[error("Post-processing failed: {0}")]
    PostProcessing(String),

    /// Invalid or unreadable configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Text could not be extracted from an uploaded file.
    #[error("Text extraction failed: {0}")]
    Extraction(String),

    /// Standard input/output errors, flattened to their message.
    #[error("I/O error: {0}")]
    Io(String),
}

impl AnalysisError {
    /// Short machine-readable label, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::InvalidInput(_) => "invalid_input",
            AnalysisError::Execution(_) => "execution_failure",
            AnalysisError::Timeout(_) => "timeout",
            AnalysisError::PostProcessing(_) => "post_processing_failure",
            AnalysisError::Config(_) => "config",
            AnalysisError::Extraction(_) => "extraction",
            AnalysisError::Io(_) => "io",
        }
    }
}

impl From<tokio::time::error::Elapsed> for AnalysisError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        AnalysisError::Timeout(err.to_string())
    }
}

impl From<io::Error> for AnalysisError {
    fn from(err: io::Error) -> Self {
        AnalysisError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        AnalysisError::InvalidInput(format!("JSON error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AnalysisError {
    fn from(err: validator::ValidationErrors) -> Self {
        AnalysisError::Config(format!("Validation errors: {}", err))
    }
}

impl From<chrono::ParseError> for AnalysisError {
    fn from(err: chrono::ParseError) -> Self {
        AnalysisError::InvalidInput(format!("Date parse error: {}", err))
    }
}
