use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Difficulty label attached to analysed content and everything generated from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Readability bucket computed by the content analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

/// Raw content handed to the pipeline by a caller.
///
/// Callers at the UI boundary deal in loosely typed values, so "missing" and
/// "not text" are representable and routed to the fallback path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentInput<'a> {
    Text(&'a str),
    Missing,
    NotText(&'static str),
}

impl<'a> ContentInput<'a> {
    /// Returns the text, or a description of why there is none.
    pub fn as_text(&self) -> Result<&'a str, String> {
        match self {
            ContentInput::Text(text) => Ok(text),
            ContentInput::Missing => Err("content is missing".to_string()),
            ContentInput::NotText(kind) => Err(format!("content must be a string, got {}", kind)),
        }
    }
}

impl<'a> From<&'a str> for ContentInput<'a> {
    fn from(text: &'a str) -> Self {
        ContentInput::Text(text)
    }
}

impl<'a> From<&'a String> for ContentInput<'a> {
    fn from(text: &'a String) -> Self {
        ContentInput::Text(text.as_str())
    }
}

impl<'a> From<Option<&'a str>> for ContentInput<'a> {
    fn from(text: Option<&'a str>) -> Self {
        text.map_or(ContentInput::Missing, ContentInput::Text)
    }
}

impl<'a> From<&'a serde_json::Value> for ContentInput<'a> {
    fn from(value: &'a serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::String(text) => ContentInput::Text(text.as_str()),
            Value::Null => ContentInput::Missing,
            Value::Bool(_) => ContentInput::NotText("boolean"),
            Value::Number(_) => ContentInput::NotText("number"),
            Value::Array(_) => ContentInput::NotText("array"),
            Value::Object(_) => ContentInput::NotText("object"),
        }
    }
}

/// Classification produced by the analysis service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentAnalysis {
    /// Subject tags in discovery order, never empty.
    pub topics: Vec<String>,
    pub difficulty: Difficulty,
    /// Minutes.
    pub estimated_study_time: u32,
    pub fallback_used: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ContentAnalysis {
    /// A degraded but usable analysis carrying the failure description.
    pub fn fallback(topics: &[String], estimated_study_time: u32, error: impl Into<String>) -> Self {
        Self {
            topics: topics.to_vec(),
            difficulty: Difficulty::Intermediate,
            estimated_study_time: estimated_study_time.max(1),
            fallback_used: true,
            error: Some(error.into()),
        }
    }
}

/// Chapter/section/paragraph counts, each floored at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStructure {
    pub chapters: usize,
    pub sections: usize,
    pub paragraphs: usize,
}

impl Default for DocumentStructure {
    fn default() -> Self {
        Self {
            chapters: 1,
            sections: 1,
            paragraphs: 1,
        }
    }
}

/// Per-call timings in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub engine_time: f64,
    pub post_processing_time: f64,
    pub total_time: f64,
}

/// Full output of the content analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentAnalysisResult {
    #[serde(flatten)]
    pub analysis: ContentAnalysis,
    pub structure: DocumentStructure,
    pub word_count: usize,
    /// Minutes at 200 words per minute.
    pub reading_time: u32,
    pub complexity: Complexity,
    pub keywords: Vec<String>,
    pub performance_metrics: PerformanceMetrics,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub id: Uuid,
    pub topic: String,
    pub front: String,
    pub back: String,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: Uuid,
    pub topic: String,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub difficulty: Difficulty,
}

/// A checkpoint in a learning path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    /// Day offset from the plan's creation, 1-based.
    pub day: i64,
    pub date: NaiveDate,
    pub title: String,
    pub topics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPath {
    pub exam_date: DateTime<Utc>,
    pub days_until_exam: i64,
    /// Minutes across the whole plan.
    pub total_study_time: u32,
    /// Minutes per day.
    pub daily_study_time: u32,
    pub milestones: Vec<Milestone>,
}

/// Snapshot of the service's running counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatistics {
    pub request_count: u64,
    pub success_count: u64,
    pub fallback_count: u64,
    pub success_rate: f64,
    pub fallback_rate: f64,
    /// Mean of the retained processing times, in milliseconds.
    pub average_processing_time: f64,
}

/// Aggregate timings exposed by the content analyzer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzerMetrics {
    pub average_processing_time: f64,
    pub last_processing_time: f64,
    pub total_processed: u64,
}
