// Studyplan CLI Entry Point
// Analyse study material and derive flashcards, quizzes and a learning path.

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use studyplan_core::logging::{init_tracing, LogFormat};
use studyplan_core::models::{
    AnalyzerMetrics, ContentAnalysisResult, Flashcard, LearningPath, Quiz, ServiceStatistics,
};
use studyplan_core::{ContentAnalysisService, ContentAnalyzer, ServiceConfig};

fn parse_exam_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| format!("Invalid date '{}' (expected YYYY-MM-DD): {}", s, e))
}

#[derive(Parser)]
#[command(name = "studyplan")]
#[command(version, about = "Analyse study material and plan revision before an exam")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true, help = "Emit logs as Bunyan JSON")]
    json_logs: bool,

    #[arg(
        long,
        global = true,
        env = "STUDYPLAN_TIMEOUT_MS",
        help = "Deadline for one analysis, in milliseconds"
    )]
    timeout_ms: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse one or more files and print the results as JSON
    Analyze {
        #[arg(required = true, help = "Files to analyse (txt, md, csv, json, pdf, docx)")]
        files: Vec<PathBuf>,
        #[arg(long, help = "Also print service statistics and analyzer timings")]
        stats: bool,
    },

    /// Analyse a file and build flashcards, quizzes and a learning path
    Plan {
        #[arg(help = "File to analyse")]
        file: PathBuf,
        #[arg(long, value_parser = parse_exam_date, help = "Exam date (YYYY-MM-DD)")]
        exam_date: NaiveDate,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeOutput<'a> {
    results: &'a [ContentAnalysisResult],
    #[serde(skip_serializing_if = "Option::is_none")]
    service_stats: Option<ServiceStatistics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    performance: Option<AnalyzerMetrics>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanOutput {
    analysis: ContentAnalysisResult,
    flashcards: Vec<Flashcard>,
    quizzes: Vec<Quiz>,
    learning_path: LearningPath,
}

fn build_analyzer(timeout_ms: Option<u64>) -> Result<ContentAnalyzer> {
    let mut config = ServiceConfig::from_env().context("Invalid service configuration")?;
    if let Some(ms) = timeout_ms {
        config.timeout_ms = ms;
    }
    let service = ContentAnalysisService::new(config).context("Invalid service configuration")?;
    Ok(ContentAnalyzer::new(Arc::new(service)))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

async fn analyze_path(analyzer: &ContentAnalyzer, path: &Path) -> Result<ContentAnalysisResult> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(analyzer.analyze_file(&file_name(path), &bytes).await)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    });

    let analyzer = build_analyzer(cli.timeout_ms)?;

    match cli.command {
        Commands::Analyze { files, stats } => {
            let mut results = Vec::with_capacity(files.len());
            for path in &files {
                results.push(analyze_path(&analyzer, path).await?);
            }
            info!("Analysed {} file(s)", results.len());

            let output = AnalyzeOutput {
                results: &results,
                service_stats: stats.then(|| analyzer.service().service_stats()),
                performance: stats.then(|| analyzer.performance_metrics()),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Plan { file, exam_date } => {
            let result = analyze_path(&analyzer, &file).await?;
            let exam = exam_date.and_time(NaiveTime::MIN).and_utc();

            let service = analyzer.service();
            let output = PlanOutput {
                flashcards: service.generate_flashcards(&result.analysis),
                quizzes: service.generate_quizzes(&result.analysis),
                learning_path: service.create_learning_path(&result.analysis, exam),
                analysis: result,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
