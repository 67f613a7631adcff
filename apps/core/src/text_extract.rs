//! Text extraction for uploaded study material
//! Supports: TXT, MD, CSV, JSON, PDF, DOCX

use std::path::Path;
use tracing::{info, warn};

use crate::error::AnalysisError;

/// Format the text was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    PlainText,
    Pdf,
    Docx,
}

#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    pub kind: DocumentKind,
    pub text: String,
}

/// Decide the format from the magic bytes first, then from the extension.
///
/// A renamed PDF is still read as a PDF; a `.txt` that is really a zip is rejected.
pub fn detect_kind(file_name: &str, file_data: &[u8]) -> Result<DocumentKind, AnalysisError> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    if let Some(sniffed) = infer::get(file_data) {
        match sniffed.mime_type() {
            "application/pdf" => return Ok(DocumentKind::Pdf),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                return Ok(DocumentKind::Docx)
            }
            // docx is a zip container; trust the extension to tell them apart
            "application/zip" if extension == "docx" => return Ok(DocumentKind::Docx),
            mime if !mime.starts_with("text/") => {
                return Err(AnalysisError::Extraction(format!(
                    "Unsupported content type: {}",
                    mime
                )))
            }
            _ => {}
        }
    }

    match extension.as_str() {
        "txt" | "md" | "csv" | "json" => Ok(DocumentKind::PlainText),
        "pdf" => Ok(DocumentKind::Pdf),
        "docx" => Ok(DocumentKind::Docx),
        _ => Err(AnalysisError::Extraction(format!(
            "Unsupported file extension: {}",
            extension
        ))),
    }
}

/// Whether the file name carries an extension we know how to read.
pub fn is_supported_format(file_name: &str) -> bool {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();
    matches!(extension.as_str(), "txt" | "md" | "csv" | "json" | "pdf" | "docx")
}

/// Extract text content and remember which format it came from.
pub fn extract_document(
    file_name: &str,
    file_data: &[u8],
) -> Result<ExtractedDocument, AnalysisError> {
    let kind = detect_kind(file_name, file_data)?;
    info!("Extracting text from file: {} ({:?})", file_name, kind);

    let text = match kind {
        DocumentKind::PlainText => String::from_utf8(file_data.to_vec())
            .map_err(|e| AnalysisError::Extraction(format!("Invalid UTF-8 content: {}", e)))?,
        DocumentKind::Pdf => extract_pdf_text(file_data)?,
        DocumentKind::Docx => extract_docx_text(file_data)?,
    };

    Ok(ExtractedDocument { kind, text })
}

/// Extract text content from binary file data.
pub fn extract_text_from_file(file_name: &str, file_data: &[u8]) -> Result<String, AnalysisError> {
    extract_document(file_name, file_data).map(|doc| doc.text)
}

fn extract_pdf_text(file_data: &[u8]) -> Result<String, AnalysisError> {
    // pdf-extract panics on some malformed documents instead of returning an error.
    let extracted = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(file_data))
        .map_err(|_| {
            warn!("PDF extraction panicked");
            AnalysisError::Extraction("Failed to extract PDF text: malformed document".to_string())
        })?;

    match extracted {
        Ok(text) => {
            // Page breaks survive as form feeds; the analyzer turns them into blank lines.
            let cleaned = clean_extracted_text(&text);
            info!("PDF extraction successful: {} characters", cleaned.len());
            Ok(cleaned)
        }
        Err(e) => {
            warn!("PDF extraction failed: {}", e);
            Err(AnalysisError::Extraction(format!(
                "Failed to extract PDF text: {}",
                e
            )))
        }
    }
}

fn extract_docx_text(file_data: &[u8]) -> Result<String, AnalysisError> {
    let docx = docx_rs::read_docx(file_data).map_err(|e| {
        warn!("DOCX extraction failed: {}", e);
        AnalysisError::Extraction(format!("Failed to extract DOCX text: {}", e))
    })?;

    let mut paragraphs: Vec<String> = Vec::new();
    for child in docx.document.children {
        if let docx_rs::DocumentChild::Paragraph(para) = child {
            let text: String = para
                .children
                .iter()
                .filter_map(|pc| match pc {
                    docx_rs::ParagraphChild::Run(run) => Some(
                        run.children
                            .iter()
                            .filter_map(|rc| match rc {
                                docx_rs::RunChild::Text(t) => Some(t.text.as_str()),
                                _ => None,
                            })
                            .collect::<String>(),
                    ),
                    _ => None,
                })
                .collect();

            if !text.trim().is_empty() {
                paragraphs.push(text.trim().to_string());
            }
        }
    }

    // Paragraphs stay blank-line separated so structure detection can count them.
    let text = paragraphs.join("\n\n");
    info!("DOCX extraction successful: {} characters", text.len());
    Ok(text)
}

/// Trims each line and collapses runs of blank lines to a single one.
fn clean_extracted_text(text: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    // Only spaces and tabs are trimmed so form feeds between pages survive.
    for line in text.lines().map(|l| l.trim_matches([' ', '\t'])) {
        if line.is_empty() && out.last().map_or(true, |l| l.is_empty()) {
            continue;
        }
        out.push(line);
    }
    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }
    out.join("\n")
}
