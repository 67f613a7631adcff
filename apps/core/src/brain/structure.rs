//! Structural decomposition of markdown-ish text.

use crate::models::DocumentStructure;

enum Line {
    Chapter,
    Section,
    DeepHeading,
    Other,
    Blank,
}

fn classify_line(line: &str) -> Line {
    let trimmed = line.trim_start();
    if trimmed.trim().is_empty() {
        Line::Blank
    } else if trimmed.starts_with("# ") || trimmed == "#" {
        Line::Chapter
    } else if trimmed.starts_with("## ") || trimmed == "##" {
        Line::Section
    } else if trimmed.starts_with("###") && trimmed.trim_start_matches('#').starts_with(' ') {
        // ### and deeper: not counted, and not body text either.
        Line::DeepHeading
    } else {
        Line::Other
    }
}

/// Counts `#` chapters, `##` sections and body paragraphs.
///
/// A paragraph is a blank-line separated block with at least one line that is
/// not a heading. All counts are floored at 1.
pub fn extract_structure(text: &str) -> DocumentStructure {
    let mut chapters = 0;
    let mut sections = 0;
    let mut paragraphs = 0;
    let mut in_paragraph = false;

    for line in text.lines() {
        match classify_line(line) {
            Line::Chapter => chapters += 1,
            Line::Section => sections += 1,
            Line::DeepHeading => {}
            Line::Blank => in_paragraph = false,
            Line::Other => {
                if !in_paragraph {
                    paragraphs += 1;
                    in_paragraph = true;
                }
            }
        }
    }

    DocumentStructure {
        chapters: chapters.max(1),
        sections: sections.max(1),
        paragraphs: paragraphs.max(1),
    }
}
