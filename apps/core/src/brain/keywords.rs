//! Keyword extraction against a fixed academic vocabulary.
//!
//! Keywords are the topic tags first, then every vocabulary term present in the
//! text (whole-word, case-insensitive) in vocabulary order. Duplicates are
//! dropped and the list is capped.

use std::collections::HashSet;

/// Keyword extractor over a configurable vocabulary
pub struct KeywordExtractor {
    vocabulary: Vec<String>,
    max_keywords: usize,
}

impl KeywordExtractor {
    pub fn new(vocabulary: &[String], max_keywords: usize) -> Self {
        Self {
            vocabulary: vocabulary.iter().map(|s| s.trim().to_lowercase()).collect(),
            max_keywords,
        }
    }

    /// Tokenize text into lowercase words
    fn tokenize(text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !c.is_alphanumeric() && c != '-' && c != '_')
            .filter(|w| !w.is_empty())
            .map(|s| s.to_string())
            .collect()
    }

    /// Vocabulary terms found in `text`, in vocabulary order.
    pub fn matched_vocabulary(&self, text: &str) -> Vec<String> {
        let tokens = Self::tokenize(text);
        let token_set: HashSet<&str> = tokens.iter().map(String::as_str).collect();
        // Multi-word terms are matched against the normalised token stream.
        let joined = format!(" {} ", tokens.join(" "));

        self.vocabulary
            .iter()
            .filter(|term| {
                if term.contains(' ') {
                    joined.contains(&format!(" {} ", term))
                } else {
                    token_set.contains(term.as_str())
                }
            })
            .cloned()
            .collect()
    }

    /// Topics first, then matched vocabulary; de-duplicated and capped.
    pub fn extract(&self, topics: &[String], text: &str) -> Vec<String> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut keywords = Vec::new();

        let candidates = topics
            .iter()
            .cloned()
            .chain(self.matched_vocabulary(text));

        for candidate in candidates {
            if keywords.len() >= self.max_keywords {
                break;
            }
            if seen.insert(candidate.to_lowercase()) {
                keywords.push(candidate);
            }
        }

        keywords
    }
}
