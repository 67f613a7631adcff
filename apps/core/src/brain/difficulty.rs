//! Difficulty estimation.
//!
//! Rule-based proxy for reading difficulty: long words, long sentences and
//! specialist vocabulary push the score up. Identical text always yields the
//! same label.

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::models::Difficulty;

/// Terms that usually signal advanced material.
const ADVANCED_TERMS: &[&str] = &[
    "theorem",
    "lemma",
    "corollary",
    "derivative",
    "integral",
    "eigenvalue",
    "quantum",
    "thermodynamics",
    "entropy",
    "polymorphism",
    "recursion",
    "asynchronous",
    "concurrency",
    "complexity",
    "hypothesis",
    "methodology",
    "paradigm",
    "stoichiometry",
    "epistemology",
    "macroeconomic",
];

static ADVANCED_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ADVANCED_TERMS.iter().copied().collect());

/// Basic text statistics shared by the difficulty and complexity heuristics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStats {
    pub word_count: usize,
    pub sentence_count: usize,
    pub avg_word_length: f64,
    pub avg_sentence_length: f64,
}

impl TextStats {
    pub fn from_text(text: &str) -> Self {
        let words: Vec<&str> = words(text).collect();
        let word_count = words.len();
        if word_count == 0 {
            return Self {
                word_count: 0,
                sentence_count: 0,
                avg_word_length: 0.0,
                avg_sentence_length: 0.0,
            };
        }

        let sentence_count = count_sentences(text);
        let total_chars: usize = words.iter().map(|w| w.chars().count()).sum();

        Self {
            word_count,
            sentence_count,
            avg_word_length: total_chars as f64 / word_count as f64,
            avg_sentence_length: word_count as f64 / sentence_count as f64,
        }
    }
}

/// Alphanumeric words, punctuation stripped.
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'' && c != '-')
        .map(|w| w.trim_matches(|c: char| c == '\'' || c == '-'))
        .filter(|w| !w.is_empty())
}

/// Sentence count from terminal punctuation, at least 1 for non-empty text.
pub fn count_sentences(text: &str) -> usize {
    let count = text
        .split(['.', '!', '?'])
        .filter(|s| s.chars().any(char::is_alphanumeric))
        .count();
    count.max(1)
}

/// Deterministic difficulty classifier.
#[derive(Debug, Default)]
pub struct DifficultyClassifier;

impl DifficultyClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Raw score; higher is harder.
    pub fn score(&self, text: &str) -> f64 {
        let stats = TextStats::from_text(text);
        if stats.word_count == 0 {
            return 0.0;
        }

        let advanced_hits = words(text)
            .filter(|w| ADVANCED_SET.contains(w.to_lowercase().as_str()))
            .count();
        let advanced_density = advanced_hits as f64 / stats.word_count as f64;

        // Normalised contributions: 7 chars per word and 25 words per sentence
        // count as fully "hard"; 5% specialist terms does too.
        let length_score = (stats.avg_word_length / 7.0).min(1.0);
        let sentence_score = (stats.avg_sentence_length / 25.0).min(1.0);
        let vocabulary_score = (advanced_density / 0.05).min(1.0);

        length_score * 0.35 + sentence_score * 0.30 + vocabulary_score * 0.35
    }

    pub fn classify(&self, text: &str) -> Difficulty {
        let score = self.score(text);
        if score < 0.45 {
            Difficulty::Beginner
        } else if score < 0.70 {
            Difficulty::Intermediate
        } else {
            Difficulty::Advanced
        }
    }
}
