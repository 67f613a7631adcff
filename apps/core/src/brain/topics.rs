//! Topic classification using regex keyword sets.
//!
//! Each subject area has a compiled pattern; a topic is reported when its
//! pattern matches anywhere in the text. Topics come out in discovery order,
//! i.e. sorted by the byte offset of their first match.

use regex::Regex;
use std::sync::LazyLock;

/// Topic emitted when nothing matched.
pub const GENERIC_TOPIC: &str = "document";

/// Topic forced in by the text entry point when programming vocabulary shows up.
pub const PROGRAMMING_TOPIC: &str = "programming";

struct TopicPattern {
    topic: &'static str,
    pattern: Regex,
}

// NOTE: expect() is fine here, the patterns are static and covered by tests.
static TOPIC_PATTERNS: LazyLock<Vec<TopicPattern>> = LazyLock::new(|| {
    vec![
        TopicPattern {
            topic: "mathematics",
            pattern: Regex::new(
                r"(?i)\b(math|maths|mathematics|mathematical|algebra|calculus|geometry|equation|equations|theorem|derivative|integral|matrix|probability|statistics)\b",
            )
            .expect("Invalid regex: mathematics"),
        },
        TopicPattern {
            topic: "physics",
            pattern: Regex::new(
                r"(?i)\b(physics|force|forces|energy|velocity|acceleration|momentum|gravity|quantum|thermodynamics|electromagnetic|newton)\b",
            )
            .expect("Invalid regex: physics"),
        },
        TopicPattern {
            topic: "chemistry",
            pattern: Regex::new(
                r"(?i)\b(chemistry|chemical|molecule|molecules|atom|atoms|reaction|compound|periodic table|acid|oxidation)\b",
            )
            .expect("Invalid regex: chemistry"),
        },
        TopicPattern {
            topic: "biology",
            pattern: Regex::new(
                r"(?i)\b(biology|cell|cells|organism|organisms|evolution|dna|gene|genes|protein|photosynthesis|ecosystem)\b",
            )
            .expect("Invalid regex: biology"),
        },
        TopicPattern {
            topic: PROGRAMMING_TOPIC,
            pattern: PROGRAMMING_PATTERN.clone(),
        },
        TopicPattern {
            topic: "history",
            pattern: Regex::new(
                r"(?i)\b(history|historical|century|empire|revolution|war|dynasty|civilization|medieval|ancient)\b",
            )
            .expect("Invalid regex: history"),
        },
        TopicPattern {
            topic: "economics",
            pattern: Regex::new(
                r"(?i)\b(economics|economy|market|markets|inflation|supply|demand|gdp|trade|finance|monetary)\b",
            )
            .expect("Invalid regex: economics"),
        },
        TopicPattern {
            topic: "literature",
            pattern: Regex::new(
                r"(?i)\b(literature|novel|poem|poetry|author|narrative|metaphor|prose|shakespeare|literary)\b",
            )
            .expect("Invalid regex: literature"),
        },
    ]
});

static PROGRAMMING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(programming|program|code|coding|function|functions|variable|variables|algorithm|algorithms|software|compiler|javascript|typescript|python|rust|java|loop|recursion)\b",
    )
    .expect("Invalid regex: programming")
});

/// True when the text contains recognisable programming vocabulary.
pub fn mentions_programming(text: &str) -> bool {
    PROGRAMMING_PATTERN.is_match(text)
}

/// Keyword-set topic classifier.
pub struct TopicClassifier {
    patterns: &'static [TopicPattern],
}

impl Default for TopicClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl TopicClassifier {
    pub fn new() -> Self {
        Self {
            patterns: TOPIC_PATTERNS.as_slice(),
        }
    }

    /// Topics present in `text`, ordered by first occurrence.
    ///
    /// Never empty: falls back to [`GENERIC_TOPIC`].
    pub fn classify(&self, text: &str) -> Vec<String> {
        let mut found: Vec<(usize, usize, &'static str)> = self
            .patterns
            .iter()
            .enumerate()
            .filter_map(|(rank, group)| group.pattern.find(text).map(|m| (m.start(), rank, group.topic)))
            .collect();

        if found.is_empty() {
            return vec![GENERIC_TOPIC.to_string()];
        }

        // Rank breaks ties when two sets match at the same offset.
        found.sort_by_key(|(start, rank, _)| (*start, *rank));
        found.into_iter().map(|(_, _, topic)| topic.to_string()).collect()
    }
}
