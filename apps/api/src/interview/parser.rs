//! Response Parser: turns free-form LLM evaluations into a `ScoreSet` and `StructuredFeedback`.
//!
//! The model's output format is requested (see `llm_client::prompts`) but never
//! guaranteed, so parsing is layered: each tier below is a small pure function
//! and the tiers run in a fixed order. A later tier only fills or overrides what
//! earlier tiers left behind. Nothing here returns an error; missing patterns
//! degrade to zeros and empty sections.
//!
//! Score tiers:
//! 1. `<Label>: n/10` for clarity, relevance, confidence, grammar, overall
//! 2. `/5` labels (Communication, Knowledge/Skills, Problem Solving, Overall) rescaled to /10
//! 3. explicit `Overall Score: n/10` overrides overall
//! 4. overall alone is broadcast into clarity/relevance/confidence
//! 5. sub-scores alone are averaged into overall
//! 6. all-zero scores with a `Strengths:` section become 8 across the board
//! 7. hedging phrases force grammar to 2
//!
//! Sentiment is derived independently by phrase matching.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
}

/// Five 0–10 scores plus a sentiment label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSet {
    pub clarity: u8,
    pub relevance: u8,
    pub confidence: u8,
    pub grammar: u8,
    pub overall: u8, // 0 – 10, see overall_percent() for the report scale
    pub sentiment: Sentiment,
}

impl ScoreSet {
    /// Every numeric field set to `value`.
    pub const fn uniform(value: u8, sentiment: Sentiment) -> Self {
        Self {
            clarity: value,
            relevance: value,
            confidence: value,
            grammar: value,
            overall: value,
            sentiment,
        }
    }

    /// Overall score on the 0–100 scale used by final reports.
    pub fn overall_percent(&self) -> u8 {
        self.overall.min(MAX_SCORE) * 10
    }

    fn is_all_zero(&self) -> bool {
        self.clarity == 0
            && self.relevance == 0
            && self.confidence == 0
            && self.grammar == 0
            && self.overall == 0
    }
}

/// Categorized feedback lifted out of the LLM text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredFeedback {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestion: String,
}

impl StructuredFeedback {
    /// True when no section was found at all.
    pub fn is_empty(&self) -> bool {
        self.strengths.is_empty() && self.weaknesses.is_empty() && self.suggestion.is_empty()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Patterns
// ────────────────────────────────────────────────────────────────────────────

const MAX_SCORE: u8 = 10;
/// Score given to every field when the LLM wrote feedback but no usable numbers.
const SUBSTANTIVE_DEFAULT_SCORE: u8 = 8;
const HEDGING_GRAMMAR_SCORE: u8 = 2;

const HEDGING_PHRASES: &[&str] = &[
    "don't know",
    "don’t know",
    "do not know",
    "no idea",
    "not sure",
];

const NEGATIVE_PHRASES: &[&str] = &[
    "very poor",
    "unacceptable",
    "requires significant improvement",
    "lack of preparedness",
    "no knowledge",
];

const POSITIVE_PHRASES: &[&str] = &["good", "excellent", "well done", "strong", "positive"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Metric {
    Clarity,
    Relevance,
    Confidence,
    Grammar,
    Overall,
}

fn metric_pattern(label: &str, scale: u8) -> Regex {
    Regex::new(&format!(
        r"(?i)\b{label}\s*:\s*(\d+(?:\.\d+)?)\s*/\s*{scale}\b"
    ))
    .expect("metric pattern is a valid regex")
}

static PRIMARY_PATTERNS: LazyLock<Vec<(Metric, Regex)>> = LazyLock::new(|| {
    [
        (Metric::Clarity, "clarity"),
        (Metric::Relevance, "relevance"),
        (Metric::Confidence, "confidence"),
        (Metric::Grammar, "grammar"),
        (Metric::Overall, r"overall(?:\s+score)?"),
    ]
    .into_iter()
    .map(|(metric, label)| (metric, metric_pattern(label, 10)))
    .collect()
});

static SECONDARY_PATTERNS: LazyLock<Vec<(Metric, Regex)>> = LazyLock::new(|| {
    [
        (Metric::Clarity, "communication"),
        (Metric::Relevance, r"knowledge(?:\s*(?:/|&|and)\s*skills)?"),
        (Metric::Confidence, r"problem[\s-]+solving"),
        (Metric::Overall, r"overall(?:\s+score)?"),
    ]
    .into_iter()
    .map(|(metric, label)| (metric, metric_pattern(label, 5)))
    .collect()
});

static EXPLICIT_OVERALL: LazyLock<Regex> = LazyLock::new(|| metric_pattern(r"overall\s+score", 10));

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold pattern is a valid regex"));
/// An opening `*` must follow a line start or non-word character and be
/// followed by a non-space, so `* ` bullets are never treated as emphasis.
static ITALIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(^|[^*\w])\*([^*\s][^*\n]*?)\*").expect("italic pattern is a valid regex")
});

static STRENGTHS_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)strengths\s*:").expect("heading pattern is a valid regex"));

static STRENGTHS_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)strengths\s*:(.*?)(?:weaknesses\s*:|areas\s+for\s+improvement\s*:|actionable\s+advice\s*:|recommendations\s*:|\z)",
    )
    .expect("strengths pattern is a valid regex")
});

static WEAKNESSES_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)(?:weaknesses|areas\s+for\s+improvement)\s*:(.*?)(?:actionable\s+advice\s*:|recommendations\s*:|\z)",
    )
    .expect("weaknesses pattern is a valid regex")
});

static ADVICE_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)(?:actionable\s+advice|recommendations)\s*:(.*?)(?:strengths\s*:|weaknesses\s*:|areas\s+for\s+improvement\s*:|\z)",
    )
    .expect("advice pattern is a valid regex")
});

static LIST_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:#{1,6}\s*)?(?:\d+[.)]\s+|[-*•+]\s*)?")
        .expect("list marker pattern is a valid regex")
});

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is a valid regex"));

// ────────────────────────────────────────────────────────────────────────────
// Public entry points
// ────────────────────────────────────────────────────────────────────────────

/// Extracts the five scores and the sentiment from an LLM evaluation.
pub fn parse_scores(text: &str) -> ScoreSet {
    let text = strip_markdown_emphasis(text);

    let raw = extract_primary_scores(&text);
    let raw = fill_from_five_point_scale(&text, raw);
    let raw = apply_overall_override(&text, raw);
    let raw = broadcast_overall(raw);
    let raw = average_missing_overall(raw);

    let scores = raw.finalize(detect_sentiment(&text));
    let scores = apply_substantive_default(&text, scores);
    apply_hedging_penalty(&text, scores)
}

/// Extracts strengths, weaknesses and the single-paragraph suggestion.
pub fn parse_feedback(text: &str) -> StructuredFeedback {
    let text = strip_markdown_emphasis(text);

    StructuredFeedback {
        strengths: section_items(&STRENGTHS_SECTION, &text),
        weaknesses: section_items(&WEAKNESSES_SECTION, &text),
        suggestion: section_paragraph(&ADVICE_SECTION, &text),
    }
}

/// Extracts a deduplicated list of at most `limit` questions from a generated list.
pub fn parse_questions(text: &str, limit: usize) -> Vec<String> {
    let text = strip_markdown_emphasis(text);
    let mut seen = HashSet::new();

    text.lines()
        .filter_map(clean_list_item)
        .filter(|q| !q.ends_with(':'))
        .filter(|q| seen.insert(q.to_lowercase()))
        .take(limit)
        .collect()
}

/// Replaces `**bold**` and `*italic*` with their inner text.
pub fn strip_markdown_emphasis(text: &str) -> String {
    let without_bold = BOLD.replace_all(text, "$1");
    ITALIC.replace_all(&without_bold, "${1}${2}").into_owned()
}

/// Negative phrases win over positive ones; neither means neutral.
/// Matching is case-sensitive, so a capitalised list item such as
/// "Good examples" does not count as praise.
pub fn detect_sentiment(text: &str) -> Sentiment {
    if NEGATIVE_PHRASES.iter().any(|p| text.contains(p)) {
        Sentiment::Negative
    } else if POSITIVE_PHRASES.iter().any(|p| text.contains(p)) {
        Sentiment::Positive
    } else {
        Sentiment::Neutral
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Score tiers
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct RawScores {
    clarity: Option<u8>,
    relevance: Option<u8>,
    confidence: Option<u8>,
    grammar: Option<u8>,
    overall: Option<u8>,
}

impl RawScores {
    fn slot(&mut self, metric: Metric) -> &mut Option<u8> {
        match metric {
            Metric::Clarity => &mut self.clarity,
            Metric::Relevance => &mut self.relevance,
            Metric::Confidence => &mut self.confidence,
            Metric::Grammar => &mut self.grammar,
            Metric::Overall => &mut self.overall,
        }
    }

    fn has_breakdown(&self) -> bool {
        self.clarity.is_some() || self.relevance.is_some() || self.confidence.is_some()
    }

    fn finalize(self, sentiment: Sentiment) -> ScoreSet {
        ScoreSet {
            clarity: self.clarity.unwrap_or(0),
            relevance: self.relevance.unwrap_or(0),
            confidence: self.confidence.unwrap_or(0),
            grammar: self.grammar.unwrap_or(0),
            overall: self.overall.unwrap_or(0),
            sentiment,
        }
    }
}

fn capture_value(pattern: &Regex, text: &str) -> Option<f64> {
    pattern
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

fn to_score(value: f64) -> u8 {
    value.round().clamp(0.0, MAX_SCORE as f64) as u8
}

fn extract_primary_scores(text: &str) -> RawScores {
    let mut raw = RawScores::default();
    for (metric, pattern) in PRIMARY_PATTERNS.iter() {
        *raw.slot(*metric) = capture_value(pattern, text).map(to_score);
    }
    raw
}

fn fill_from_five_point_scale(text: &str, mut raw: RawScores) -> RawScores {
    for (metric, pattern) in SECONDARY_PATTERNS.iter() {
        let slot = raw.slot(*metric);
        if slot.is_none() {
            *slot = capture_value(pattern, text).map(|v| to_score(v / 5.0 * 10.0));
        }
    }
    raw
}

fn apply_overall_override(text: &str, mut raw: RawScores) -> RawScores {
    if let Some(value) = capture_value(&EXPLICIT_OVERALL, text) {
        raw.overall = Some(to_score(value));
    }
    raw
}

fn broadcast_overall(mut raw: RawScores) -> RawScores {
    if let Some(overall) = raw.overall {
        if !raw.has_breakdown() {
            raw.clarity = Some(overall);
            raw.relevance = Some(overall);
            raw.confidence = Some(overall);
        }
    }
    raw
}

fn average_missing_overall(mut raw: RawScores) -> RawScores {
    if raw.overall.is_none() {
        let found: Vec<u8> = [raw.clarity, raw.relevance, raw.confidence]
            .into_iter()
            .flatten()
            .collect();
        if !found.is_empty() {
            let sum: u32 = found.iter().map(|&v| v as u32).sum();
            raw.overall = Some(to_score(sum as f64 / found.len() as f64));
        }
    }
    raw
}

fn apply_substantive_default(text: &str, scores: ScoreSet) -> ScoreSet {
    if scores.is_all_zero() && STRENGTHS_HEADING.is_match(text) {
        ScoreSet::uniform(SUBSTANTIVE_DEFAULT_SCORE, scores.sentiment)
    } else {
        scores
    }
}

fn apply_hedging_penalty(text: &str, mut scores: ScoreSet) -> ScoreSet {
    let lower = text.to_lowercase();
    if HEDGING_PHRASES.iter().any(|p| lower.contains(p)) {
        scores.grammar = HEDGING_GRAMMAR_SCORE;
    }
    scores
}

// ────────────────────────────────────────────────────────────────────────────
// Section helpers
// ────────────────────────────────────────────────────────────────────────────

fn section_body<'t>(pattern: &Regex, text: &'t str) -> Option<&'t str> {
    pattern
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Strips heading hashes and list markers; `None` for lines with no words left.
fn clean_list_item(line: &str) -> Option<String> {
    let trimmed = line.trim();
    let item = LIST_MARKER.replace(trimmed, "");
    let item = item.trim();
    if item.chars().any(|c| c.is_alphanumeric()) {
        Some(item.to_string())
    } else {
        None
    }
}

fn section_items(pattern: &Regex, text: &str) -> Vec<String> {
    section_body(pattern, text)
        .map(|body| body.lines().filter_map(clean_list_item).collect())
        .unwrap_or_default()
}

fn section_paragraph(pattern: &Regex, text: &str) -> String {
    let Some(body) = section_body(pattern, text) else {
        return String::new();
    };
    let joined = body
        .lines()
        .filter_map(clean_list_item)
        .collect::<Vec<_>>()
        .join(" ");
    WHITESPACE_RUN.replace_all(joined.trim(), " ").into_owned()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
