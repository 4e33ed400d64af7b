//! Feedback payloads returned to clients.

use serde::{Deserialize, Serialize};

use crate::interview::parser::{
    parse_feedback, parse_scores, strip_markdown_emphasis, ScoreSet, StructuredFeedback,
};

/// Either the categorized sections the parser found, or the model's text as-is
/// when it produced none of the expected headings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeedbackPayload {
    Structured(StructuredFeedback),
    Raw { text: String },
}

impl FeedbackPayload {
    /// Chooses the variant for an LLM response given its parsed sections.
    pub fn resolve(response: &str, structured: StructuredFeedback) -> Self {
        if structured.is_empty() {
            FeedbackPayload::Raw {
                text: strip_markdown_emphasis(response).trim().to_string(),
            }
        } else {
            FeedbackPayload::Structured(structured)
        }
    }

    pub fn strengths(&self) -> &[String] {
        match self {
            FeedbackPayload::Structured(f) => &f.strengths,
            FeedbackPayload::Raw { .. } => &[],
        }
    }

    pub fn weaknesses(&self) -> &[String] {
        match self {
            FeedbackPayload::Structured(f) => &f.weaknesses,
            FeedbackPayload::Raw { .. } => &[],
        }
    }

    /// The suggestion paragraph, or the whole raw text.
    pub fn summary(&self) -> &str {
        match self {
            FeedbackPayload::Structured(f) => &f.suggestion,
            FeedbackPayload::Raw { text } => text,
        }
    }
}

/// Scores and feedback for a single answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerEvaluation {
    pub scores: ScoreSet,
    pub feedback: FeedbackPayload,
}

impl AnswerEvaluation {
    /// Runs both parser pipelines over an LLM response.
    pub fn from_response(response: &str) -> Self {
        Self {
            scores: parse_scores(response),
            feedback: FeedbackPayload::resolve(response, parse_feedback(response)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::parser::Sentiment;

    #[test]
    fn test_structured_when_sections_found() {
        let eval = AnswerEvaluation::from_response(
            "Clarity: 6/10\nStrengths:\n- Direct\nActionable Advice:\nAdd an example.",
        );
        assert_eq!(eval.scores.clarity, 6);
        assert_eq!(eval.feedback.strengths(), ["Direct".to_string()]);
        assert_eq!(eval.feedback.summary(), "Add an example.");
    }

    #[test]
    fn test_raw_when_no_sections_found() {
        let eval = AnswerEvaluation::from_response("  You rambled a bit, **focus** next time.  ");
        assert_eq!(
            eval.feedback,
            FeedbackPayload::Raw {
                text: "You rambled a bit, focus next time.".to_string()
            }
        );
        assert!(eval.feedback.strengths().is_empty());
        assert_eq!(eval.scores.sentiment, Sentiment::Neutral);
    }

    #[test]
    fn test_payload_serializes_with_kind_tag() {
        let raw = serde_json::to_value(FeedbackPayload::Raw {
            text: "hi".to_string(),
        })
        .unwrap();
        assert_eq!(raw["kind"], "raw");
        assert_eq!(raw["text"], "hi");

        let structured = serde_json::to_value(FeedbackPayload::Structured(StructuredFeedback {
            strengths: vec!["a".to_string()],
            weaknesses: vec![],
            suggestion: String::new(),
        }))
        .unwrap();
        assert_eq!(structured["kind"], "structured");
        assert_eq!(structured["strengths"][0], "a");
    }
}
