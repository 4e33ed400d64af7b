//! Static payloads used when the LLM is unreachable, errors, or times out.

use crate::interview::feedback::{AnswerEvaluation, FeedbackPayload};
use crate::interview::parser::{ScoreSet, Sentiment, StructuredFeedback};

/// Neutral score used for every field when no evaluation could be obtained.
pub const FALLBACK_SCORE: u8 = 7;

const SOFTWARE_DEVELOPER_ENTRY: &[&str] = &[
    "Tell me about your programming experience and the languages you are most comfortable with.",
    "Explain a project you worked on and the technologies you used.",
    "How do you approach debugging a complex problem?",
    "What development methodologies are you familiar with?",
    "How do you stay updated with the latest technologies and programming practices?",
];

const SOFTWARE_DEVELOPER_MID: &[&str] = &[
    "Describe a challenging technical problem you solved recently.",
    "How do you ensure code quality in your projects?",
    "Explain your experience with version control systems.",
    "Tell me about your experience with code reviews and collaboration.",
    "How do you handle technical disagreements with team members?",
];

const SOFTWARE_DEVELOPER_SENIOR: &[&str] = &[
    "Describe your experience leading development teams or mentoring junior developers.",
    "How do you approach system architecture decisions?",
    "Tell me about a time when you improved a significant aspect of a codebase.",
    "How do you balance technical debt with new feature development?",
    "Explain how you evaluate new technologies for potential adoption.",
];

const PRODUCT_MANAGER_ENTRY: &[&str] = &[
    "What interests you about product management?",
    "How do you understand user needs?",
    "Describe your experience working with development teams.",
    "How do you prioritize features?",
    "Tell me about a product you admire and why.",
];

const DEFAULT_QUESTIONS: &[&str] = &[
    "Tell me about yourself and your background.",
    "Why are you interested in this role?",
    "What are your greatest professional strengths?",
    "What do you consider to be your weaknesses?",
    "Where do you see yourself in 5 years?",
];

/// Static question list for a role; roles without a dedicated list get the default set.
pub fn fallback_questions(role_id: u32) -> Vec<String> {
    let questions = match role_id {
        1 => SOFTWARE_DEVELOPER_ENTRY,
        2 => SOFTWARE_DEVELOPER_MID,
        3 => SOFTWARE_DEVELOPER_SENIOR,
        4 => PRODUCT_MANAGER_ENTRY,
        _ => DEFAULT_QUESTIONS,
    };
    questions.iter().map(|q| q.to_string()).collect()
}

/// Returned for a single answer when the LLM call fails or times out.
pub fn fallback_evaluation() -> AnswerEvaluation {
    AnswerEvaluation {
        scores: ScoreSet::uniform(FALLBACK_SCORE, Sentiment::Neutral),
        feedback: FeedbackPayload::Structured(StructuredFeedback {
            strengths: vec!["Provided an answer to the question".to_string()],
            weaknesses: vec!["Could add more specific details".to_string()],
            suggestion: "Use concrete examples from your experience".to_string(),
        }),
    }
}

/// Returned without calling the LLM when the answer contains no real words.
pub fn invalid_answer_evaluation() -> AnswerEvaluation {
    AnswerEvaluation {
        scores: ScoreSet::uniform(0, Sentiment::Neutral),
        feedback: FeedbackPayload::Structured(StructuredFeedback {
            strengths: vec![],
            weaknesses: vec!["Response contains no valid words or sentences".to_string()],
            suggestion: "Please provide a real answer using proper English words and sentences"
                .to_string(),
        }),
    }
}

/// Analysis used for the final report when it could not be generated.
pub fn fallback_report_analysis() -> AnswerEvaluation {
    AnswerEvaluation {
        scores: ScoreSet::uniform(FALLBACK_SCORE, Sentiment::Neutral),
        feedback: FeedbackPayload::Structured(fallback_report_feedback()),
    }
}

fn fallback_report_feedback() -> StructuredFeedback {
    StructuredFeedback {
        strengths: vec![
            "You participated in the interview process".to_string(),
            "You responded to each question presented".to_string(),
        ],
        weaknesses: vec![
            "Provide more specific examples from your experience".to_string(),
            "Quantify your achievements with metrics or results".to_string(),
        ],
        suggestion: "Practice structuring your answers with the STAR method (Situation, Task, Action, Result) and review each question before your next interview.".to_string(),
    }
}

/// True when no word, once edge punctuation is trimmed, is longer than two
/// characters and purely alphabetic.
pub fn is_gibberish(answer: &str) -> bool {
    !answer
        .split_whitespace()
        .map(|word| word.trim_matches(|c: char| c.is_ascii_punctuation()))
        .any(|word| word.len() > 2 && word.chars().all(|c| c.is_ascii_alphabetic()))
}
