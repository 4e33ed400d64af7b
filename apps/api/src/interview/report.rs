//! Final interview report.
//!
//! Scale rule: `scores` stays on 0–10 like every other `ScoreSet`;
//! `overall_score` is the only 0–100 value and is always `scores.overall * 10`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::interview::feedback::AnswerEvaluation;
use crate::interview::parser::ScoreSet;
use crate::interview::session::InterviewSession;

const NO_ANSWER: &str = "No answer provided";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSummary {
    pub number: usize,
    pub question: String,
    pub answer: String,
}

/// Everything the report page and the PDF exporter need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewReport {
    pub role_title: String,
    pub interview_date: DateTime<Utc>,
    pub overall_score: u8, // 0 – 100
    pub scores: ScoreSet,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub suggestion: String,
    pub questions: Vec<QuestionSummary>,
    pub export_file_name: String,
}

impl InterviewReport {
    /// Builds the report from an analysis of the whole transcript.
    ///
    /// When the analysis carries no overall score, the mean of the per-answer
    /// scores recorded in the session is used instead.
    pub fn assemble(
        role_title: &str,
        session: &InterviewSession,
        analysis: &AnswerEvaluation,
        interview_date: DateTime<Utc>,
    ) -> Self {
        let mut scores = analysis.scores;
        if scores.overall == 0 {
            if let Some(avg) = session.average_score() {
                scores.overall = avg;
            }
        }

        Self {
            role_title: role_title.to_string(),
            interview_date,
            overall_score: scores.overall_percent(),
            scores,
            strengths: analysis.feedback.strengths().to_vec(),
            improvements: analysis.feedback.weaknesses().to_vec(),
            suggestion: analysis.feedback.summary().to_string(),
            questions: summarize(session),
            export_file_name: export_file_name(role_title, interview_date),
        }
    }
}

fn summarize(session: &InterviewSession) -> Vec<QuestionSummary> {
    session
        .transcript()
        .enumerate()
        .map(|(i, (question, answer))| QuestionSummary {
            number: i + 1,
            question: question.to_string(),
            answer: answer
                .filter(|a| !a.trim().is_empty())
                .unwrap_or(NO_ANSWER)
                .to_string(),
        })
        .collect()
}

/// `Interview_Report_{role with whitespace runs as _}_{YYYY-MM-DD}.pdf`
pub fn export_file_name(role_title: &str, date: DateTime<Utc>) -> String {
    let role = role_title.split_whitespace().collect::<Vec<_>>().join("_");
    format!("Interview_Report_{role}_{}.pdf", date.format("%Y-%m-%d"))
}
