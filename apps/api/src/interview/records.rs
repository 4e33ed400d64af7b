use anyhow::Result;
use serde_json::{json, Value};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::interview::report::InterviewReport;
use crate::interview::session::InterviewSession;
use crate::models::interview::InterviewRecordRow;

/// Persists a finished interview. Append-only: records are never updated.
pub async fn save_interview(
    pool: &PgPool,
    user_id: Option<Uuid>,
    report: &InterviewReport,
    session: &InterviewSession,
) -> Result<Uuid> {
    let id = Uuid::new_v4();
    let scores = serde_json::to_value(report.scores)?;

    sqlx::query(
        r#"
        INSERT INTO interviews
            (id, user_id, role_title, questions, answers, feedback, scores, overall_score, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(&report.role_title)
    .bind(session.questions())
    .bind(session.answers())
    .bind(record_feedback(report))
    .bind(scores)
    .bind(i32::from(report.overall_score))
    .bind(report.interview_date)
    .execute(pool)
    .await?;

    info!(
        "Saved interview {id} ({}, {}/100)",
        report.role_title, report.overall_score
    );
    Ok(id)
}

/// All saved interviews for a user, newest first.
pub async fn list_user_interviews(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<InterviewRecordRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM interviews WHERE user_id = $1 ORDER BY created_at DESC")
        .bind(user_id)
        .fetch_all(pool)
        .await
}

fn record_feedback(report: &InterviewReport) -> Value {
    json!({
        "strengths": report.strengths,
        "improvements": report.improvements,
        "suggestion": report.suggestion,
    })
}
