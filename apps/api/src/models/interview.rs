use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterviewRecordRow {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub role_title: String,
    pub questions: Vec<String>,
    pub answers: Vec<String>,
    /// `{strengths, improvements, suggestion}`
    pub feedback: Value,
    /// `ScoreSet` on the 0–10 scale.
    pub scores: Value,
    pub overall_score: i32, // 0 – 100
    pub created_at: DateTime<Utc>,
}
