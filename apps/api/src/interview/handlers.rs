use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::feedback::AnswerEvaluation;
use crate::interview::records::{list_user_interviews, save_interview};
use crate::interview::report::InterviewReport;
use crate::interview::resume::extract_resume_text;
use crate::interview::roles::{find_role, JobRole, JOB_ROLES};
use crate::interview::session::InterviewSession;
use crate::llm_client::LlmError;
use crate::models::interview::InterviewRecordRow;
use crate::state::AppState;

fn require_role(role_id: u32) -> Result<&'static JobRole, AppError> {
    find_role(role_id).ok_or_else(|| AppError::NotFound(format!("Job role {role_id} not found")))
}

fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// GET /api/v1/roles
pub async fn handle_list_roles() -> Json<&'static [JobRole]> {
    Json(JOB_ROLES)
}

#[derive(Deserialize)]
pub struct QuestionsRequest {
    pub role_id: u32,
    pub resume_text: Option<String>,
}

#[derive(Serialize)]
pub struct QuestionsResponse {
    pub role_title: String,
    pub questions: Vec<String>,
}

/// POST /api/v1/interviews/questions
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    Json(req): Json<QuestionsRequest>,
) -> Result<Json<QuestionsResponse>, AppError> {
    let role = require_role(req.role_id)?;
    let resume = req.resume_text.as_deref().filter(|r| !r.trim().is_empty());
    let questions = state.coach.generate_questions(role, resume).await;
    Ok(Json(QuestionsResponse {
        role_title: role.display_title(),
        questions,
    }))
}

#[derive(Deserialize)]
pub struct FeedbackRequest {
    pub role_id: u32,
    pub question: String,
    pub answer: String,
}

/// POST /api/v1/interviews/feedback
pub async fn handle_answer_feedback(
    State(state): State<AppState>,
    Json(req): Json<FeedbackRequest>,
) -> Result<Json<AnswerEvaluation>, AppError> {
    let role = require_role(req.role_id)?;
    require_text("question", &req.question)?;
    require_text("answer", &req.answer)?;

    let evaluation = state
        .coach
        .evaluate_answer(role, req.question.trim(), req.answer.trim())
        .await;
    Ok(Json(evaluation))
}

#[derive(Deserialize)]
pub struct ReportRequest {
    pub role_id: u32,
    pub questions: Vec<String>,
    pub answers: Vec<String>,
    /// Per-answer overall scores (0–10), parallel to `answers`.
    #[serde(default)]
    pub scores: Vec<u8>,
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub save: bool,
}

#[derive(Serialize)]
pub struct ReportResponse {
    pub report: InterviewReport,
    pub record_id: Option<Uuid>,
}

/// POST /api/v1/interviews/report
pub async fn handle_final_report(
    State(state): State<AppState>,
    Json(req): Json<ReportRequest>,
) -> Result<Json<ReportResponse>, AppError> {
    let role = require_role(req.role_id)?;
    let session =
        InterviewSession::from_parts(req.role_id, req.questions, req.answers, req.scores)?;

    let report = state.coach.generate_report(role, &session).await;

    let record_id = if req.save {
        match save_interview(&state.db, req.user_id, &report, &session).await {
            Ok(id) => Some(id),
            Err(e) => {
                warn!("Failed to save interview for role {}: {e:#}", role.id);
                None
            }
        }
    } else {
        None
    };

    Ok(Json(ReportResponse { report, record_id }))
}

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

/// GET /api/v1/interviews
pub async fn handle_list_interviews(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<InterviewRecordRow>>, AppError> {
    let records = list_user_interviews(&state.db, params.user_id).await?;
    Ok(Json(records))
}

#[derive(Serialize)]
pub struct ResumeTextResponse {
    pub text: String,
    pub characters: usize,
}

/// POST /api/v1/resumes/extract
pub async fn handle_extract_resume(
    mut multipart: Multipart,
) -> Result<Json<ResumeTextResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")))?;

        // PDF parsing is CPU-bound
        let text = tokio::task::spawn_blocking(move || {
            extract_resume_text(file_name.as_deref(), content_type.as_deref(), &bytes)
        })
        .await
        .map_err(anyhow::Error::from)??;

        info!("Resume extracted: {} characters", text.chars().count());
        return Ok(Json(ResumeTextResponse {
            characters: text.chars().count(),
            text,
        }));
    }

    Err(AppError::Validation("Missing 'file' field".to_string()))
}

#[derive(Deserialize)]
pub struct ProxyRequest {
    #[serde(default)]
    pub prompt: String,
}

#[derive(Serialize)]
pub struct ProxyResponse {
    pub result: String,
}

/// POST /api/geminiProxy
///
/// Raw pass-through: no parsing, no caching, no fallback.
/// An empty completion is relayed as `""` rather than treated as a failure.
pub async fn handle_gemini_proxy(
    State(state): State<AppState>,
    Json(req): Json<ProxyRequest>,
) -> Result<Json<ProxyResponse>, AppError> {
    require_text("prompt", &req.prompt)?;
    let result = match state.llm.complete(&req.prompt).await {
        Ok(text) => text,
        Err(LlmError::EmptyContent) => String::new(),
        Err(e) => return Err(AppError::Llm(e.to_string())),
    };
    Ok(Json(ProxyResponse { result }))
}
