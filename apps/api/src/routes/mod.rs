pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::interview::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/roles", get(handlers::handle_list_roles))
        // Interview pipeline
        .route(
            "/api/v1/interviews/questions",
            post(handlers::handle_generate_questions),
        )
        .route(
            "/api/v1/interviews/feedback",
            post(handlers::handle_answer_feedback),
        )
        .route(
            "/api/v1/interviews/report",
            post(handlers::handle_final_report),
        )
        .route("/api/v1/interviews", get(handlers::handle_list_interviews))
        .route(
            "/api/v1/resumes/extract",
            post(handlers::handle_extract_resume),
        )
        // Raw pass-through kept at the path existing clients call
        .route("/api/geminiProxy", post(handlers::handle_gemini_proxy))
        .with_state(state)
}
