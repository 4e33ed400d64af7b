use std::sync::Arc;

use sqlx::PgPool;

use crate::interview::coach::InterviewCoach;
use crate::llm_client::CompletionGateway;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Raw gateway for the proxy endpoint. The coach holds its own handle.
    pub llm: Arc<dyn CompletionGateway>,
    pub coach: Arc<InterviewCoach>,
}
