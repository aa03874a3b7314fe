//! Axum route handlers for the two composers.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::resume::{ResumeFields, ResumeSource};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ComposeResponse {
    pub resume_text: String,
    pub source: ResumeSource,
    pub can_export: bool,
}

#[derive(Debug, Deserialize)]
pub struct DraftRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct DraftResponse {
    pub content: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resume/compose/manual
///
/// Stores the submitted fields and fills the fixed template from them.
pub async fn handle_compose_manual(
    State(state): State<AppState>,
    Json(fields): Json<ResumeFields>,
) -> Json<ComposeResponse> {
    let mut session = state.session.lock().await;
    session.update_fields(fields);
    let resume_text = session.compose_manual().to_string();

    Json(ComposeResponse {
        can_export: !resume_text.is_empty(),
        resume_text,
        source: ResumeSource::Manual,
    })
}

/// POST /api/v1/resume/compose/ai
///
/// Stores the submitted fields and drafts the resume through the LLM.
/// Only one generation may be outstanding; a second request gets 409.
/// Remote failures are not errors here: the response carries the fixed
/// error text instead.
pub async fn handle_compose_ai(
    State(state): State<AppState>,
    Json(fields): Json<ResumeFields>,
) -> Result<Json<ComposeResponse>, AppError> {
    let fields = {
        let mut session = state.session.lock().await;
        session.update_fields(fields);
        session.begin_generation()?
    };

    // Run on its own task so a dropped connection cannot strand the guard.
    let session = state.session.clone();
    let composer = state.composer.clone();
    let resume_text = tokio::spawn(async move {
        let text = composer.compose(&fields).await;
        session.lock().await.finish_generation(text.clone());
        text
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("AI composition task failed: {e}")))?;

    Ok(Json(ComposeResponse {
        can_export: !resume_text.is_empty(),
        resume_text,
        source: ResumeSource::Ai,
    }))
}

/// POST /api/v1/generate
///
/// Free-form drafting helper: sends the prompt as-is and returns the content,
/// or a fixed apology if the call fails. Does not touch the session.
pub async fn handle_draft(
    State(state): State<AppState>,
    Json(request): Json<DraftRequest>,
) -> Result<Json<DraftResponse>, AppError> {
    if request.prompt.trim().is_empty() {
        return Err(AppError::Validation("prompt cannot be empty".to_string()));
    }

    let content = state.composer.draft(&request.prompt).await;
    Ok(Json(DraftResponse { content }))
}
