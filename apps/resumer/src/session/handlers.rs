//! Axum route handlers for the form session: fields, profile image, reset.

use axum::{
    extract::{Multipart, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::resume::ResumeFields;
use crate::render::photo::prepare_profile_image;
use crate::session::SessionSnapshot;
use crate::state::AppState;

/// Multipart field name carrying the uploaded picture.
const IMAGE_FIELD: &str = "image";

/// GET /api/v1/resume
pub async fn handle_get_session(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.session.lock().await.snapshot())
}

/// DELETE /api/v1/resume
///
/// Called by the page on load so a browser reload starts from an empty form.
pub async fn handle_reset_session(State(state): State<AppState>) -> StatusCode {
    state.session.lock().await.reset();
    StatusCode::NO_CONTENT
}

/// PUT /api/v1/resume/fields
pub async fn handle_update_fields(
    State(state): State<AppState>,
    Json(fields): Json<ResumeFields>,
) -> Json<SessionSnapshot> {
    let mut session = state.session.lock().await;
    session.update_fields(fields);
    Json(session.snapshot())
}

/// POST /api/v1/resume/image
///
/// Accepts one file in the `image` part, decodes it into preview and embed
/// forms, and replaces any previous picture.
pub async fn handle_upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<SessionSnapshot>, AppError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some(IMAGE_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
            upload = Some(bytes);
            break;
        }
    }

    let bytes = upload
        .ok_or_else(|| AppError::Validation(format!("Missing '{IMAGE_FIELD}' file field")))?;
    let size = bytes.len();

    let image = tokio::task::spawn_blocking(move || prepare_profile_image(bytes))
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!("spawn_blocking failed in image decode: {e}"))
        })?
        .map_err(|e| {
            warn!("Rejected profile image upload: {e}");
            AppError::UnprocessableEntity(format!("Unsupported image: {e}"))
        })?;

    info!(
        bytes = size,
        content_type = %image.content_type,
        "Profile image updated"
    );

    let mut session = state.session.lock().await;
    session.set_image(image);
    Ok(Json(session.snapshot()))
}

/// GET /api/v1/resume/image
///
/// Serves the uploaded picture unchanged for the page preview.
pub async fn handle_get_image(State(state): State<AppState>) -> Result<Response, AppError> {
    let session = state.session.lock().await;
    let image = session
        .image
        .as_ref()
        .ok_or_else(|| AppError::NotFound("No profile image uploaded".to_string()))?;

    let content_type = HeaderValue::from_str(&image.content_type)
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, HeaderValue::from_static("no-store")),
        ],
        image.original.clone(),
    )
        .into_response())
}
