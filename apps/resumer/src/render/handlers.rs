//! Axum route handler for the PDF download.

use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use tracing::info;

use crate::errors::AppError;
use crate::render::{export_resume, ExportRequest};
use crate::state::AppState;

/// GET /api/v1/resume/export
///
/// Renders the current resume and returns it as an attachment named after the
/// person. Refused until some resume text has been composed.
pub async fn handle_export(State(state): State<AppState>) -> Result<Response, AppError> {
    let request = {
        let session = state.session.lock().await;
        if !session.can_export() {
            return Err(AppError::UnprocessableEntity(
                "Compose a resume before exporting".to_string(),
            ));
        }
        ExportRequest {
            fields: session.fields.clone(),
            resume_text: session.resume_text.clone(),
            image: session.image.as_ref().map(|image| image.embed.clone()),
        }
    };

    let document = tokio::task::spawn_blocking(move || export_resume(&request))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in export: {e}")))??;

    info!(
        filename = %document.filename,
        pages = document.page_count,
        "Resume exported"
    );

    let disposition = HeaderValue::from_str(&content_disposition(&document.filename))
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document.bytes,
    )
        .into_response())
}

/// Builds an attachment disposition carrying the filename twice: an ASCII
/// fallback for `filename` and the exact UTF-8 name in RFC 5987 `filename*`.
fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c == ' ' || c.is_ascii_graphic() => c,
            _ => '_',
        })
        .collect();

    let mut encoded = String::with_capacity(filename.len() * 3);
    for byte in filename.bytes() {
        if byte.is_ascii_alphanumeric() || b"!#$&+-.^_`|~".contains(&byte) {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }

    format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
}
