pub mod health;
pub mod page;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::compose::handlers as compose;
use crate::render::handlers as render;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.upload_limit_bytes;

    Router::new()
        .route("/", get(page::index_handler))
        .route("/health", get(health::health_handler))
        // Form session
        .route(
            "/api/v1/resume",
            get(session::handle_get_session).delete(session::handle_reset_session),
        )
        .route("/api/v1/resume/fields", put(session::handle_update_fields))
        .route(
            "/api/v1/resume/image",
            get(session::handle_get_image).post(session::handle_upload_image),
        )
        // Composers
        .route(
            "/api/v1/resume/compose/manual",
            post(compose::handle_compose_manual),
        )
        .route("/api/v1/resume/compose/ai", post(compose::handle_compose_ai))
        .route("/api/v1/generate", post(compose::handle_draft))
        // Export
        .route("/api/v1/resume/export", get(render::handle_export))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
