use std::sync::Arc;

use tokio::sync::Mutex;

use crate::compose::AiComposer;
use crate::config::Config;
use crate::session::ResumeSession;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The one form session this instance serves.
    pub session: Arc<Mutex<ResumeSession>>,
    /// AI composer over a pluggable `TextGenerator`. Default: `LlmClient`.
    pub composer: AiComposer,
    pub config: Config,
}

impl AppState {
    pub fn new(composer: AiComposer, config: Config) -> Self {
        Self {
            session: Arc::new(Mutex::new(ResumeSession::default())),
            composer,
            config,
        }
    }
}
