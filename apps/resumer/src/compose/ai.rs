//! AI composer: forwards the form fields to the text generator and returns
//! whatever it writes.
//!
//! Failures never escape: they are logged and replaced by a fixed message, so
//! the caller always gets displayable text back.

use std::sync::Arc;

use tracing::{error, info};

use crate::compose::prompts::{build_resume_prompt, AI_ERROR_TEXT, DRAFT_FALLBACK_TEXT};
use crate::llm_client::prompts::RESUME_WRITER_SYSTEM;
use crate::llm_client::TextGenerator;
use crate::models::resume::ResumeFields;

#[derive(Clone)]
pub struct AiComposer {
    generator: Arc<dyn TextGenerator>,
}

impl AiComposer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Drafts a resume from the fields. Returns the generated content verbatim,
    /// or `AI_ERROR_TEXT` if the request fails in any way.
    pub async fn compose(&self, fields: &ResumeFields) -> String {
        let prompt = build_resume_prompt(fields);

        match self
            .generator
            .complete(Some(RESUME_WRITER_SYSTEM), &prompt)
            .await
        {
            Ok(content) => {
                info!(chars = content.len(), "AI resume generated");
                content
            }
            Err(e) => {
                error!("AI resume generation failed: {e}");
                AI_ERROR_TEXT.to_string()
            }
        }
    }

    /// Sends a free-form prompt as a single user message, without the
    /// resume-writer system prompt.
    pub async fn draft(&self, prompt: &str) -> String {
        match self.generator.complete(None, prompt).await {
            Ok(content) => content,
            Err(e) => {
                error!("Error generating content: {e}");
                DRAFT_FALLBACK_TEXT.to_string()
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Test double for the remote endpoint: returns a canned reply and records
    /// what it was asked.
    pub(crate) struct StubGenerator {
        reply: Result<String, u16>,
        pub(crate) calls: Mutex<Vec<(Option<String>, String)>>,
    }

    impl StubGenerator {
        pub(crate) fn ok(content: &str) -> Self {
            Self {
                reply: Ok(content.to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn failing(status: u16) -> Self {
            Self {
                reply: Err(status),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn complete(&self, system: Option<&str>, prompt: &str) -> Result<String, LlmError> {
            self.calls
                .lock()
                .unwrap()
                .push((system.map(str::to_string), prompt.to_string()));
            match &self.reply {
                Ok(content) => Ok(content.clone()),
                Err(status) => Err(LlmError::Api {
                    status: *status,
                    message: "upstream unavailable".to_string(),
                }),
            }
        }
    }

    struct EmptyGenerator;

    #[async_trait]
    impl TextGenerator for EmptyGenerator {
        async fn complete(&self, _: Option<&str>, _: &str) -> Result<String, LlmError> {
            Err(LlmError::EmptyContent)
        }
    }

    fn fields() -> ResumeFields {
        ResumeFields {
            name: "Jane Doe".to_string(),
            skills: "Rust".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_compose_returns_content_verbatim() {
        let composer = AiComposer::new(Arc::new(StubGenerator::ok("Hello resume")));
        assert_eq!(composer.compose(&fields()).await, "Hello resume");
    }

    #[tokio::test]
    async fn test_compose_sends_system_prompt_and_field_prompt() {
        let stub = Arc::new(StubGenerator::ok("ok"));
        let composer = AiComposer::new(stub.clone());
        composer.compose(&fields()).await;

        let calls = stub.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0.as_deref(), Some(RESUME_WRITER_SYSTEM));
        assert!(calls[0].1.contains("Name: Jane Doe"));
        assert!(calls[0].1.contains("Skills: Rust"));
    }

    #[tokio::test]
    async fn test_compose_failure_yields_fixed_error_text() {
        let composer = AiComposer::new(Arc::new(StubGenerator::failing(503)));
        assert_eq!(composer.compose(&fields()).await, AI_ERROR_TEXT);
    }

    #[tokio::test]
    async fn test_compose_empty_content_yields_fixed_error_text() {
        let composer = AiComposer::new(Arc::new(EmptyGenerator));
        assert_eq!(composer.compose(&fields()).await, AI_ERROR_TEXT);
    }

    #[tokio::test]
    async fn test_compose_does_not_retry() {
        let stub = Arc::new(StubGenerator::failing(500));
        let composer = AiComposer::new(stub.clone());
        composer.compose(&fields()).await;
        assert_eq!(stub.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_draft_sends_prompt_without_system() {
        let stub = Arc::new(StubGenerator::ok("A summary"));
        let composer = AiComposer::new(stub.clone());
        assert_eq!(composer.draft("Summarise me").await, "A summary");

        let calls = stub.calls.lock().unwrap();
        assert_eq!(calls[0], (None, "Summarise me".to_string()));
    }

    #[tokio::test]
    async fn test_draft_failure_yields_fallback() {
        let composer = AiComposer::new(Arc::new(StubGenerator::failing(401)));
        assert_eq!(composer.draft("anything").await, DRAFT_FALLBACK_TEXT);
    }
}
