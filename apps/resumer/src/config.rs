use anyhow::{Context, Result};

const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_UPLOAD_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
///
/// The OpenAI key is optional: when unset the AI composer still runs and the
/// remote endpoint answers with an authorization failure.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_api_url: String,
    pub host: String,
    pub port: u16,
    /// Maximum accepted request body, mainly bounding profile image uploads.
    pub upload_limit_bytes: usize,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
            openai_api_url: std::env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_API_URL.to_string()),
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            upload_limit_bytes: match std::env::var("UPLOAD_LIMIT_BYTES") {
                Ok(raw) => raw
                    .parse::<usize>()
                    .context("UPLOAD_LIMIT_BYTES must be a byte count")?,
                Err(_) => DEFAULT_UPLOAD_LIMIT_BYTES,
            },
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Configuration with defaults only and no credential. Used by tests.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Config {
            openai_api_key: String::new(),
            openai_api_url: DEFAULT_OPENAI_API_URL.to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
            upload_limit_bytes: DEFAULT_UPLOAD_LIMIT_BYTES,
            rust_log: "info".to_string(),
        }
    }
}
