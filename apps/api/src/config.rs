use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 8000;

/// Application configuration loaded from environment variables.
///
/// Nothing is strictly required: a missing GROQ_API_KEY only degrades /chat.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = match non_empty(lookup("PORT")) {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got '{raw}'"))?,
            None => DEFAULT_PORT,
        };

        Ok(Config {
            groq_api_key: non_empty(lookup("GROQ_API_KEY")),
            port,
            rust_log: non_empty(lookup("RUST_LOG")).unwrap_or_else(|| "info".to_string()),
        })
    }
}

/// Treats blank values the same as unset ones.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
