use std::sync::Arc;

use crate::llm_client::CompletionProvider;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Streaming completion backend. `None` when GROQ_API_KEY was not set at
    /// startup — /chat then answers with a static error instead of failing.
    pub llm: Option<Arc<dyn CompletionProvider>>,
}
