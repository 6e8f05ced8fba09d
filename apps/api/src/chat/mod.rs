// Résumé chat: keyword retrieval, persona prompt, streamed relay.
// All upstream calls go through llm_client::CompletionProvider.

pub mod handlers;
pub mod prompts;
pub mod relay;
