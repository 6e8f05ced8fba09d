//! Chat pipeline — retrieval → prompt → upstream stream → plain-text reply.
//!
//! Every outcome is a stream of text fragments; nothing here fails at the
//! transport level. The three failure shapes are:
//! - no credential: one static fragment, provider never called
//! - upstream setup failure: one `Neural Core Error: ...` fragment
//! - mid-stream failure: the fragments already relayed, then one inline
//!   `[Network Error during stream: ...]` fragment, then end of stream
//!
//! The inline diagnostic shares the reply channel with model text. Callers
//! must treat it as terminal, not as model output.

use async_stream::stream;
use futures::stream::{self, BoxStream, StreamExt};
use tracing::{debug, error, info, warn};

use crate::chat::prompts::build_system_prompt;
use crate::knowledge::retrieval::{retrieve_context, select_chunks};
use crate::llm_client::{ChatFragment, CompletionProvider, FragmentStream};

/// Reply text, one item per relayed fragment.
pub type ReplyStream = BoxStream<'static, String>;

pub const MISSING_CREDENTIAL_MESSAGE: &str =
    "System Error: GROQ_API_KEY not found in backend environment.";

/// Prefix of the single fragment sent when the upstream call cannot be opened.
pub const SETUP_ERROR_PREFIX: &str = "Neural Core Error: ";

/// Answers one query. `provider` is `None` when no credential was configured.
pub async fn answer_query(provider: Option<&dyn CompletionProvider>, query: &str) -> ReplyStream {
    let Some(provider) = provider else {
        error!("LLM client not initialized (missing GROQ_API_KEY)");
        return single_fragment(MISSING_CREDENTIAL_MESSAGE.to_string());
    };

    let context = retrieve_context(query);
    info!(chunks = ?select_chunks(query), "Context retrieved: {} chars", context.chars().count());

    let system_prompt = build_system_prompt(&context);

    debug!("Sending request to Groq...");
    match provider.stream_completion(&system_prompt, query).await {
        Ok(upstream) => relay_fragments(upstream),
        Err(e) => {
            error!("Upstream setup failed: {e}");
            single_fragment(format!("{SETUP_ERROR_PREFIX}{e}"))
        }
    }
}

/// Forwards upstream text deltas as they arrive.
///
/// Fragments without text are skipped. The first upstream error is turned into
/// one inline diagnostic fragment and ends the stream; nothing is retried.
pub fn relay_fragments(mut upstream: FragmentStream) -> ReplyStream {
    let reply = stream! {
        info!("Streaming response started");
        let mut relayed = 0usize;
        let mut failed = false;

        while let Some(item) = upstream.next().await {
            match item {
                Ok(ChatFragment { content: Some(text) }) if !text.is_empty() => {
                    relayed += 1;
                    yield text;
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(relayed, "Streaming error: {e}");
                    failed = true;
                    yield format!("\n[Network Error during stream: {e}]");
                    break;
                }
            }
        }

        if !failed {
            info!(relayed, "Streaming response finished");
        }
    };
    reply.boxed()
}

fn single_fragment(text: String) -> ReplyStream {
    stream::once(async move { text }).boxed()
}
