//! Server-sent event decoding for OpenAI-compatible streaming completions.
//!
//! Groq streams `data: {json}` lines separated by blank lines and terminates
//! with `data: [DONE]`. Network chunks can split a line (or a UTF-8 sequence)
//! anywhere, so bytes are buffered until a full line is available.

use serde::Deserialize;

use crate::llm_client::{ChatFragment, LlmError};

/// Accumulates raw bytes and hands back complete `data:` payloads.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    /// Feeds one network chunk and returns the `data:` payloads it completed.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(bytes);

        let mut payloads = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line);
            let line = line.trim_end_matches(['\n', '\r']);

            if let Some(data) = line.strip_prefix("data:") {
                payloads.push(data.trim_start().to_string());
            }
            // Blank separators, `:` comments and `event:`/`id:` fields are ignored.
        }
        payloads
    }
}

/// What a single `data:` payload means for the relay.
#[derive(Debug, PartialEq)]
pub enum StreamEvent {
    Fragment(ChatFragment),
    Done,
}

#[derive(Debug, Deserialize)]
struct CompletionChunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
    error: Option<StreamErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: ChunkDelta,
}

#[derive(Debug, Default, Deserialize)]
struct ChunkDelta {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StreamErrorBody {
    message: String,
}

/// Interprets one `data:` payload.
pub fn parse_event(data: &str) -> Result<StreamEvent, LlmError> {
    if data == "[DONE]" {
        return Ok(StreamEvent::Done);
    }

    let chunk: CompletionChunk = serde_json::from_str(data)?;

    if let Some(error) = chunk.error {
        return Err(LlmError::Upstream(error.message));
    }

    let content = chunk
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta.content);

    Ok(StreamEvent::Fragment(ChatFragment { content }))
}
