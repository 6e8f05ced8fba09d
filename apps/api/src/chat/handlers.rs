//! Axum route handler for the Chat API.

use std::convert::Infallible;

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use futures::StreamExt;
use serde::Deserialize;
use tracing::{debug, info};

use crate::chat::relay::{answer_query, ReplyStream};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub prompt: String,
}

/// POST /chat
///
/// Streams the assistant's reply as `text/plain`. Missing credentials and
/// upstream failures are reported inside the stream, never as an HTTP error.
pub async fn handle_chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload.map_err(|e| AppError::UnprocessableEntity(e.body_text()))?;

    info!("Received query ({} chars)", request.prompt.chars().count());
    debug!(prompt = %request.prompt, "Received query");

    let reply = answer_query(state.llm.as_deref(), &request.prompt).await;

    Ok(plain_text_stream(reply))
}

fn plain_text_stream(reply: ReplyStream) -> Response {
    let body = Body::from_stream(reply.map(Ok::<_, Infallible>));
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response()
}
