//! Axum route handlers for the Chat and Conversation APIs.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::conversation::ConversationEntry;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub question: String,
    #[serde(default)]
    pub resume_text: Option<String>,
    #[serde(default)]
    pub job_description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// POST /api/v1/chat
///
/// Always answers: generation failures come back as the fixed fallback text.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if request.question.trim().is_empty() {
        return Err(AppError::Validation("question cannot be empty".to_string()));
    }

    let response = state
        .chat
        .respond(
            &request.question,
            request.resume_text.as_deref().unwrap_or_default(),
            request.job_description.as_deref().unwrap_or_default(),
        )
        .await;

    Ok(Json(ChatResponse { response }))
}

/// GET /api/v1/conversations
///
/// Every recorded entry, oldest first.
pub async fn handle_list_conversations(
    State(state): State<AppState>,
) -> Json<Vec<ConversationEntry>> {
    Json(state.conversations.entries().await)
}
