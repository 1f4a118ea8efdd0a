use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::errors::AppError;
use crate::models::{ChatRequest, CsvUploadRequest, RenameRequest, TextUploadRequest};
use crate::service::chat_service::ChatService;
use crate::service::upload_service::UploadService;

/// Shared handler state: the two services behind the API.
#[derive(Clone)]
pub struct ApiState {
    pub chat: ChatService,
    pub uploads: UploadService,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET `/api/conversations` — list conversations, most recently updated first
pub async fn list_conversations_handler(State(state): State<ApiState>) -> impl IntoResponse {
    Json(state.chat.get_conversations().await)
}

/// GET `/api/conversations/{id}/messages` — transcript, ascending by creation
pub async fn list_messages_handler(
    Path(id): Path<String>,
    State(state): State<ApiState>,
) -> impl IntoResponse {
    Json(state.chat.get_messages(&id).await)
}

/// POST `/api/chat` — send a message; creates the conversation when the body
/// carries no id
pub async fn chat_handler(
    State(state): State<ApiState>,
    Json(request): Json<ChatRequest>,
) -> Response {
    match state.chat.chat(request).await {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_response(&err),
    }
}

/// PATCH `/api/conversations/{id}` — rename
pub async fn rename_conversation_handler(
    Path(id): Path<String>,
    State(state): State<ApiState>,
    Json(request): Json<RenameRequest>,
) -> Response {
    match state.chat.rename_conversation(&id, &request.title).await {
        Ok(conversation) => Json(conversation).into_response(),
        Err(err) => error_response(&err),
    }
}

/// DELETE `/api/conversations/{id}` — delete with message cascade
pub async fn delete_conversation_handler(
    Path(id): Path<String>,
    State(state): State<ApiState>,
) -> Response {
    match state.chat.delete_conversation(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(&err),
    }
}

/// POST `/api/uploads/csv` — simulated CSV file upload
pub async fn upload_csv_handler(
    State(state): State<ApiState>,
    Json(request): Json<CsvUploadRequest>,
) -> Response {
    match state.uploads.upload_csv(request).await {
        Ok(receipt) => Json(receipt).into_response(),
        Err(err) => error_response(&err),
    }
}

/// POST `/api/uploads/text` — simulated raw-text upload
pub async fn upload_text_handler(
    State(state): State<ApiState>,
    Json(request): Json<TextUploadRequest>,
) -> Response {
    match state.uploads.upload_text(request).await {
        Ok(receipt) => Json(receipt).into_response(),
        Err(err) => error_response(&err),
    }
}

// ── Helper ────────────────────────────────────────────────────────────────────

fn error_response(err: &AppError) -> Response {
    let status = if err.is_validation() {
        StatusCode::BAD_REQUEST
    } else if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else if err.is_upload_error() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (status, Json(serde_json::json!({ "error": err.to_string() }))).into_response()
}

#[cfg(test)]
#[path = "api_routes_test.rs"]
mod tests;
