pub mod api_routes;

use axum::routing::{get, patch, post};
use axum::Router;

use self::api_routes::{
    chat_handler, delete_conversation_handler, list_conversations_handler,
    list_messages_handler, rename_conversation_handler, upload_csv_handler,
    upload_text_handler, ApiState,
};

/// One route per access function, JSON in and out.
pub fn api_router(state: ApiState) -> Router {
    Router::new()
        .route("/api/conversations", get(list_conversations_handler))
        .route(
            "/api/conversations/{id}",
            patch(rename_conversation_handler).delete(delete_conversation_handler),
        )
        .route("/api/conversations/{id}/messages", get(list_messages_handler))
        .route("/api/chat", post(chat_handler))
        .route("/api/uploads/csv", post(upload_csv_handler))
        .route("/api/uploads/text", post(upload_text_handler))
        .with_state(state)
}
