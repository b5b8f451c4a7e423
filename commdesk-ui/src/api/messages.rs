//! Message handlers
//!
//! Messages are append-only from this application: list and send, no
//! update or delete routes.

use axum::{extract::State, Extension, Json};
use commdesk_common::models::{Message, MessageInsert, NewMessage};

use super::{ApiError, Session};
use crate::AppState;

/// GET /api/messages
///
/// Newest first, as returned by the platform.
pub async fn list_messages(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<Vec<Message>>, ApiError> {
    let messages = state.platform.list_messages(&session.token).await?;
    Ok(Json(messages))
}

/// POST /api/messages
pub async fn send_message(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(new_message): Json<NewMessage>,
) -> Result<Json<Message>, ApiError> {
    new_message.validate()?;

    let insert = MessageInsert {
        content: new_message.content,
        sent_by: session.user_id,
        recipients: new_message.recipients,
        sent_via: new_message.sent_via,
        status: "sent".to_string(),
    };
    let message = state.platform.insert_message(&session.token, &insert).await?;
    Ok(Json(message))
}
