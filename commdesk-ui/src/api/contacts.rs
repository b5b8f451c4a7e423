//! Contact CRUD handlers
//!
//! Validation (non-empty name plus at least one contact channel) runs
//! before any network call; the platform's row policies own everything
//! else.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use commdesk_common::models::{Contact, ContactInsert, NewContact};
use serde::Serialize;
use uuid::Uuid;

use super::{ApiError, Session};
use crate::AppState;

/// GET /api/contacts
pub async fn list_contacts(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    let contacts = state.platform.list_contacts(&session.token).await?;
    Ok(Json(contacts))
}

/// POST /api/contacts
pub async fn create_contact(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(new_contact): Json<NewContact>,
) -> Result<Json<Contact>, ApiError> {
    new_contact.validate()?;

    let insert = ContactInsert {
        name: new_contact.name.trim().to_string(),
        email: non_empty(new_contact.email),
        phone: non_empty(new_contact.phone),
        created_by: session.user_id,
    };
    let contact = state.platform.insert_contact(&session.token, &insert).await?;
    Ok(Json(contact))
}

/// PUT /api/contacts/:id
pub async fn update_contact(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
    Json(fields): Json<NewContact>,
) -> Result<Json<Contact>, ApiError> {
    fields.validate()?;
    let contact = state
        .platform
        .update_contact(&session.token, id, &fields)
        .await?;
    Ok(Json(contact))
}

/// Deletion acknowledgement
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: Uuid,
}

/// DELETE /api/contacts/:id
pub async fn delete_contact(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, ApiError> {
    state.platform.delete_contact(&session.token, id).await?;
    Ok(Json(DeleteResponse { deleted: id }))
}

/// Trim an optional field, mapping whitespace-only values to None
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
