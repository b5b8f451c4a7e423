//! Contact-import handlers
//!
//! Two-step flow: upload a file for preview (sniff → parse → normalize),
//! then commit the reviewed records as a single batch insert. The whole
//! flow is synchronous per file; a failed commit aborts the entire batch
//! with no retry and no per-row reporting.

use axum::{
    extract::{Multipart, State},
    Extension, Json,
};
use commdesk_common::models::{Contact, ContactInsert, ImportedContact};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{ApiError, Session};
use crate::import;
use crate::AppState;

/// Preview response: the accepted records and aggregate counts
#[derive(Debug, Serialize)]
pub struct ImportPreviewResponse {
    pub accepted: Vec<ImportedContact>,
    pub accepted_count: usize,
    pub total_rows: usize,
}

/// POST /api/import/preview
///
/// Multipart upload with a single `file` part. The original file name
/// chooses the parser; unsupported types and parse failures abort the
/// attempt with the parser's message verbatim.
pub async fn import_preview(
    Extension(session): Extension<Session>,
    mut multipart: Multipart,
) -> Result<Json<ImportPreviewResponse>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field
            .file_name()
            .ok_or_else(|| ApiError::Validation("Upload is missing a file name".to_string()))?
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::Validation(e.to_string()))?;

        let preview = import::preview(&file_name, &data)?;
        info!(
            "Import preview for {} ({}): {}/{} rows accepted",
            file_name,
            session.email,
            preview.accepted.len(),
            preview.total_rows
        );
        return Ok(Json(ImportPreviewResponse {
            accepted_count: preview.accepted.len(),
            total_rows: preview.total_rows,
            accepted: preview.accepted,
        }));
    }

    Err(ApiError::Validation(
        "Upload is missing a 'file' part".to_string(),
    ))
}

/// Commit request: the reviewed records from the preview step
#[derive(Debug, Deserialize)]
pub struct ImportCommitRequest {
    pub records: Vec<ImportedContact>,
}

/// Commit response: the imported count plus a fresh contact list
#[derive(Debug, Serialize)]
pub struct ImportCommitResponse {
    pub imported: usize,
    pub contacts: Vec<Contact>,
}

/// POST /api/import/commit
///
/// Attaches the session's identity to every record as its owner and
/// submits one batch insert. Any row failure aborts the whole batch;
/// partial commits are not attempted.
pub async fn import_commit(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(request): Json<ImportCommitRequest>,
) -> Result<Json<ImportCommitResponse>, ApiError> {
    if request.records.is_empty() {
        return Err(ApiError::Validation("No records to import".to_string()));
    }

    ensure_importable(&request.records)?;

    let inserts: Vec<ContactInsert> = request
        .records
        .into_iter()
        .map(|record| record.into_insert(session.user_id))
        .collect();

    let imported = state
        .platform
        .insert_contacts(&session.token, &inserts)
        .await?;
    info!("Imported {} contacts for {}", imported, session.email);

    // Success replaces the session's contact list with a fresh read
    let contacts = state.platform.list_contacts(&session.token).await?;
    Ok(Json(ImportCommitResponse { imported, contacts }))
}

/// Re-check the accept invariant before touching the network; the
/// records round-tripped through the client, so whitespace counts as
/// empty just like it does during validation.
fn ensure_importable(records: &[ImportedContact]) -> Result<(), ApiError> {
    for record in records {
        let has_channel =
            !record.email.trim().is_empty() || !record.phone.trim().is_empty();
        if record.name.trim().is_empty() || !has_channel {
            return Err(ApiError::Validation(
                "Every record needs a name and an email or phone".to_string(),
            ));
        }
    }
    Ok(())
}
