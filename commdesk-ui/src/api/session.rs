//! Session middleware
//!
//! Resolves the `Authorization: Bearer` token against the hosted platform
//! and attaches an explicit `Session` value to the request, so handlers
//! receive the acting identity as a parameter instead of reading ambient
//! state. Role checks here are a UX convenience: the platform's row
//! policies independently re-enforce every rule server-side.

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use commdesk_common::models::Role;
use serde_json::json;
use tracing::warn;
use uuid::Uuid;

use super::ApiError;
use crate::AppState;

/// The acting identity for one request
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
    /// Bearer token forwarded to the platform so its row policies apply
    pub token: String,
}

impl Session {
    /// Gate for admin-only handlers
    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.role.is_admin() {
            Ok(())
        } else {
            Err(ApiError::Forbidden(
                "Administrator role required".to_string(),
            ))
        }
    }
}

/// Session middleware
///
/// Returns 401 when the token is missing or the platform rejects it.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, SessionError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
        .ok_or(SessionError::MissingToken)?;

    let user = state.platform.resolve_user(&token).await.map_err(|e| {
        warn!("Token resolution failed: {}", e);
        SessionError::InvalidToken(e.to_string())
    })?;

    // The profile row carries the role; its absence means the account is
    // not provisioned for this application
    let profile = state
        .platform
        .get_profile(&token, user.id)
        .await
        .map_err(|e| SessionError::NoProfile(e.to_string()))?;

    request.extensions_mut().insert(Session {
        user_id: profile.id,
        email: profile.email,
        role: profile.role,
        token,
    });

    Ok(next.run(request).await)
}

/// Session establishment errors
#[derive(Debug)]
pub enum SessionError {
    MissingToken,
    InvalidToken(String),
    NoProfile(String),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            SessionError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "Missing Authorization bearer token".to_string(),
            ),
            SessionError::InvalidToken(msg) => {
                (StatusCode::UNAUTHORIZED, format!("Invalid token: {}", msg))
            }
            SessionError::NoProfile(msg) => {
                (StatusCode::UNAUTHORIZED, format!("No profile for token: {}", msg))
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
