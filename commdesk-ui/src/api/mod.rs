//! HTTP API handlers for commdesk-ui

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

pub mod contacts;
pub mod dashboard;
pub mod health;
pub mod imports;
pub mod messages;
pub mod session;
pub mod users;

pub use contacts::{create_contact, delete_contact, list_contacts, update_contact};
pub use dashboard::get_dashboard;
pub use health::health_routes;
pub use imports::{import_commit, import_preview};
pub use messages::{list_messages, send_message};
pub use session::{session_middleware, Session};
pub use users::{create_user, delete_user, list_users, update_user_role};

/// API error responses
///
/// Every error kind is terminal for the triggering request; nothing is
/// retried automatically.
#[derive(Debug)]
pub enum ApiError {
    /// Invalid input, caught before any network call (400)
    Validation(String),
    /// Malformed import file content; message surfaced verbatim (400)
    Parse(String),
    /// Resource not found (404)
    NotFound(String),
    /// Actor lacks the required role (403)
    Forbidden(String),
    /// The hosted platform rejected or failed the request (502)
    Platform(String),
    /// Internal error (500)
    Internal(String),
}

impl From<commdesk_common::Error> for ApiError {
    fn from(e: commdesk_common::Error) -> Self {
        use commdesk_common::Error;
        match e {
            Error::Validation(msg) => ApiError::Validation(msg),
            Error::Parse(msg) => ApiError::Parse(msg),
            Error::NotFound(msg) => ApiError::NotFound(msg),
            Error::Forbidden(msg) => ApiError::Forbidden(msg),
            Error::Platform { status, message } => {
                ApiError::Platform(format!("HTTP {}: {}", status, message))
            }
            Error::Http(e) => ApiError::Platform(e.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Parse(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::Platform(msg) => (StatusCode::BAD_GATEWAY, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
