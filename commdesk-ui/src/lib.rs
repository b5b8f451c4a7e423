//! commdesk-ui library - CommDesk web application
//!
//! Router layout: `/health` is public; every `/api` route sits behind the
//! session middleware, which resolves the caller's bearer token against
//! the hosted platform and attaches an explicit `Session` to the request.

use axum::Router;
use commdesk_common::PlatformClient;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod import;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Client for the hosted backend platform
    pub platform: PlatformClient,
}

impl AppState {
    /// Create new application state
    pub fn new(platform: PlatformClient) -> Self {
        Self { platform }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::{delete, get, post, put};

    // Protected routes (require a resolved session)
    let protected = Router::new()
        .route("/api/contacts", get(api::list_contacts).post(api::create_contact))
        .route(
            "/api/contacts/:id",
            put(api::update_contact).delete(api::delete_contact),
        )
        .route("/api/messages", get(api::list_messages).post(api::send_message))
        .route("/api/dashboard", get(api::get_dashboard))
        .route("/api/users", get(api::list_users).post(api::create_user))
        .route("/api/users/:id/role", put(api::update_user_role))
        .route("/api/users/:id", delete(api::delete_user))
        .route("/api/import/preview", post(api::import_preview))
        .route("/api/import/commit", post(api::import_commit))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::session_middleware,
        ));

    // Public routes (no authentication)
    let public = Router::new().merge(api::health_routes());

    Router::new()
        .merge(protected)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
