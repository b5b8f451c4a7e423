//! User administration handlers (admin only)
//!
//! Account lifecycle is owned by the hosted auth platform; these routes
//! trigger creation/role-update/deletion through its admin API. The
//! admin gate here is a UX convenience; the platform re-enforces it.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use commdesk_common::models::{Profile, Role};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::{ApiError, Session};
use crate::AppState;

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<Vec<Profile>>, ApiError> {
    session.require_admin()?;
    let profiles = state.platform.list_profiles(&session.token).await?;
    Ok(Json(profiles))
}

/// New account request
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
}

/// New account acknowledgement
#[derive(Debug, Serialize)]
pub struct CreateUserResponse {
    pub id: Uuid,
    pub email: String,
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<CreateUserResponse>, ApiError> {
    session.require_admin()?;

    if request.email.trim().is_empty() {
        return Err(ApiError::Validation("Email is required".to_string()));
    }
    if request.password.is_empty() {
        return Err(ApiError::Validation("Password is required".to_string()));
    }

    let user = state
        .platform
        .admin_create_user(request.email.trim(), &request.password)
        .await?;
    info!("Created user account {}", user.id);

    Ok(Json(CreateUserResponse {
        id: user.id,
        email: user.email.unwrap_or(request.email),
    }))
}

/// Role update request
#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: Role,
}

/// PUT /api/users/:id/role
pub async fn update_user_role(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRoleRequest>,
) -> Result<Json<Profile>, ApiError> {
    session.require_admin()?;
    let profile = state
        .platform
        .update_profile_role(&session.token, id, request.role)
        .await?;
    Ok(Json(profile))
}

/// Deletion acknowledgement
#[derive(Debug, Serialize)]
pub struct DeleteUserResponse {
    pub deleted: Uuid,
}

/// DELETE /api/users/:id
///
/// Deleting the session's own account is rejected locally, before any
/// network call.
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteUserResponse>, ApiError> {
    session.require_admin()?;
    reject_self_deletion(&session, id)?;

    state.platform.admin_delete_user(id).await?;
    info!("Deleted user account {}", id);
    Ok(Json(DeleteUserResponse { deleted: id }))
}

/// Local guard: an admin cannot delete the account they are signed in as
pub fn reject_self_deletion(session: &Session, target: Uuid) -> Result<(), ApiError> {
    if session.user_id == target {
        return Err(ApiError::Validation(
            "You cannot delete your own account".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin_session(user_id: Uuid) -> Session {
        Session {
            user_id,
            email: "admin@example.com".to_string(),
            role: Role::Admin,
            token: "token".to_string(),
        }
    }

    #[test]
    fn deleting_own_account_is_rejected_locally() {
        let id = Uuid::new_v4();
        let session = admin_session(id);
        assert!(reject_self_deletion(&session, id).is_err());
    }

    #[test]
    fn deleting_another_account_passes_the_guard() {
        let session = admin_session(Uuid::new_v4());
        assert!(reject_self_deletion(&session, Uuid::new_v4()).is_ok());
    }

    #[test]
    fn non_admin_is_forbidden() {
        let session = Session {
            user_id: Uuid::new_v4(),
            email: "user@example.com".to_string(),
            role: Role::User,
            token: "token".to_string(),
        };
        assert!(matches!(
            session.require_admin(),
            Err(ApiError::Forbidden(_))
        ));
    }
}
