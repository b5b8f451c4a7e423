//! Admin user-management API
//!
//! Account lifecycle is owned entirely by the hosted auth platform;
//! these calls authenticate with the service key, not a user token.
//! Callers must gate them behind an admin role check.

use super::{check, AuthUser, PlatformClient};
use crate::Result;
use serde_json::json;
use uuid::Uuid;

impl PlatformClient {
    /// Create a user account with a confirmed email
    pub async fn admin_create_user(&self, email: &str, password: &str) -> Result<AuthUser> {
        let body = json!({
            "email": email,
            "password": password,
            "email_confirm": true,
        });
        let req = self
            .with_service_auth(self.http.post(self.auth_url("admin/users")))
            .json(&body);
        let resp = check(req.send().await?).await?;
        Ok(resp.json::<AuthUser>().await?)
    }

    /// Delete a user account
    pub async fn admin_delete_user(&self, id: Uuid) -> Result<()> {
        let req = self.with_service_auth(
            self.http
                .delete(self.auth_url(&format!("admin/users/{}", id))),
        );
        check(req.send().await?).await?;
        Ok(())
    }
}
