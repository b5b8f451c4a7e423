//! Profiles table operations
//!
//! Each actor can read their own row; read-all and role updates are
//! reserved to admins by the platform's row policies.

use super::{check, PlatformClient};
use crate::models::{Profile, Role};
use crate::{Error, Result};
use serde_json::json;
use uuid::Uuid;

const TABLE: &str = "profiles";

impl PlatformClient {
    /// Fetch one profile row by id (the actor's own, for non-admins)
    pub async fn get_profile(&self, token: &str, id: Uuid) -> Result<Profile> {
        let req = self.with_auth(
            self.http
                .get(self.table_url(TABLE))
                .query(&[("select", "*".to_string()), ("id", format!("eq.{}", id))]),
            token,
        );
        let resp = check(req.send().await?).await?;

        let mut rows = resp.json::<Vec<Profile>>().await?;
        rows.pop()
            .ok_or_else(|| Error::NotFound(format!("Profile {}", id)))
    }

    /// Fetch all profiles (admin only)
    pub async fn list_profiles(&self, token: &str) -> Result<Vec<Profile>> {
        let req = self.with_auth(
            self.http
                .get(self.table_url(TABLE))
                .query(&[("select", "*"), ("order", "created_at.desc")]),
            token,
        );
        let resp = check(req.send().await?).await?;
        Ok(resp.json::<Vec<Profile>>().await?)
    }

    /// Update a profile's role (admin only)
    pub async fn update_profile_role(&self, token: &str, id: Uuid, role: Role) -> Result<Profile> {
        let req = self
            .with_auth(self.http.patch(self.table_url(TABLE)), token)
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation")
            .json(&json!({ "role": role }));
        let resp = check(req.send().await?).await?;

        let mut rows = resp.json::<Vec<Profile>>().await?;
        rows.pop()
            .ok_or_else(|| Error::NotFound(format!("Profile {}", id)))
    }

    /// Count profiles (admin only)
    pub async fn count_profiles(&self, token: &str) -> Result<u64> {
        self.table_count(token, TABLE).await
    }
}
