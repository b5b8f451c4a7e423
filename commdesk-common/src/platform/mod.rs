//! REST client for the hosted backend platform
//!
//! The platform exposes its Postgres tables under `/rest/v1/<table>` and
//! its auth/admin API under `/auth/v1/`. Row-level access policies are
//! enforced server-side; this client only forwards the acting user's
//! bearer token (or the service key, for admin calls) and never makes
//! authorization decisions of its own.

use crate::config::PlatformConfig;
use crate::{Error, Result};
use reqwest::{Client as HttpClient, RequestBuilder, Response};
use serde::Deserialize;
use uuid::Uuid;

mod admin;
mod contacts;
mod messages;
mod profiles;

/// Client for the hosted platform's REST and auth APIs
#[derive(Debug, Clone)]
pub struct PlatformClient {
    http: HttpClient,
    base_url: String,
    service_key: String,
}

/// Authenticated user as reported by the platform's auth API
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

impl PlatformClient {
    pub fn new(config: &PlatformConfig) -> Self {
        Self {
            http: HttpClient::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            service_key: config.service_key.clone(),
        }
    }

    /// URL for a table endpoint
    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// URL for an auth API endpoint
    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    /// Attach the api key header and the given bearer token
    fn with_auth(&self, req: RequestBuilder, token: &str) -> RequestBuilder {
        req.header("apikey", &self.service_key).bearer_auth(token)
    }

    /// Attach the api key header and the service key as bearer (admin calls)
    fn with_service_auth(&self, req: RequestBuilder) -> RequestBuilder {
        req.header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    /// Resolve a bearer token to the authenticated user
    pub async fn resolve_user(&self, token: &str) -> Result<AuthUser> {
        let req = self.with_auth(self.http.get(self.auth_url("user")), token);
        let resp = check(req.send().await?).await?;
        Ok(resp.json::<AuthUser>().await?)
    }

    /// Exact row count for a table, scoped by the token's row policies
    async fn table_count(&self, token: &str, table: &str) -> Result<u64> {
        let req = self
            .with_auth(self.http.head(self.table_url(table)), token)
            .header("Prefer", "count=exact");
        let resp = check(req.send().await?).await?;

        let range = resp
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| Error::Internal(format!("No content-range header counting {}", table)))?;

        parse_count(range)
            .ok_or_else(|| Error::Internal(format!("Unparseable content-range '{}' for {}", range, table)))
    }
}

/// Extract the total from a content-range header value like `0-24/57` or `*/57`
fn parse_count(range: &str) -> Option<u64> {
    range.rsplit('/').next()?.parse().ok()
}

/// Map non-success responses to a platform error with the server's message
async fn check(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    tracing::debug!("Platform request failed with {}: {}", status, body);
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| {
            ["message", "msg", "error_description", "error"]
                .iter()
                .find_map(|k| v.get(k).and_then(|m| m.as_str()).map(String::from))
        })
        .unwrap_or(body);

    Err(Error::Platform {
        status: status.as_u16(),
        message,
    })
}
