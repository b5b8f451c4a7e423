//! Messages table operations
//!
//! Insert-only from this application: no update or delete path exists.

use super::{check, PlatformClient};
use crate::models::{Message, MessageInsert};
use crate::{Error, Result};

const TABLE: &str = "messages";

impl PlatformClient {
    /// Fetch messages visible to the actor, newest first
    pub async fn list_messages(&self, token: &str) -> Result<Vec<Message>> {
        let req = self.with_auth(
            self.http
                .get(self.table_url(TABLE))
                .query(&[("select", "*"), ("order", "sent_at.desc")]),
            token,
        );
        let resp = check(req.send().await?).await?;
        Ok(resp.json::<Vec<Message>>().await?)
    }

    /// Append a message and return the stored row
    pub async fn insert_message(&self, token: &str, message: &MessageInsert) -> Result<Message> {
        let req = self
            .with_auth(self.http.post(self.table_url(TABLE)), token)
            .header("Prefer", "return=representation")
            .json(message);
        let resp = check(req.send().await?).await?;

        let mut rows = resp.json::<Vec<Message>>().await?;
        rows.pop()
            .ok_or_else(|| Error::Internal("Insert returned no row".to_string()))
    }

    /// Count messages visible to the actor
    pub async fn count_messages(&self, token: &str) -> Result<u64> {
        self.table_count(token, TABLE).await
    }
}
