//! Contacts table operations
//!
//! Write paths require `created_by` to equal the acting identity; the
//! platform's row policies enforce that, not this code.

use super::{check, PlatformClient};
use crate::models::{Contact, ContactInsert, NewContact};
use crate::{Error, Result};
use uuid::Uuid;

const TABLE: &str = "contacts";

impl PlatformClient {
    /// Fetch the actor's contacts, newest first
    pub async fn list_contacts(&self, token: &str) -> Result<Vec<Contact>> {
        let req = self.with_auth(
            self.http
                .get(self.table_url(TABLE))
                .query(&[("select", "*"), ("order", "created_at.desc")]),
            token,
        );
        let resp = check(req.send().await?).await?;
        Ok(resp.json::<Vec<Contact>>().await?)
    }

    /// Insert a single contact and return the stored row
    pub async fn insert_contact(&self, token: &str, contact: &ContactInsert) -> Result<Contact> {
        let req = self
            .with_auth(self.http.post(self.table_url(TABLE)), token)
            .header("Prefer", "return=representation")
            .json(contact);
        let resp = check(req.send().await?).await?;

        let mut rows = resp.json::<Vec<Contact>>().await?;
        rows.pop()
            .ok_or_else(|| Error::Internal("Insert returned no row".to_string()))
    }

    /// Insert a batch of contacts in a single request.
    ///
    /// The platform executes the batch as one statement: a constraint
    /// violation on any row aborts the entire batch. No retry, no
    /// per-row result. Returns the number of rows written.
    pub async fn insert_contacts(&self, token: &str, contacts: &[ContactInsert]) -> Result<usize> {
        if contacts.is_empty() {
            return Ok(0);
        }
        let req = self
            .with_auth(self.http.post(self.table_url(TABLE)), token)
            .header("Prefer", "return=minimal")
            .json(contacts);
        check(req.send().await?).await?;
        Ok(contacts.len())
    }

    /// Update a contact's caller-editable fields
    pub async fn update_contact(
        &self,
        token: &str,
        id: Uuid,
        fields: &NewContact,
    ) -> Result<Contact> {
        let req = self
            .with_auth(self.http.patch(self.table_url(TABLE)), token)
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation")
            .json(fields);
        let resp = check(req.send().await?).await?;

        let mut rows = resp.json::<Vec<Contact>>().await?;
        rows.pop()
            .ok_or_else(|| Error::NotFound(format!("Contact {}", id)))
    }

    /// Delete a contact
    pub async fn delete_contact(&self, token: &str, id: Uuid) -> Result<()> {
        let req = self
            .with_auth(self.http.delete(self.table_url(TABLE)), token)
            .query(&[("id", format!("eq.{}", id))]);
        check(req.send().await?).await?;
        Ok(())
    }

    /// Count the actor's contacts
    pub async fn count_contacts(&self, token: &str) -> Result<u64> {
        self.table_count(token, TABLE).await
    }
}
