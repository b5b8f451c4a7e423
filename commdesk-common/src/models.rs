//! Data models for CommDesk
//!
//! All persisted entities live in the hosted platform's tables; these
//! structs are the ephemeral view-model copies held during a session.

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Message channel tags used in `Message::sent_via`
pub const CHANNEL_EMAIL: &str = "email";
pub const CHANNEL_WHATSAPP: &str = "whatsapp";

/// Profile role, owned by the hosted auth platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// A row in the platform's `profiles` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A row in the platform's `contacts` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub created_by: Uuid,
}

/// Contact fields supplied by the caller when creating or updating
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewContact {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl NewContact {
    /// Validate before any network call: name is required, and at least
    /// one of email/phone must be present.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation("Contact name is required".to_string()));
        }
        let has_email = self.email.as_deref().is_some_and(|e| !e.trim().is_empty());
        let has_phone = self.phone.as_deref().is_some_and(|p| !p.trim().is_empty());
        if !has_email && !has_phone {
            return Err(Error::Validation(
                "Contact needs an email or a phone number".to_string(),
            ));
        }
        Ok(())
    }
}

/// Insert shape for the `contacts` table: caller fields plus the owner stamp
#[derive(Debug, Clone, Serialize)]
pub struct ContactInsert {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub created_by: Uuid,
}

/// Transient record produced by the import pipeline.
///
/// Exists only between parse and commit; empty string means the source
/// row had no usable value for that field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedContact {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl ImportedContact {
    /// Convert to the table insert shape, stamping the owner
    pub fn into_insert(self, created_by: Uuid) -> ContactInsert {
        ContactInsert {
            name: self.name,
            email: if self.email.is_empty() { None } else { Some(self.email) },
            phone: if self.phone.is_empty() { None } else { Some(self.phone) },
            created_by,
        }
    }
}

/// A row in the platform's `messages` table (append-only from this app)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub content: String,
    pub sent_at: DateTime<Utc>,
    pub sent_by: Uuid,
    #[serde(default)]
    pub recipients: Vec<Uuid>,
    #[serde(default)]
    pub sent_via: Vec<String>,
    pub status: String,
}

impl Message {
    /// Whether this message went out over the given channel tag
    pub fn sent_via_channel(&self, channel: &str) -> bool {
        self.sent_via.iter().any(|c| c == channel)
    }
}

/// Message fields supplied by the caller when sending
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMessage {
    pub content: String,
    pub recipients: Vec<Uuid>,
    pub sent_via: Vec<String>,
}

impl NewMessage {
    pub fn validate(&self) -> Result<()> {
        if self.content.trim().is_empty() {
            return Err(Error::Validation("Message content is required".to_string()));
        }
        if self.recipients.is_empty() {
            return Err(Error::Validation(
                "Message needs at least one recipient".to_string(),
            ));
        }
        Ok(())
    }
}

/// Insert shape for the `messages` table
#[derive(Debug, Clone, Serialize)]
pub struct MessageInsert {
    pub content: String,
    pub sent_by: Uuid,
    pub recipients: Vec<Uuid>,
    pub sent_via: Vec<String>,
    pub status: String,
}

/// Dashboard counters plus the most recent messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub contacts: u64,
    pub messages: u64,
    pub email_messages: u64,
    pub whatsapp_messages: u64,
    /// Only populated when the actor is an admin
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<u64>,
    pub recent_messages: Vec<Message>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(name: &str, email: Option<&str>, phone: Option<&str>) -> NewContact {
        NewContact {
            name: name.to_string(),
            email: email.map(String::from),
            phone: phone.map(String::from),
        }
    }

    #[test]
    fn contact_without_any_channel_fails_validation() {
        assert!(contact("Ann", None, None).validate().is_err());
        assert!(contact("Ann", Some(""), Some("  ")).validate().is_err());
    }

    #[test]
    fn contact_with_one_channel_passes() {
        assert!(contact("Ann", Some("ann@example.com"), None).validate().is_ok());
        assert!(contact("Ann", None, Some("+1555")).validate().is_ok());
    }

    #[test]
    fn contact_without_name_fails() {
        assert!(contact("  ", Some("ann@example.com"), None).validate().is_err());
    }

    #[test]
    fn imported_contact_insert_maps_empty_to_none() {
        let owner = Uuid::new_v4();
        let insert = ImportedContact {
            name: "Cy".to_string(),
            email: String::new(),
            phone: "12345".to_string(),
        }
        .into_insert(owner);

        assert_eq!(insert.name, "Cy");
        assert!(insert.email.is_none());
        assert_eq!(insert.phone.as_deref(), Some("12345"));
        assert_eq!(insert.created_by, owner);
    }

    #[test]
    fn message_channel_membership() {
        let msg = Message {
            id: Uuid::new_v4(),
            content: "hi".to_string(),
            sent_at: Utc::now(),
            sent_by: Uuid::new_v4(),
            recipients: vec![],
            sent_via: vec![CHANNEL_EMAIL.to_string()],
            status: "sent".to_string(),
        };
        assert!(msg.sent_via_channel(CHANNEL_EMAIL));
        assert!(!msg.sent_via_channel(CHANNEL_WHATSAPP));
    }
}
