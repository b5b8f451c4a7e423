//! Dashboard stats handler
//!
//! Read-then-reduce: fetch the contact count, every message, and (for
//! admins) the user count, then compute the display counters in one pure
//! pass. No caching: every call re-fetches from the platform.

use axum::{extract::State, Extension, Json};
use commdesk_common::models::{DashboardStats, Message, CHANNEL_EMAIL, CHANNEL_WHATSAPP};

use super::{ApiError, Session};
use crate::AppState;

/// Number of recent messages shown on the dashboard
const RECENT_MESSAGES: usize = 5;

/// GET /api/dashboard
pub async fn get_dashboard(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<DashboardStats>, ApiError> {
    let contacts = state.platform.count_contacts(&session.token).await?;
    let messages = state.platform.list_messages(&session.token).await?;

    // User count is an admin-only panel
    let users = if session.role.is_admin() {
        Some(state.platform.count_profiles(&session.token).await?)
    } else {
        None
    };

    Ok(Json(compute_stats(contacts, users, messages)))
}

/// Pure reduction over the fetched collections.
///
/// Channel counts are membership filters over `sent_via`; recent messages
/// are the five newest by send time, descending.
pub fn compute_stats(
    contact_count: u64,
    user_count: Option<u64>,
    messages: Vec<Message>,
) -> DashboardStats {
    let email_messages = messages
        .iter()
        .filter(|m| m.sent_via_channel(CHANNEL_EMAIL))
        .count() as u64;
    let whatsapp_messages = messages
        .iter()
        .filter(|m| m.sent_via_channel(CHANNEL_WHATSAPP))
        .count() as u64;
    let total = messages.len() as u64;

    let mut recent_messages = messages;
    recent_messages.sort_by(|a, b| b.sent_at.cmp(&a.sent_at));
    recent_messages.truncate(RECENT_MESSAGES);

    DashboardStats {
        contacts: contact_count,
        messages: total,
        email_messages,
        whatsapp_messages,
        users: user_count,
        recent_messages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn message(minutes_ago: i64, via: &[&str]) -> Message {
        Message {
            id: Uuid::new_v4(),
            content: "hello".to_string(),
            sent_at: Utc::now() - Duration::minutes(minutes_ago),
            sent_by: Uuid::new_v4(),
            recipients: vec![Uuid::new_v4()],
            sent_via: via.iter().map(|s| s.to_string()).collect(),
            status: "sent".to_string(),
        }
    }

    #[test]
    fn channel_counts_match_membership_filters() {
        let messages = vec![
            message(1, &["email"]),
            message(2, &["whatsapp"]),
            message(3, &["email", "whatsapp"]),
            message(4, &[]),
        ];
        let stats = compute_stats(10, Some(3), messages);

        assert_eq!(stats.contacts, 10);
        assert_eq!(stats.messages, 4);
        assert_eq!(stats.email_messages, 2);
        assert_eq!(stats.whatsapp_messages, 2);
        assert_eq!(stats.users, Some(3));
    }

    #[test]
    fn recent_messages_are_newest_five_descending() {
        let messages: Vec<Message> = (0..8).map(|i| message(i, &["email"])).collect();
        let stats = compute_stats(0, None, messages);

        assert_eq!(stats.recent_messages.len(), 5);
        for pair in stats.recent_messages.windows(2) {
            assert!(pair[0].sent_at >= pair[1].sent_at);
        }
    }

    #[test]
    fn user_count_absent_for_non_admins() {
        let stats = compute_stats(0, None, vec![]);
        assert_eq!(stats.users, None);
        assert!(stats.recent_messages.is_empty());
    }
}
