//! Field normalization for imported rows
//!
//! Maps heterogeneous row records onto the canonical {name, email, phone}
//! shape via a declarative alias table: one candidate-key list per
//! canonical field, evaluated uniformly and case-insensitively. This is a
//! best-effort mapping by design: it tolerates varied header spellings
//! from arbitrary spreadsheet sources at the cost of silently dropping
//! unmappable rows.

use commdesk_common::models::ImportedContact;
use tracing::debug;

use super::parse::RawRecord;

/// Candidate header keys per canonical field, in resolution order.
/// Matching is case-insensitive, so each candidate is stored lowercase.
const NAME_ALIASES: &[&str] = &["name", "contact", "full name", "contact name"];
const EMAIL_ALIASES: &[&str] = &["email", "e-mail", "mail"];
const PHONE_ALIASES: &[&str] = &["phone", "mobile", "whatsapp", "phone number", "tel"];

/// Normalize parsed rows, keeping only usable records.
///
/// A record is accepted iff its resolved name is non-empty AND at least
/// one of email/phone is non-empty. Rejected rows are dropped silently
/// (logged at debug level); only aggregate counts reach the user.
pub fn normalize(rows: Vec<RawRecord>) -> Vec<ImportedContact> {
    let mut accepted = Vec::new();
    for (index, row) in rows.into_iter().enumerate() {
        let record = ImportedContact {
            name: resolve_field(&row, NAME_ALIASES),
            email: resolve_field(&row, EMAIL_ALIASES),
            phone: resolve_field(&row, PHONE_ALIASES),
        };

        if record.name.is_empty() || (record.email.is_empty() && record.phone.is_empty()) {
            debug!(
                "Dropping import row {}: name='{}' email='{}' phone='{}'",
                index + 1,
                record.name,
                record.email,
                record.phone
            );
            continue;
        }
        accepted.push(record);
    }
    accepted
}

/// Resolve one canonical field: first candidate with a non-empty value
/// wins; default is the empty string.
fn resolve_field(row: &RawRecord, candidates: &[&str]) -> String {
    for candidate in candidates {
        let hit = row
            .iter()
            .find(|(key, _)| key.trim().eq_ignore_ascii_case(candidate))
            .map(|(_, value)| value.trim());
        if let Some(value) = hit {
            if !value.is_empty() {
                return value.to_string();
            }
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn accepted_records_always_have_name_and_a_channel() {
        let rows = vec![
            row(&[("name", "Ann"), ("email", "ann@example.com")]),
            row(&[("name", "Bob"), ("email", "")]),
            row(&[("name", ""), ("phone", "12345")]),
            row(&[("contact", "Cy"), ("mobile", "6789")]),
        ];
        let accepted = normalize(rows);
        assert_eq!(accepted.len(), 2);
        for record in &accepted {
            assert!(!record.name.is_empty());
            assert!(!record.email.is_empty() || !record.phone.is_empty());
        }
    }

    #[test]
    fn alias_matching_is_case_insensitive() {
        let upper = normalize(vec![row(&[("NAME", "Ann"), ("EMAIL", "ann@example.com")])]);
        let lower = normalize(vec![row(&[("name", "Ann"), ("email", "ann@example.com")])]);
        assert_eq!(upper, lower);
        assert_eq!(upper[0].email, "ann@example.com");
    }

    #[test]
    fn phone_resolves_from_whatsapp_header() {
        let accepted = normalize(vec![row(&[("Name", "Ann"), ("WhatsApp", "+1555")])]);
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].phone, "+1555");
    }

    #[test]
    fn first_non_empty_candidate_wins() {
        let accepted = normalize(vec![row(&[
            ("phone", ""),
            ("mobile", "111"),
            ("whatsapp", "222"),
            ("name", "Ann"),
        ])]);
        assert_eq!(accepted[0].phone, "111");
    }

    #[test]
    fn unmapped_headers_yield_empty_fields_and_drop_the_row() {
        let accepted = normalize(vec![row(&[("nombre", "Ann"), ("correo", "a@b.c")])]);
        assert!(accepted.is_empty());
    }
}
