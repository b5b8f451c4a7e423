//! Integration tests for the contact-import pipeline
//!
//! Drives the whole preview path (sniff → parse → normalize) over real
//! file bytes, the way an upload handler would.

use commdesk_ui::import::preview;

#[test]
fn json_file_yields_one_accepted_record() {
    let data = br#"[{"Name":"Ann","Phone":"+1555"}]"#;
    let result = preview("contacts.json", data).expect("preview should succeed");

    assert_eq!(result.total_rows, 1);
    assert_eq!(result.accepted.len(), 1);
    let record = &result.accepted[0];
    assert_eq!(record.name, "Ann");
    assert_eq!(record.email, "");
    assert_eq!(record.phone, "+1555");
}

#[test]
fn csv_row_without_any_channel_is_dropped() {
    let data = b"name,email\nBob,\n";
    let result = preview("contacts.csv", data).expect("preview should succeed");

    assert_eq!(result.total_rows, 1);
    assert!(result.accepted.is_empty());
}

#[test]
fn txt_file_with_phone_column_is_accepted() {
    let data = b"name,phone\nCy,12345\n";
    let result = preview("contacts.txt", data).expect("preview should succeed");

    assert_eq!(result.accepted.len(), 1);
    let record = &result.accepted[0];
    assert_eq!(record.name, "Cy");
    assert_eq!(record.phone, "12345");
}

#[test]
fn uppercase_headers_resolve_like_lowercase() {
    let upper = preview("a.csv", b"NAME,EMAIL\nAnn,ann@example.com\n").unwrap();
    let lower = preview("a.csv", b"name,email\nAnn,ann@example.com\n").unwrap();
    assert_eq!(upper.accepted, lower.accepted);
}

#[test]
fn unsupported_extension_aborts_before_parsing() {
    let err = preview("contacts.docx", b"irrelevant").unwrap_err();
    assert!(err.to_string().contains("Unsupported file type"));
}

#[test]
fn malformed_json_is_terminal_for_the_attempt() {
    assert!(preview("contacts.json", b"{\"not\":\"an array\"}").is_err());
    assert!(preview("contacts.json", b"not json at all").is_err());
}

#[test]
fn accepted_counts_are_aggregates_over_mixed_rows() {
    let data = b"name,email,phone\n\
        Ann,ann@example.com,\n\
        ,missing@example.com,\n\
        Bob,,\n\
        Cy,,12345\n";
    let result = preview("mixed.csv", data).expect("preview should succeed");

    assert_eq!(result.total_rows, 4);
    assert_eq!(result.accepted.len(), 2);
    for record in &result.accepted {
        assert!(!record.name.is_empty());
        assert!(!record.email.is_empty() || !record.phone.is_empty());
    }
}
