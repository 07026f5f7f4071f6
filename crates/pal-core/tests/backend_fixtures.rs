//! Parse realistic backend payloads into core types.

use pal_core::{Exchange, ExchangePhase, ExchangeRecord, User};
use pretty_assertions::assert_eq;

const HISTORY: &str = r#"[
    {"id": 12, "message": "and in Rust?", "response": "Use `Vec::reverse`.", "created_at": "2025-05-02T09:00:05Z"},
    {"id": 11, "message": "how do I reverse a list?", "response": "Call `reverse()`.", "created_at": "2025-05-02T09:00:00Z"}
]"#;

const PROFILE: &str = r#"{
    "id": 3,
    "email": "grace@example.com",
    "username": "grace",
    "created_at": "2025-04-30T12:00:00.123456Z"
}"#;

#[test]
fn history_fixture_parses_into_completed_exchanges() {
    let records: Vec<ExchangeRecord> = serde_json::from_str(HISTORY).expect("history parses");
    let exchanges: Vec<Exchange> = records.into_iter().map(Exchange::from_record).collect();

    assert_eq!(exchanges.len(), 2);
    assert!(exchanges.iter().all(|e| e.phase() == ExchangePhase::Completed));
    assert_eq!(exchanges[0].server_id(), Some("12"));
    assert_eq!(exchanges[1].user_text(), "how do I reverse a list?");
    assert!(exchanges[0].created_at() > exchanges[1].created_at());
}

#[test]
fn profile_fixture_parses_with_fractional_timestamp() {
    let user: User = serde_json::from_str(PROFILE).expect("profile parses");
    assert_eq!(user.display_name(), "grace");
    assert_eq!(user.email, "grace@example.com");
    assert!(user.created_at.is_some());
}

#[test]
fn profile_ignores_unknown_fields() {
    let user: User =
        serde_json::from_str(r#"{"username": "grace", "is_staff": true}"#).expect("parses");
    assert_eq!(user.display_name(), "grace");
}
