use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::wire::WireId;

/// Authenticated user as returned by the identity endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    #[serde(default)]
    pub id: Option<WireId>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Name to greet the user with. Falls back to the email address.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.username.is_empty() {
            &self.email
        } else {
            &self.username
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backend_profile() {
        let user: User = serde_json::from_str(
            r#"{"id": 7, "email": "ada@example.com", "username": "ada", "created_at": "2025-01-02T03:04:05Z"}"#,
        )
        .unwrap();
        assert_eq!(user.id, Some(WireId::Int(7)));
        assert_eq!(user.display_name(), "ada");
        assert!(user.created_at.is_some());
    }

    #[test]
    fn display_name_falls_back_to_email() {
        let user: User = serde_json::from_str(r#"{"email": "ada@example.com"}"#).unwrap();
        assert_eq!(user.display_name(), "ada@example.com");
    }
}
