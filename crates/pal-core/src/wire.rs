//! Records exchanged with the chatbot backend.
//!
//! Field names follow the backend's JSON (`message`, `response`,
//! `password_confirm`, ...). Everything the backend may omit is optional so a
//! partial reply still parses.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ValidationError;

/// Minimum password length accepted by the registration endpoint.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Identifier as it appears on the wire: integer primary keys or opaque strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Int(i64),
    Text(String),
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

/// A persisted chat exchange as serialized by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRecord {
    pub id: WireId,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of `POST chatbot/chat/`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

/// Login form.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Registration form.
#[derive(Clone, Serialize)]
pub struct Registration {
    pub email: String,
    pub username: String,
    pub password: String,
    pub password_confirm: String,
}

impl Registration {
    /// Form-level checks performed before the form is submitted.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found: a blank field, a password
    /// shorter than [`MIN_PASSWORD_LEN`], or a confirmation that does not match.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [("email", &self.email), ("username", &self.username)] {
            if value.trim().is_empty() {
                return Err(ValidationError::Blank { field });
            }
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            });
        }
        if self.password != self.password_confirm {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(())
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("email", &self.email)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Error body returned with a non-success status.
///
/// The backend answers with several shapes: `{"error": "..."}`,
/// `{"detail": "..."}`, or per-field lists such as
/// `{"non_field_errors": ["Invalid email or password"]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorPayload(Value);

impl ErrorPayload {
    #[must_use]
    pub const fn new(value: Value) -> Self {
        Self(value)
    }

    /// Parse a response body. Bodies that are not JSON give an empty payload.
    #[must_use]
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str(body).map_or_else(|_| Self::default(), Self)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match &self.0 {
            Value::Null => true,
            Value::Object(map) => map.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::String(text) => text.trim().is_empty(),
            Value::Bool(_) | Value::Number(_) => false,
        }
    }

    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    /// Message stored under `key`, either as a string or as the first string of a list.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<String> {
        self.0.get(key).and_then(first_text)
    }

    /// Best human-readable message in the payload.
    ///
    /// Looks at `error`, `message`, `detail` and `non_field_errors` first, then
    /// falls back to the first per-field entry rendered as `"field: message"`.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        if let Some(text) = first_text(&self.0) {
            return Some(text);
        }
        for key in ["error", "message", "detail", "non_field_errors"] {
            if let Some(text) = self.field(key) {
                return Some(text);
            }
        }
        self.0.as_object().and_then(|map| {
            map.iter()
                .find_map(|(key, value)| first_text(value).map(|text| format!("{key}: {text}")))
        })
    }
}

fn first_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Array(items) => items.iter().find_map(first_text),
        _ => None,
    }
}
