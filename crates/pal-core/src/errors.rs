//! Cross-cutting error types for Palaver.
//!
//! Domain-specific errors (`AuthError`, `ConfigError`) are defined in their
//! respective crates. `TransportError` lives in [`crate::transport`] next to
//! the traits that return it.

use thiserror::Error;

/// Errors that can be raised by any Palaver crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// A state machine transition was attempted that is not allowed.
    #[error("Invalid state transition: {entity_type} {id} from {from} to {to}")]
    InvalidTransition {
        entity_type: String,
        id: String,
        from: String,
        to: String,
    },

    /// Data failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Form-level validation failures, caught before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must not be blank")]
    Blank { field: &'static str },

    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("Passwords don't match")]
    PasswordMismatch,
}
