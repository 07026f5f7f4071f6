use pal_core::{ErrorPayload, TransportError};
use thiserror::Error;

pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTRATION_FAILED: &str = "Registration failed";
pub const LOGOUT_FAILED: &str = "Logout failed";

#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The server refused the request (bad credentials, duplicate account,
    /// expired session). `message` is the payload's message or the
    /// operation's generic default.
    #[error("{message}")]
    Rejected {
        status: u16,
        payload: ErrorPayload,
        message: String,
    },

    /// The request did not get a usable answer.
    #[error("{fallback}: {reason}")]
    Transport {
        reason: String,
        fallback: &'static str,
    },

    /// The answer arrived after the session manager was shut down.
    #[error("session manager shut down before the server answered")]
    Discarded,
}

impl AuthError {
    /// Convert a transport failure, using `fallback` when the server gave no message.
    #[must_use]
    pub fn from_transport(error: TransportError, fallback: &'static str) -> Self {
        match error {
            TransportError::Api { status, payload } => {
                let message = payload.message().unwrap_or_else(|| fallback.to_string());
                Self::Rejected {
                    status,
                    payload,
                    message,
                }
            }
            TransportError::Network(reason) | TransportError::Parse(reason) => {
                Self::Transport { reason, fallback }
            }
        }
    }

    /// Message to show next to the form.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Rejected { message, .. } => message.clone(),
            Self::Transport { fallback, .. } => (*fallback).to_string(),
            Self::Discarded => self.to_string(),
        }
    }

    #[must_use]
    pub const fn payload(&self) -> Option<&ErrorPayload> {
        match self {
            Self::Rejected { payload, .. } => Some(payload),
            Self::Transport { .. } | Self::Discarded => None,
        }
    }
}
