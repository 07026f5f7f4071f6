//! Transport traits the session and conversation controllers are generic over.
//!
//! `pal-http` provides the reqwest implementation; tests provide scripted fakes.
//! Credentials (cookies) are the transport's business: the controllers only
//! ever see a `User`, an `ExchangeRecord`, or a [`TransportError`].

use std::future::Future;
use std::sync::Arc;

use thiserror::Error;

use crate::entities::User;
use crate::wire::{Credentials, ErrorPayload, ExchangeRecord, Registration};

/// Failure of a remote call.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The request never produced an HTTP response (DNS, connect, timeout, ...).
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("API error ({status}){}", .payload.message().map(|m| format!(": {m}")).unwrap_or_default())]
    Api { status: u16, payload: ErrorPayload },

    /// The server answered successfully but the body did not parse.
    #[error("parse error: {0}")]
    Parse(String),
}

impl TransportError {
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Network(_) | Self::Parse(_) => None,
        }
    }

    #[must_use]
    pub const fn payload(&self) -> Option<&ErrorPayload> {
        match self {
            Self::Api { payload, .. } => Some(payload),
            Self::Network(_) | Self::Parse(_) => None,
        }
    }

    /// 401 or 403: the server does not recognise the session.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

/// Order in which a transport delivers persisted history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

/// Identity and authentication endpoints.
pub trait AuthTransport {
    /// "Who am I" check for the current session.
    fn get_profile(&self) -> impl Future<Output = Result<User, TransportError>> + Send;

    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<User, TransportError>> + Send;

    fn register(
        &self,
        registration: &Registration,
    ) -> impl Future<Output = Result<User, TransportError>> + Send;

    fn logout(&self) -> impl Future<Output = Result<(), TransportError>> + Send;
}

/// Chatbot endpoints.
pub trait ChatTransport {
    fn send_message(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<ExchangeRecord, TransportError>> + Send;

    fn get_history(&self) -> impl Future<Output = Result<Vec<ExchangeRecord>, TransportError>> + Send;

    /// Order of [`get_history`](Self::get_history) results.
    fn history_order(&self) -> HistoryOrder {
        HistoryOrder::NewestFirst
    }
}

impl<T: AuthTransport + Send + Sync> AuthTransport for Arc<T> {
    fn get_profile(&self) -> impl Future<Output = Result<User, TransportError>> + Send {
        (**self).get_profile()
    }

    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<User, TransportError>> + Send {
        (**self).login(credentials)
    }

    fn register(
        &self,
        registration: &Registration,
    ) -> impl Future<Output = Result<User, TransportError>> + Send {
        (**self).register(registration)
    }

    fn logout(&self) -> impl Future<Output = Result<(), TransportError>> + Send {
        (**self).logout()
    }
}

impl<T: ChatTransport + Send + Sync> ChatTransport for Arc<T> {
    fn send_message(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<ExchangeRecord, TransportError>> + Send {
        (**self).send_message(text)
    }

    fn get_history(&self) -> impl Future<Output = Result<Vec<ExchangeRecord>, TransportError>> + Send {
        (**self).get_history()
    }

    fn history_order(&self) -> HistoryOrder {
        (**self).history_order()
    }
}
