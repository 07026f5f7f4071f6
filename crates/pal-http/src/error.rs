//! Client construction errors.
//!
//! Failures of individual calls are `pal_core::TransportError`; this type only
//! covers building the client.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The configured base URL does not parse.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// reqwest refused the builder settings.
    #[error("HTTP client build failed: {0}")]
    Build(#[from] reqwest::Error),

    /// Reading or writing the persisted cookie file failed.
    #[error("cookie store error: {0}")]
    CookieStore(String),
}
