//! Shared HTTP response helpers.
//!
//! Centralizes status-code checks (non-success → [`TransportError::Api`] with
//! the body parsed as an [`ErrorPayload`]) and reqwest error mapping so the
//! endpoint modules stay focused on request construction.

use pal_core::{ErrorPayload, TransportError};

/// Check an HTTP response for a non-success status.
///
/// Returns the response unchanged on success. Otherwise reads the body and
/// returns [`TransportError::Api`]; a body that is not JSON gives an empty
/// payload. 401 responses are logged since they usually mean the session
/// cookie expired.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, TransportError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    if status == reqwest::StatusCode::UNAUTHORIZED {
        tracing::warn!(url = %resp.url(), "unauthorized access");
    }

    let body = resp.text().await.unwrap_or_default();
    Err(TransportError::Api {
        status: status.as_u16(),
        payload: ErrorPayload::from_body(&body),
    })
}

/// Map a reqwest failure onto the transport taxonomy.
pub fn map_reqwest(error: &reqwest::Error) -> TransportError {
    if error.is_decode() {
        TransportError::Parse(error.to_string())
    } else {
        TransportError::Network(error.to_string())
    }
}
