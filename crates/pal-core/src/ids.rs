//! Exchange identifiers.
//!
//! Optimistic inserts get a locally generated id (`local-<16 hex>`). Exchanges
//! loaded from history reuse the server id. Both live in the same
//! [`ExchangeId`] space; local ids never collide with server ids because of the
//! prefix.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Prefix for ids minted on the client.
pub const PREFIX_LOCAL: &str = "local";

static FALLBACK_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Identifier of an [`Exchange`](crate::Exchange) within a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExchangeId(String);

impl ExchangeId {
    /// Mint a fresh client-side id.
    ///
    /// Uses 8 random bytes from the OS. If the OS source is unavailable, falls
    /// back to a process-wide counter, which is still unique within the process.
    #[must_use]
    pub fn local() -> Self {
        let mut bytes = [0u8; 8];
        let suffix = match getrandom::fill(&mut bytes) {
            Ok(()) => bytes.iter().map(|b| format!("{b:02x}")).collect::<String>(),
            Err(_) => format!("{:016x}", FALLBACK_COUNTER.fetch_add(1, Ordering::Relaxed)),
        };
        Self(format!("{PREFIX_LOCAL}-{suffix}"))
    }

    /// Wrap an id assigned by the server.
    #[must_use]
    pub fn server(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn is_local(&self) -> bool {
        self.0
            .strip_prefix(PREFIX_LOCAL)
            .is_some_and(|rest| rest.starts_with('-'))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExchangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn local_ids_have_prefix_and_hex_suffix() {
        let id = ExchangeId::local();
        assert!(id.is_local());
        let suffix = id.as_str().trim_start_matches("local-");
        assert_eq!(suffix.len(), 16);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn local_ids_are_unique() {
        let ids: HashSet<ExchangeId> = (0..256).map(|_| ExchangeId::local()).collect();
        assert_eq!(ids.len(), 256);
    }

    #[test]
    fn server_ids_are_not_local() {
        assert!(!ExchangeId::server("42").is_local());
        assert!(!ExchangeId::server("localhost").is_local());
    }
}
