//! Status enums for the session and conversation state machines.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! Status enums provide `allowed_next_states()` to enforce valid transitions at
//! the controller layer.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// SessionStatus
// ---------------------------------------------------------------------------

/// Status of the client-side session.
///
/// ```text
/// unknown → checking → authenticated ⇄ anonymous
///                ↑__________|______________|   (re-check)
/// ```
///
/// There is no terminal state; the machine runs for the lifetime of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Unknown,
    Checking,
    Authenticated,
    Anonymous,
}

impl SessionStatus {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Unknown => &[Self::Checking],
            Self::Checking => &[Self::Authenticated, Self::Anonymous],
            Self::Anonymous => &[Self::Authenticated, Self::Checking],
            Self::Authenticated => &[Self::Anonymous, Self::Checking],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// Whether the identity check has produced an answer yet.
    #[must_use]
    pub const fn is_resolved(self) -> bool {
        matches!(self, Self::Authenticated | Self::Anonymous)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Checking => "checking",
            Self::Authenticated => "authenticated",
            Self::Anonymous => "anonymous",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ExchangePhase
// ---------------------------------------------------------------------------

/// Phase of a single chat exchange.
///
/// ```text
/// pending → completed
///         → failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExchangePhase {
    Pending,
    Completed,
    Failed,
}

impl ExchangePhase {
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Completed, Self::Failed],
            Self::Completed | Self::Failed => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        self.allowed_next_states().is_empty()
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for ExchangePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn session_starts_unknown() {
        assert_eq!(SessionStatus::default(), SessionStatus::Unknown);
    }

    #[test]
    fn unknown_only_moves_to_checking() {
        assert_eq!(
            SessionStatus::Unknown.allowed_next_states(),
            &[SessionStatus::Checking]
        );
        assert!(!SessionStatus::Unknown.can_transition_to(SessionStatus::Authenticated));
    }

    #[test]
    fn checking_resolves_either_way() {
        assert!(SessionStatus::Checking.can_transition_to(SessionStatus::Authenticated));
        assert!(SessionStatus::Checking.can_transition_to(SessionStatus::Anonymous));
        assert!(!SessionStatus::Checking.is_resolved());
    }

    #[test]
    fn session_has_no_terminal_state() {
        for status in [
            SessionStatus::Unknown,
            SessionStatus::Checking,
            SessionStatus::Authenticated,
            SessionStatus::Anonymous,
        ] {
            assert!(!status.allowed_next_states().is_empty(), "{status} is terminal");
        }
    }

    #[test]
    fn pending_is_the_only_open_phase() {
        assert!(ExchangePhase::Pending.can_transition_to(ExchangePhase::Completed));
        assert!(ExchangePhase::Pending.can_transition_to(ExchangePhase::Failed));
        assert!(ExchangePhase::Completed.is_terminal());
        assert!(ExchangePhase::Failed.is_terminal());
        assert!(!ExchangePhase::Failed.can_transition_to(ExchangePhase::Pending));
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&SessionStatus::Authenticated).unwrap();
        assert_eq!(json, "\"authenticated\"");
        let phase: ExchangePhase = serde_json::from_str("\"failed\"").unwrap();
        assert_eq!(phase, ExchangePhase::Failed);
    }
}
