use serde::Serialize;

use crate::entities::User;
use crate::enums::SessionStatus;

/// Client-side session: who is logged in, and how sure we are about it.
///
/// `status == Authenticated` iff `user` is present. The constructors are the
/// only way to build a `Session`, and each sets both fields together.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct Session {
    status: SessionStatus,
    user: Option<User>,
}

impl Session {
    #[must_use]
    pub const fn unknown() -> Self {
        Self {
            status: SessionStatus::Unknown,
            user: None,
        }
    }

    #[must_use]
    pub const fn checking() -> Self {
        Self {
            status: SessionStatus::Checking,
            user: None,
        }
    }

    #[must_use]
    pub const fn authenticated(user: User) -> Self {
        Self {
            status: SessionStatus::Authenticated,
            user: Some(user),
        }
    }

    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            status: SessionStatus::Anonymous,
            user: None,
        }
    }

    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self.status, SessionStatus::Authenticated)
    }
}
