//! Client routes.
//!
//! The web client this models had four views. The CLI keeps the same names so
//! the access guard can reason about "protected" and "anonymous-only" views.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Landing,
    Login,
    Register,
    Chat,
}

impl Route {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Chat => "/chat",
        }
    }

    /// Views that require an authenticated session.
    #[must_use]
    pub const fn is_protected(self) -> bool {
        matches!(self, Self::Chat)
    }

    /// Views that only make sense while logged out.
    #[must_use]
    pub const fn is_anonymous_only(self) -> bool {
        matches!(self, Self::Landing | Self::Login | Self::Register)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_end_matches('/') {
            "" | "landing" => Ok(Self::Landing),
            "/login" | "login" => Ok(Self::Login),
            "/register" | "register" => Ok(Self::Register),
            "/chat" | "chat" => Ok(Self::Chat),
            other => Err(format!("unknown route '{other}'")),
        }
    }
}
