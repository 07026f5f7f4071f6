//! Session persistence settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const fn default_persist_cookies() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Keep the server session cookies between CLI invocations.
    #[serde(default = "default_persist_cookies")]
    pub persist_cookies: bool,

    /// Override for the cookie file. Empty means `~/.palaver/cookies`.
    #[serde(default)]
    pub cookie_path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            persist_cookies: default_persist_cookies(),
            cookie_path: String::new(),
        }
    }
}

impl SessionConfig {
    /// Where cookies are persisted, or `None` when persistence is off or no
    /// home directory exists.
    #[must_use]
    pub fn cookie_file(&self) -> Option<PathBuf> {
        if !self.persist_cookies {
            return None;
        }
        if !self.cookie_path.trim().is_empty() {
            return Some(PathBuf::from(self.cookie_path.trim()));
        }
        dirs::home_dir().map(|home| home.join(".palaver").join("cookies"))
    }
}
