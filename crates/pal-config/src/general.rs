//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default number of exchanges shown by `pal chat history`.
const fn default_history_limit() -> u32 {
    50
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Maximum exchanges printed by history listings (0 = all).
    #[serde(default = "default_history_limit")]
    pub history_limit: u32,

    /// Hide the "Thinking..." spinner shown while a reply is in flight.
    #[serde(default)]
    pub no_spinner: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            no_spinner: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.history_limit, 50);
        assert!(!config.no_spinner);
    }
}
