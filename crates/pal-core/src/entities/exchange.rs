use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::enums::ExchangePhase;
use crate::errors::CoreError;
use crate::ids::ExchangeId;
use crate::wire::ExchangeRecord;

/// One user message and the bot's turn that answers it.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Exchange {
    id: ExchangeId,
    server_id: Option<String>,
    user_text: String,
    bot_text: Option<String>,
    phase: ExchangePhase,
    created_at: DateTime<Utc>,
}

impl Exchange {
    /// Optimistic placeholder for a message that has not reached the server yet.
    #[must_use]
    pub fn pending(user_text: impl Into<String>) -> Self {
        Self {
            id: ExchangeId::local(),
            server_id: None,
            user_text: user_text.into(),
            bot_text: None,
            phase: ExchangePhase::Pending,
            created_at: Utc::now(),
        }
    }

    /// Exchange loaded from persisted history. Always `completed`.
    #[must_use]
    pub fn from_record(record: ExchangeRecord) -> Self {
        let server_id = record.id.to_string();
        Self {
            id: ExchangeId::server(server_id.clone()),
            server_id: Some(server_id),
            user_text: record.message.unwrap_or_default(),
            bot_text: Some(record.response.unwrap_or_default()),
            phase: ExchangePhase::Completed,
            created_at: record.created_at.unwrap_or_else(Utc::now),
        }
    }

    /// Reconcile a pending exchange with the server's reply.
    ///
    /// Only the bot text, the server id and the server timestamp are taken from
    /// the record. The local id and the user text stay as they were.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] if the exchange is not pending.
    pub fn complete(&mut self, record: ExchangeRecord) -> Result<(), CoreError> {
        self.transition(ExchangePhase::Completed)?;
        self.server_id = Some(record.id.to_string());
        self.bot_text = Some(record.response.unwrap_or_default());
        if let Some(created_at) = record.created_at {
            self.created_at = created_at;
        }
        Ok(())
    }

    /// Mark a pending exchange as failed, with `message` standing in for the bot turn.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] if the exchange is not pending.
    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), CoreError> {
        self.transition(ExchangePhase::Failed)?;
        self.bot_text = Some(message.into());
        Ok(())
    }

    fn transition(&mut self, next: ExchangePhase) -> Result<(), CoreError> {
        if !self.phase.can_transition_to(next) {
            return Err(CoreError::InvalidTransition {
                entity_type: "exchange".into(),
                id: self.id.to_string(),
                from: self.phase.to_string(),
                to: next.to_string(),
            });
        }
        self.phase = next;
        Ok(())
    }

    #[must_use]
    pub const fn id(&self) -> &ExchangeId {
        &self.id
    }

    #[must_use]
    pub fn server_id(&self) -> Option<&str> {
        self.server_id.as_deref()
    }

    #[must_use]
    pub fn user_text(&self) -> &str {
        &self.user_text
    }

    #[must_use]
    pub fn bot_text(&self) -> Option<&str> {
        self.bot_text.as_deref()
    }

    #[must_use]
    pub const fn phase(&self) -> ExchangePhase {
        self.phase
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self.phase, ExchangePhase::Pending)
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
