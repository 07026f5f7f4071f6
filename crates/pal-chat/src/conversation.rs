//! The ordered list of exchanges shown in the chat view.

use pal_core::{CoreError, Exchange, ExchangeId, ExchangeRecord};

/// Exchanges in display order, oldest first.
///
/// Nothing is ever removed. At most one exchange is pending at a time;
/// [`push_pending`](Self::push_pending) refuses a second one. A server
/// exchange appears at most once, keyed by its server id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    exchanges: Vec<Exchange>,
    /// History records that may be the pending exchange's own server copy,
    /// with their position in the history block. Merged once it settles.
    held: Vec<(usize, Exchange)>,
}

impl Conversation {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            exchanges: Vec::new(),
            held: Vec::new(),
        }
    }

    #[must_use]
    pub fn exchanges(&self) -> &[Exchange] {
        &self.exchanges
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    /// The exchange still waiting on the server, if any.
    #[must_use]
    pub fn pending(&self) -> Option<&Exchange> {
        self.exchanges.iter().find(|e| e.is_pending())
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending().is_some()
    }

    #[must_use]
    pub fn get(&self, id: &ExchangeId) -> Option<&Exchange> {
        self.exchanges.iter().find(|e| e.id() == id)
    }

    /// Whether some exchange already carries `server_id`.
    #[must_use]
    pub fn contains_server_id(&self, server_id: &str) -> bool {
        self.exchanges
            .iter()
            .any(|e| e.server_id() == Some(server_id))
    }

    /// Put loaded history in front of whatever was sent in this session.
    ///
    /// Records already shown under their server id are skipped. While a send
    /// is pending, records with the same user text are held back until it
    /// settles, since one of them may be the server's copy of it.
    pub fn prepend_history(&mut self, history: Vec<Exchange>) {
        let pending_text = self.pending().map(|e| e.user_text().to_string());
        let fresh: Vec<Exchange> = history
            .into_iter()
            .filter(|e| !e.server_id().is_some_and(|id| self.contains_server_id(id)))
            .collect();
        let mut shown = Vec::with_capacity(fresh.len());
        for (index, exchange) in fresh.into_iter().enumerate() {
            if pending_text.as_deref() == Some(exchange.user_text()) {
                self.held.push((index, exchange));
            } else {
                shown.push(exchange);
            }
        }
        let sent = std::mem::replace(&mut self.exchanges, shown);
        self.exchanges.extend(sent);
    }

    /// Merge held-back history now that nothing is pending. A record with the
    /// settled exchange's server id is the same exchange and is not added.
    fn release_held(&mut self, settled_server_id: Option<&str>) {
        let mut skipped = 0;
        for (index, exchange) in std::mem::take(&mut self.held) {
            if exchange.server_id().is_some() && exchange.server_id() == settled_server_id {
                skipped += 1;
                continue;
            }
            self.exchanges.insert(index - skipped, exchange);
        }
    }

    /// Append an optimistic exchange for `text` and return its local id.
    ///
    /// Returns `None` if another exchange is still pending.
    pub fn push_pending(&mut self, text: &str) -> Option<ExchangeId> {
        if self.has_pending() {
            return None;
        }
        let exchange = Exchange::pending(text);
        let id = exchange.id().clone();
        self.exchanges.push(exchange);
        Some(id)
    }

    /// Reconcile the pending exchange `id` with the server's reply.
    ///
    /// History held back while it was pending is merged, minus the server's
    /// copy of this exchange.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] for an unknown id and
    /// [`CoreError::InvalidTransition`] if the exchange already settled.
    pub fn complete(&mut self, id: &ExchangeId, record: ExchangeRecord) -> Result<&Exchange, CoreError> {
        let position = self.position(id)?;
        self.exchanges[position].complete(record)?;
        let server_id = self.exchanges[position].server_id().map(str::to_string);
        self.release_held(server_id.as_deref());
        self.get(id).ok_or_else(|| not_found(id))
    }

    /// Mark the pending exchange `id` as failed with `message` as the bot turn.
    ///
    /// # Errors
    ///
    /// Same as [`complete`](Self::complete).
    pub fn fail(&mut self, id: &ExchangeId, message: &str) -> Result<&Exchange, CoreError> {
        let position = self.position(id)?;
        self.exchanges[position].fail(message)?;
        self.release_held(None);
        self.get(id).ok_or_else(|| not_found(id))
    }

    fn position(&self, id: &ExchangeId) -> Result<usize, CoreError> {
        self.exchanges
            .iter()
            .position(|e| e.id() == id)
            .ok_or_else(|| not_found(id))
    }
}

fn not_found(id: &ExchangeId) -> CoreError {
    CoreError::NotFound {
        entity_type: "exchange".into(),
        id: id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pal_core::ExchangePhase;
    use pal_core::wire::WireId;
    use pretty_assertions::assert_eq;

    fn record(id: i64, message: &str, response: &str) -> ExchangeRecord {
        ExchangeRecord {
            id: WireId::Int(id),
            message: Some(message.into()),
            response: Some(response.into()),
            created_at: None,
        }
    }

    #[test]
    fn second_pending_is_refused() {
        let mut conversation = Conversation::new();
        assert!(conversation.push_pending("one").is_some());
        assert!(conversation.push_pending("two").is_none());
        assert_eq!(conversation.len(), 1);
    }

    #[test]
    fn settling_reopens_the_gate() {
        let mut conversation = Conversation::new();
        let id = conversation.push_pending("one").unwrap();
        conversation.fail(&id, "boom").unwrap();
        assert!(!conversation.has_pending());
        assert!(conversation.push_pending("two").is_some());
        assert_eq!(conversation.len(), 2);
    }

    #[test]
    fn complete_updates_in_place() {
        let mut conversation = Conversation::new();
        conversation.prepend_history(vec![Exchange::from_record(record(1, "a", "b"))]);
        let id = conversation.push_pending("hello").unwrap();

        let done = conversation.complete(&id, record(7, "hello", "hi")).unwrap();
        assert_eq!(done.phase(), ExchangePhase::Completed);

        let last = conversation.exchanges().last().unwrap();
        assert_eq!(last.id(), &id);
        assert_eq!(last.bot_text(), Some("hi"));
        assert_eq!(conversation.len(), 2);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let mut conversation = Conversation::new();
        let err = conversation
            .fail(&ExchangeId::local(), "boom")
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }

    #[test]
    fn history_goes_before_local_sends() {
        let mut conversation = Conversation::new();
        let id = conversation.push_pending("fresh").unwrap();
        conversation.prepend_history(vec![
            Exchange::from_record(record(1, "old", "a")),
            Exchange::from_record(record(2, "older", "b")),
        ]);

        let texts: Vec<&str> = conversation.exchanges().iter().map(Exchange::user_text).collect();
        assert_eq!(texts, vec!["old", "older", "fresh"]);
        assert_eq!(conversation.pending().map(Exchange::id), Some(&id));
    }

    #[test]
    fn history_already_shown_is_skipped() {
        let mut conversation = Conversation::new();
        let id = conversation.push_pending("hello").unwrap();
        conversation.complete(&id, record(5, "hello", "hi")).unwrap();

        conversation.prepend_history(vec![
            Exchange::from_record(record(4, "earlier", "a")),
            Exchange::from_record(record(5, "hello", "hi")),
        ]);

        let ids: Vec<Option<&str>> = conversation.exchanges().iter().map(Exchange::server_id).collect();
        assert_eq!(ids, vec![Some("4"), Some("5")]);
        assert_eq!(conversation.exchanges()[1].id(), &id);
    }

    #[test]
    fn held_history_keeps_its_order_after_failure() {
        let mut conversation = Conversation::new();
        let id = conversation.push_pending("hello").unwrap();
        conversation.prepend_history(vec![
            Exchange::from_record(record(1, "hello", "first hello")),
            Exchange::from_record(record(2, "other", "b")),
            Exchange::from_record(record(3, "hello", "second hello")),
        ]);
        assert_eq!(conversation.len(), 2);

        conversation.fail(&id, "boom").unwrap();

        let ids: Vec<String> = conversation.exchanges().iter().map(|e| e.id().to_string()).collect();
        assert_eq!(ids, vec!["1".to_string(), "2".into(), "3".into(), id.to_string()]);
    }
}
