//! Optimistic send lifecycle over a [`ChatTransport`].

use pal_core::{ChatTransport, Exchange, ExchangeId, ExchangeRecord, HistoryOrder, TransportError};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::conversation::Conversation;

/// Bot turn shown when a send fails without a server-provided message.
pub const SEND_FAILED: &str = "Failed to send message. Please try again.";

/// Where the one-shot history load stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HistoryState {
    #[default]
    NotLoaded,
    Loading,
    Loaded,
    Failed(String),
}

/// Receipt for an exchange inserted by [`ConversationController::begin_send`].
///
/// Hand it back to [`ConversationController::complete_send`] together with the
/// transport result. Not `Clone`: one ticket settles one exchange.
#[derive(Debug, PartialEq, Eq)]
pub struct PendingSend {
    id: ExchangeId,
    text: String,
}

impl PendingSend {
    #[must_use]
    pub const fn id(&self) -> &ExchangeId {
        &self.id
    }

    /// Trimmed text to send.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Bot text for a failed send: the payload's `error`, then `detail`, then [`SEND_FAILED`].
#[must_use]
pub fn failure_message(error: &TransportError) -> String {
    error
        .payload()
        .and_then(|payload| payload.field("error").or_else(|| payload.field("detail")))
        .unwrap_or_else(|| SEND_FAILED.to_string())
}

/// Owns the [`Conversation`] and the input buffer.
pub struct ConversationController<T> {
    transport: T,
    conversation: Conversation,
    history: HistoryState,
    draft: String,
    updates: watch::Sender<Vec<Exchange>>,
    cancel: CancellationToken,
}

impl<T: ChatTransport> ConversationController<T> {
    #[must_use]
    pub fn new(transport: T) -> Self {
        let (updates, _) = watch::channel(Vec::new());
        Self {
            transport,
            conversation: Conversation::new(),
            history: HistoryState::NotLoaded,
            draft: String::new(),
            updates,
            cancel: CancellationToken::new(),
        }
    }

    #[must_use]
    pub fn exchanges(&self) -> &[Exchange] {
        self.conversation.exchanges()
    }

    #[must_use]
    pub const fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    #[must_use]
    pub const fn history_state(&self) -> &HistoryState {
        &self.history
    }

    #[must_use]
    pub fn is_sending(&self) -> bool {
        self.conversation.has_pending()
    }

    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Receiver that sees every change to the exchange list.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Exchange>> {
        self.updates.subscribe()
    }

    #[must_use]
    pub fn cancel_handle(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Drop in-flight work. Late results, and later `complete_send` calls, are ignored.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    #[must_use]
    pub fn is_shut_down(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Fetch persisted history, oldest first.
    ///
    /// Runs once; after a successful load further calls return the current
    /// list untouched. A failure is logged and recorded in
    /// [`history_state`](Self::history_state), and a later call retries.
    pub async fn load_history(&mut self) -> &[Exchange] {
        if self.is_shut_down() || self.history == HistoryState::Loaded {
            return self.conversation.exchanges();
        }
        self.history = HistoryState::Loading;

        let Some(result) = self
            .cancel
            .run_until_cancelled(self.transport.get_history())
            .await
        else {
            tracing::debug!("history load discarded after shutdown");
            return self.conversation.exchanges();
        };

        match result {
            Ok(records) => {
                let mut history: Vec<Exchange> = records.into_iter().map(Exchange::from_record).collect();
                if self.transport.history_order() == HistoryOrder::NewestFirst {
                    history.reverse();
                }
                tracing::debug!(count = history.len(), "chat history loaded");
                self.conversation.prepend_history(history);
                self.history = HistoryState::Loaded;
                self.publish();
            }
            Err(error) => {
                tracing::warn!(%error, "failed to load chat history");
                self.history = HistoryState::Failed(error.to_string());
            }
        }
        self.conversation.exchanges()
    }

    /// Insert an optimistic exchange for `text` and clear the input buffer.
    ///
    /// Returns `None`, changing nothing, when the text is blank, another
    /// exchange is pending, or the controller is shut down.
    pub fn begin_send(&mut self, text: &str) -> Option<PendingSend> {
        let text = text.trim();
        if text.is_empty() || self.is_shut_down() {
            return None;
        }
        let Some(id) = self.conversation.push_pending(text) else {
            tracing::debug!("send ignored while a reply is pending");
            return None;
        };
        self.draft.clear();
        self.publish();
        Some(PendingSend {
            id,
            text: text.to_string(),
        })
    }

    /// Settle the exchange behind `ticket` with the transport's result.
    ///
    /// Returns the settled exchange, or `None` if the controller was shut down.
    pub fn complete_send(
        &mut self,
        ticket: PendingSend,
        result: Result<ExchangeRecord, TransportError>,
    ) -> Option<&Exchange> {
        if self.is_shut_down() {
            tracing::debug!(id = %ticket.id, "send result discarded after shutdown");
            return None;
        }
        let settled = match result {
            Ok(record) => self.conversation.complete(&ticket.id, record).map(|_| ()),
            Err(error) => {
                tracing::warn!(%error, id = %ticket.id, "message send failed");
                let message = failure_message(&error);
                self.conversation.fail(&ticket.id, &message).map(|_| ())
            }
        };
        if let Err(error) = settled {
            tracing::warn!(%error, "could not settle exchange");
            return None;
        }
        self.publish();
        self.conversation.get(&ticket.id)
    }

    /// Send `text` and wait for the reply.
    ///
    /// The optimistic exchange is published before the network call starts.
    /// Returns the settled exchange, or `None` if nothing was sent or the
    /// controller shut down while waiting.
    pub async fn send(&mut self, text: &str) -> Option<&Exchange> {
        let ticket = self.begin_send(text)?;
        let Some(result) = self
            .cancel
            .run_until_cancelled(self.transport.send_message(ticket.text()))
            .await
        else {
            tracing::debug!(id = %ticket.id, "send discarded after shutdown");
            return None;
        };
        self.complete_send(ticket, result)
    }

    /// Send the current input buffer.
    pub async fn submit(&mut self) -> Option<&Exchange> {
        let text = self.draft.clone();
        self.send(&text).await
    }

    fn publish(&self) {
        self.updates.send_replace(self.conversation.exchanges().to_vec());
    }
}
