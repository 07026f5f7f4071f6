//! Chatbot endpoints under `chatbot/`.

use pal_core::wire::ChatRequest;
use pal_core::{ChatTransport, ExchangeRecord, HistoryOrder, TransportError};

use crate::ApiClient;

pub(crate) const CHAT_PATH: &str = "chatbot/chat/";
pub(crate) const HISTORY_PATH: &str = "chatbot/history/";

impl ChatTransport for ApiClient {
    async fn send_message(&self, text: &str) -> Result<ExchangeRecord, TransportError> {
        self.post_json(CHAT_PATH, Some(&ChatRequest { message: text }))
            .await
    }

    async fn get_history(&self) -> Result<Vec<ExchangeRecord>, TransportError> {
        self.get_json(HISTORY_PATH).await
    }

    /// The backend orders history by `-created_at`.
    fn history_order(&self) -> HistoryOrder {
        HistoryOrder::NewestFirst
    }
}
