//! # pal-chat
//!
//! Conversation state for Palaver.
//!
//! [`ConversationController`] owns the ordered list of exchanges and runs the
//! optimistic send lifecycle: a pending exchange is shown the moment a message
//! is sent, then reconciled with the server reply (or marked failed) by its
//! local id. At most one exchange is pending at a time.

mod controller;
pub mod conversation;

pub use controller::{ConversationController, HistoryState, PendingSend, SEND_FAILED, failure_message};
pub use conversation::Conversation;
