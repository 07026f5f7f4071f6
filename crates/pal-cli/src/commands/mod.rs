pub mod auth;
pub mod chat;
pub mod dispatch;
pub mod open;
