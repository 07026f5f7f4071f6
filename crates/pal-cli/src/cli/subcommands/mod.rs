pub mod auth;
pub mod chat;

pub use auth::AuthCommands;
pub use chat::ChatCommands;
