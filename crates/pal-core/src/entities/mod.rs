//! Entity structs for the Palaver session and conversation.
//!
//! Entities guard their own invariants: fields are private and only change
//! through transition methods, so renderers can read them but never put them
//! into an inconsistent state.

mod exchange;
mod session;
mod user;

pub use exchange::Exchange;
pub use session::Session;
pub use user::User;
