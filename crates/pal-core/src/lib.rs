//! # pal-core
//!
//! Core types, ID generation, and error types for Palaver.
//!
//! This crate provides the foundational types shared across all Palaver crates:
//! - Entity structs for the session and conversation (`User`, `Session`, `Exchange`)
//! - Status enums with state machine transitions
//! - Wire records exchanged with the chatbot backend
//! - Transport traits the controllers are generic over
//! - Route definitions used by the access guard
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod route;
pub mod transport;
pub mod wire;

pub use entities::{Exchange, Session, User};
pub use enums::{ExchangePhase, SessionStatus};
pub use errors::{CoreError, ValidationError};
pub use ids::ExchangeId;
pub use route::Route;
pub use transport::{AuthTransport, ChatTransport, HistoryOrder, TransportError};
pub use wire::{Credentials, ErrorPayload, ExchangeRecord, Registration};
