//! # pal-auth
//!
//! Client-side session handling for Palaver.
//!
//! [`SessionManager`] owns the current identity and runs the
//! `unknown → checking → authenticated ⇄ anonymous` machine over any
//! [`pal_core::AuthTransport`]. The [`access`] module decides which views a
//! session may see and redirects through a [`Navigator`].

pub mod access;
pub mod error;
mod manager;

pub use access::{Navigator, enter, guard, redirect_for, sign_out};
pub use error::AuthError;
pub use manager::SessionManager;
