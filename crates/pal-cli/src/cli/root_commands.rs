use clap::{Args, Subcommand};
use pal_core::Route;

use crate::cli::subcommands::{AuthCommands, ChatCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Log in, register, log out, or show who you are.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Talk to the chatbot.
    Chat {
        #[command(subcommand)]
        action: ChatCommands,
    },
    /// Check which view a route resolves to for the current session.
    Open(OpenArgs),
}

#[derive(Clone, Debug, Args)]
pub struct OpenArgs {
    /// Route path or name: /, /login, /register, /chat.
    pub route: Route,
}
