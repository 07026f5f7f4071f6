use clap::{Args, Subcommand};

/// Chat commands. All of them require a logged-in session.
#[derive(Clone, Debug, Subcommand)]
pub enum ChatCommands {
    /// Print persisted history, oldest first.
    History(ChatHistoryArgs),
    /// Send one message and print the reply.
    Send(ChatSendArgs),
    /// Interactive session.
    Repl,
}

#[derive(Clone, Debug, Args)]
pub struct ChatHistoryArgs {
    /// Show only the newest N exchanges (0 = all; default from config).
    #[arg(short, long)]
    pub limit: Option<u32>,
}

#[derive(Clone, Debug, Args)]
pub struct ChatSendArgs {
    /// Message text; multiple words are joined with spaces.
    #[arg(required = true, trailing_var_arg = true)]
    pub message: Vec<String>,
}

impl ChatSendArgs {
    pub fn text(&self) -> String {
        self.message.join(" ")
    }
}
