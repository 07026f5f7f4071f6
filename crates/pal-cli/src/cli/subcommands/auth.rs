use clap::{Args, Subcommand};

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Log in with email and password.
    Login(AuthLoginArgs),
    /// Create an account and log into it.
    Register(AuthRegisterArgs),
    /// End the server session.
    Logout,
    /// Show the current session.
    Status,
}

#[derive(Clone, Debug, Args)]
pub struct AuthLoginArgs {
    #[arg(long)]
    pub email: String,
    /// Password (or set PALAVER_PASSWORD).
    #[arg(long, env = "PALAVER_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Clone, Debug, Args)]
pub struct AuthRegisterArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub username: String,
    /// Password (or set PALAVER_PASSWORD).
    #[arg(long, env = "PALAVER_PASSWORD", hide_env_values = true)]
    pub password: String,
    /// Confirmation; defaults to --password.
    #[arg(long)]
    pub password_confirm: Option<String>,
}
