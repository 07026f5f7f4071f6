mod login;
mod logout;
mod register;
mod status;

use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;
use crate::context::AppContext;

/// Handle `pal auth <subcommand>`.
pub async fn handle(
    action: &AuthCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AuthCommands::Login(args) => login::handle(args, ctx, flags).await,
        AuthCommands::Register(args) => register::handle(args, ctx, flags).await,
        AuthCommands::Logout => logout::handle(ctx, flags).await,
        AuthCommands::Status => status::handle(ctx, flags).await,
    }
}

/// Response shared by `login`, `register` and `status`.
#[derive(Serialize)]
struct SessionResponse {
    status: pal_core::SessionStatus,
    authenticated: bool,
    username: Option<String>,
    email: Option<String>,
    note: Option<&'static str>,
}

impl SessionResponse {
    fn from_session(session: &pal_core::Session, note: Option<&'static str>) -> Self {
        Self {
            status: session.status(),
            authenticated: session.is_authenticated(),
            username: session.user().map(|user| user.display_name().to_string()),
            email: session.user().map(|user| user.email.clone()),
            note,
        }
    }
}
