use anyhow::Context;
use pal_core::{Credentials, Route};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthLoginArgs;
use crate::context::AppContext;
use crate::navigator::TerminalNavigator;
use crate::output::output;

use super::SessionResponse;

pub async fn handle(
    args: &AuthLoginArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut navigator = TerminalNavigator::new(flags);
    if ctx.enter(Route::Login, &mut navigator).await != Route::Login {
        return output(
            &SessionResponse::from_session(ctx.session.session(), Some("already logged in")),
            flags.format,
        );
    }

    let credentials = Credentials {
        email: args.email.trim().to_string(),
        password: args.password.clone(),
    };
    let session = ctx.session.login(&credentials).await.context("auth login")?;
    output(&SessionResponse::from_session(&session, None), flags.format)
}
