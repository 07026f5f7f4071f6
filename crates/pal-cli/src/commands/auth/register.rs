use anyhow::Context;
use pal_core::{Registration, Route};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthRegisterArgs;
use crate::context::AppContext;
use crate::navigator::TerminalNavigator;
use crate::output::output;

use super::SessionResponse;

pub async fn handle(
    args: &AuthRegisterArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let registration = Registration {
        email: args.email.trim().to_string(),
        username: args.username.trim().to_string(),
        password: args.password.clone(),
        password_confirm: args
            .password_confirm
            .clone()
            .unwrap_or_else(|| args.password.clone()),
    };
    registration.validate().context("auth register")?;

    let mut navigator = TerminalNavigator::new(flags);
    if ctx.enter(Route::Register, &mut navigator).await != Route::Register {
        return output(
            &SessionResponse::from_session(ctx.session.session(), Some("already logged in")),
            flags.format,
        );
    }

    let session = ctx
        .session
        .register(&registration)
        .await
        .context("auth register")?;
    output(&SessionResponse::from_session(&session, None), flags.format)
}
