use anyhow::Context;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::navigator::TerminalNavigator;
use crate::output::output;

#[derive(Serialize)]
struct AuthLogoutResponse {
    logged_out: bool,
}

pub async fn handle(ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut navigator = TerminalNavigator::new(flags);
    pal_auth::sign_out(&mut ctx.session, &mut navigator)
        .await
        .context("auth logout")?;
    output(&AuthLogoutResponse { logged_out: true }, flags.format)
}
