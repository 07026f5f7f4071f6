use pal_core::{Route, SessionStatus};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::OpenArgs;
use crate::context::AppContext;
use crate::navigator::{TerminalNavigator, hint_for};
use crate::output::output;

#[derive(Serialize)]
struct OpenResponse {
    requested: Route,
    shown: Route,
    redirected: bool,
    status: SessionStatus,
    user: Option<String>,
    hint: Option<&'static str>,
}

/// Handle `pal open <route>`.
pub async fn handle(
    args: &OpenArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut navigator = TerminalNavigator::new(flags);
    let shown = ctx.enter(args.route, &mut navigator).await;
    let redirected = navigator.last().is_some();

    output(
        &OpenResponse {
            requested: args.route,
            shown,
            redirected,
            status: ctx.session.status(),
            user: ctx.session.user().map(|user| user.display_name().to_string()),
            hint: redirected.then_some(hint_for(shown)),
        },
        flags.format,
    )
}
