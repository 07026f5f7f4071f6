mod history;
mod repl;
mod send;

use pal_core::{Exchange, ExchangePhase, Route};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ChatCommands;
use crate::context::AppContext;
use crate::navigator::{TerminalNavigator, hint_for};

/// Handle `pal chat <subcommand>`.
pub async fn handle(
    action: &ChatCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    require_chat(ctx, flags).await?;
    match action {
        ChatCommands::History(args) => history::handle(args, ctx, flags).await,
        ChatCommands::Send(args) => send::handle(args, ctx, flags).await,
        ChatCommands::Repl => repl::handle(ctx, flags).await,
    }
}

/// Enter the chat view, failing if the guard sends us elsewhere.
async fn require_chat(ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut navigator = TerminalNavigator::new(flags);
    match ctx.enter(Route::Chat, &mut navigator).await {
        Route::Chat => Ok(()),
        other => anyhow::bail!("{}", hint_for(other)),
    }
}

/// One exchange as printed by `history` and `send`.
#[derive(Serialize)]
struct ExchangeRow {
    id: String,
    phase: ExchangePhase,
    created_at: String,
    message: String,
    response: Option<String>,
}

impl From<&Exchange> for ExchangeRow {
    fn from(exchange: &Exchange) -> Self {
        Self {
            id: exchange
                .server_id()
                .unwrap_or_else(|| exchange.id().as_str())
                .to_string(),
            phase: exchange.phase(),
            created_at: exchange.created_at().format("%Y-%m-%d %H:%M").to_string(),
            message: exchange.user_text().to_string(),
            response: exchange.bot_text().map(str::to_string),
        }
    }
}

/// Two-line transcript form used by the REPL and raw output.
fn transcript(exchange: &Exchange) -> String {
    let reply = match exchange.phase() {
        ExchangePhase::Pending => String::from("..."),
        ExchangePhase::Completed => exchange.bot_text().unwrap_or_default().to_string(),
        ExchangePhase::Failed => format!("[failed] {}", exchange.bot_text().unwrap_or_default()),
    };
    format!("you> {}\nbot> {reply}", exchange.user_text())
}
