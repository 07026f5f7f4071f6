use pal_core::ExchangePhase;

use crate::cli::GlobalFlags;
use crate::cli::OutputFormat;
use crate::cli::subcommands::chat::ChatSendArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

use super::ExchangeRow;

pub async fn handle(
    args: &ChatSendArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut conversation = ctx.conversation();
    conversation.set_draft(args.text());

    let progress = Progress::spinner("Thinking...");
    let Some(exchange) = conversation.submit().await else {
        progress.finish_clear();
        anyhow::bail!("chat send: message is empty");
    };
    if exchange.phase() == ExchangePhase::Failed {
        progress.finish_err("Failed");
    } else {
        progress.finish_clear();
    }

    match flags.format {
        OutputFormat::Raw => {
            println!("{}", exchange.bot_text().unwrap_or_default());
            Ok(())
        }
        OutputFormat::Json | OutputFormat::Table => output(&ExchangeRow::from(exchange), flags.format),
    }
}
