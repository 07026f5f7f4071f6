use pal_chat::HistoryState;

use crate::cli::GlobalFlags;
use crate::cli::OutputFormat;
use crate::cli::subcommands::chat::ChatHistoryArgs;
use crate::context::AppContext;
use crate::output::output;

use super::{ExchangeRow, transcript};

pub async fn handle(
    args: &ChatHistoryArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut conversation = ctx.conversation();
    conversation.load_history().await;
    if let HistoryState::Failed(reason) = conversation.history_state() {
        anyhow::bail!("failed to load chat history: {reason}");
    }

    let limit = args.limit.unwrap_or(ctx.config.general.history_limit) as usize;
    let exchanges = conversation.exchanges();
    let shown = if limit == 0 {
        exchanges
    } else {
        &exchanges[exchanges.len().saturating_sub(limit)..]
    };

    match flags.format {
        OutputFormat::Raw => {
            for exchange in shown {
                println!("{}\n", transcript(exchange));
            }
            Ok(())
        }
        OutputFormat::Json | OutputFormat::Table => {
            let rows: Vec<ExchangeRow> = shown.iter().map(ExchangeRow::from).collect();
            output(&rows, flags.format)
        }
    }
}
