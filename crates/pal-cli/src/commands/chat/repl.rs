use anyhow::Context;
use pal_chat::HistoryState;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::navigator::TerminalNavigator;
use crate::progress::Progress;

use super::transcript;

const HELP: &str = "commands: /logout, /quit (or Ctrl-D)";

/// What a line typed at the prompt asks for.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Message(&'a str),
    Logout,
    Quit,
    Help,
}

fn parse_input(line: &str) -> Input<'_> {
    match line.trim() {
        "/quit" | "/exit" => Input::Quit,
        "/logout" => Input::Logout,
        "/help" => Input::Help,
        _ => Input::Message(line),
    }
}

/// Cancel every token once `signal` fires. A failed signal cancels nothing.
async fn cancel_on<F>(signal: F, tokens: Vec<CancellationToken>)
where
    F: Future<Output = std::io::Result<()>>,
{
    if signal.await.is_ok() {
        for token in tokens {
            token.cancel();
        }
    }
}

pub async fn handle(ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut conversation = ctx.conversation();
    let teardown = conversation.cancel_handle();
    tokio::spawn(cancel_on(
        tokio::signal::ctrl_c(),
        vec![teardown.clone(), ctx.session.cancel_handle()],
    ));

    let progress = Progress::spinner("Loading chat history...");
    let history = conversation.load_history().await;
    progress.finish_clear();
    for exchange in history {
        println!("{}\n", transcript(exchange));
    }
    if let HistoryState::Failed(reason) = conversation.history_state() {
        eprintln!("(could not load history: {reason})");
    }
    if let Some(user) = ctx.session.user() {
        eprintln!("Welcome, {}! {HELP}", user.display_name());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            () = teardown.cancelled() => break,
            line = lines.next_line() => line.context("failed to read from stdin")?,
        };
        let Some(line) = line else {
            break;
        };

        match parse_input(&line) {
            Input::Quit => break,
            Input::Help => eprintln!("{HELP}"),
            Input::Logout => {
                conversation.shutdown();
                let mut navigator = TerminalNavigator::new(flags);
                return pal_auth::sign_out(&mut ctx.session, &mut navigator)
                    .await
                    .context("logout");
            }
            Input::Message(text) => {
                conversation.set_draft(text);
                let progress = Progress::spinner("Thinking...");
                let settled = conversation.submit().await.map(transcript);
                progress.finish_clear();
                match settled {
                    Some(rendered) => println!("{rendered}\n"),
                    None if conversation.is_shut_down() => break,
                    None => {}
                }
            }
        }
    }

    conversation.shutdown();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn slash_commands_are_recognised() {
        assert_eq!(parse_input("/quit"), Input::Quit);
        assert_eq!(parse_input(" /exit "), Input::Quit);
        assert_eq!(parse_input("/logout"), Input::Logout);
        assert_eq!(parse_input("/help"), Input::Help);
    }

    #[tokio::test]
    async fn signal_cancels_every_token() {
        let conversation = CancellationToken::new();
        let session = CancellationToken::new();

        cancel_on(async { Ok(()) }, vec![conversation.clone(), session.clone()]).await;

        assert!(conversation.is_cancelled());
        assert!(session.is_cancelled());
    }

    #[tokio::test]
    async fn failed_signal_cancels_nothing() {
        let token = CancellationToken::new();
        cancel_on(
            async { Err(std::io::Error::other("no signal handler")) },
            vec![token.clone()],
        )
        .await;
        assert!(!token.is_cancelled());
    }

    #[test]
    fn everything_else_is_a_message() {
        assert_eq!(parse_input("hello /quit"), Input::Message("hello /quit"));
        assert_eq!(parse_input("   "), Input::Message("   "));
    }
}
