use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `pal` binary.
#[derive(Debug, Parser)]
#[command(name = "pal", version, about = "Palaver - terminal client for the chatbot")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pal_core::Route;
    use pretty_assertions::assert_eq;

    use super::subcommands::{AuthCommands, ChatCommands};
    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["pal", "--format", "table", "--verbose", "auth", "status"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Auth {
                action: AuthCommands::Status
            }
        ));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["pal", "chat", "repl", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(
            cli.command,
            Commands::Chat {
                action: ChatCommands::Repl
            }
        ));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["pal", "--format", "xml", "auth", "status"]).is_err());
    }

    #[test]
    fn login_takes_email_and_password() {
        let cli = Cli::try_parse_from([
            "pal",
            "auth",
            "login",
            "--email",
            "ada@example.com",
            "--password",
            "hunter2hunter2",
        ])
        .expect("cli should parse");

        let Commands::Auth {
            action: AuthCommands::Login(args),
        } = cli.command
        else {
            panic!("expected auth login");
        };
        assert_eq!(args.email, "ada@example.com");
        assert_eq!(args.password, "hunter2hunter2");
    }

    #[test]
    fn send_joins_words() {
        let cli = Cli::try_parse_from(["pal", "chat", "send", "hello", "there"])
            .expect("cli should parse");
        let Commands::Chat {
            action: ChatCommands::Send(args),
        } = cli.command
        else {
            panic!("expected chat send");
        };
        assert_eq!(args.text(), "hello there");
    }

    #[test]
    fn send_requires_a_message() {
        assert!(Cli::try_parse_from(["pal", "chat", "send"]).is_err());
    }

    #[test]
    fn open_parses_route() {
        let cli = Cli::try_parse_from(["pal", "open", "/chat"]).expect("cli should parse");
        let Commands::Open(args) = cli.command else {
            panic!("expected open");
        };
        assert_eq!(args.route, Route::Chat);
    }

    #[test]
    fn open_rejects_unknown_route() {
        assert!(Cli::try_parse_from(["pal", "open", "/admin"]).is_err());
    }
}
