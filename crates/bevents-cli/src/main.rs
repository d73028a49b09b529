//! bevents - bucket event notification listing for S3-compatible storage

mod commands;
mod config;
mod s3_client;
mod target;

use bevents_core::{FormatOptions, ListArgs, OutputMode};
use clap::{CommandFactory, Parser, Subcommand};
use colored::Colorize;
use commands::CommandContext;
use config::ConfigStore;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LIST_EXAMPLES: &str = "\
EXAMPLES:
  1. List notification configurations associated to a specific arn
     $ bevents events list myminio/mybucket arn:aws:sqs:us-west-2:444455556666:your-queue
  2. List all notification configurations
     $ bevents events list s3/mybucket";

#[derive(Parser)]
#[command(name = "bevents")]
#[command(version = bevents_core::VERSION)]
#[command(about = "Inspect event notifications of S3-compatible buckets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print one JSON record per line
    #[arg(long, global = true, env = "BEVENTS_JSON")]
    json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Profile used for s3:// and URL locations
    #[arg(short, long, global = true, env = "BEVENTS_PROFILE")]
    profile: Option<String>,

    /// Configuration file path
    #[arg(long, global = true, env = "BEVENTS_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage bucket event notifications
    Events {
        #[command(subcommand)]
        action: EventsAction,
    },
}

#[derive(Subcommand)]
enum EventsAction {
    /// List bucket notifications
    #[command(after_help = LIST_EXAMPLES)]
    List {
        /// ALIAS/BUCKET followed by an optional TARGET_ID (ARN)
        #[arg(value_name = "ALIAS/BUCKET [TARGET_ID]")]
        args: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.debug);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(err),
    }
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("bevents=debug,bevents_core=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Events { action } => match action {
            EventsAction::List { args } => {
                let args = ListArgs::from_positional(&args)?;
                let ctx = load_context(
                    cli.config.as_deref(),
                    cli.profile.as_deref(),
                    cli.json,
                    cli.no_color,
                )?;
                commands::events::list(&ctx, &args).await?
            }
        },
    }

    Ok(())
}

fn load_context(
    config_path: Option<&Path>,
    profile: Option<&str>,
    json: bool,
    no_color: bool,
) -> anyhow::Result<CommandContext> {
    let config = ConfigStore::load(config_path, profile)?;

    Ok(CommandContext {
        config,
        output_mode: if json {
            OutputMode::Json
        } else {
            OutputMode::Text
        },
        format: FormatOptions {
            color_enabled: !no_color && console::colors_enabled(),
        },
    })
}

/// Print a fatal error and pick the exit code
fn report(err: anyhow::Error) -> ExitCode {
    match err.downcast_ref::<bevents_core::Error>() {
        Some(core) if core.is_usage() => {
            print_list_help();
            ExitCode::from(core.exit_code())
        }
        Some(core) => {
            tracing::debug!(code = core.code(), "Command failed");
            eprintln!("{} {:#}", "bevents: error:".red().bold(), err);
            ExitCode::from(core.exit_code())
        }
        None => {
            eprintln!("{} {:#}", "bevents: error:".red().bold(), err);
            ExitCode::from(bevents_core::error::FATAL_EXIT_CODE)
        }
    }
}

fn print_list_help() {
    let help = Cli::command().try_get_matches_from(["bevents", "events", "list", "--help"]);
    if let Err(help) = help {
        if let Err(e) = help.print() {
            tracing::warn!(error = %e, "Failed to print command help");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_args() {
        let cli = Cli::try_parse_from([
            "bevents",
            "--json",
            "events",
            "list",
            "myminio/mybucket",
            "arn:minio:sqs::1:webhook",
        ])
        .unwrap();
        assert!(cli.json);

        let Commands::Events {
            action: EventsAction::List { args },
        } = cli.command;
        assert_eq!(args, vec!["myminio/mybucket", "arn:minio:sqs::1:webhook"]);
    }

    #[test]
    fn test_parse_list_accepts_any_count() {
        // The argument count is validated by the command, not by clap
        let cli = Cli::try_parse_from(["bevents", "events", "list", "a", "b", "c"]).unwrap();
        let Commands::Events {
            action: EventsAction::List { args },
        } = cli.command;
        assert_eq!(args.len(), 3);

        assert!(Cli::try_parse_from(["bevents", "events", "list"]).is_ok());
    }

    #[test]
    fn test_list_help_renders() {
        let err = Cli::command()
            .try_get_matches_from(["bevents", "events", "list", "--help"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);

        let help = err.to_string();
        assert!(help.contains("TARGET_ID"));
        assert!(help.contains("EXAMPLES:"));
    }

    #[tokio::test]
    async fn test_argument_count_checked_before_config() {
        let path = std::env::temp_dir().join(format!(
            "bevents-broken-config-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "this is = = not toml").unwrap();
        let config = path.to_str().unwrap();

        for positional in [vec![], vec!["a/b", "arn:x", "extra"]] {
            let mut argv = vec!["bevents", "--config", config, "events", "list"];
            argv.extend(positional);
            let cli = Cli::try_parse_from(argv).unwrap();

            let err = run(cli).await.unwrap_err();
            let core = err
                .downcast_ref::<bevents_core::Error>()
                .expect("argument count error");
            assert!(core.is_usage());
        }

        // A valid count reaches the config file
        let cli = Cli::try_parse_from(["bevents", "--config", config, "events", "list", "a/b"])
            .unwrap();
        let err = run(cli).await.unwrap_err();
        assert!(err.downcast_ref::<bevents_core::Error>().is_none());
        assert!(err.to_string().contains("Failed to parse config file"));

        std::fs::remove_file(&path).unwrap();
    }
}
