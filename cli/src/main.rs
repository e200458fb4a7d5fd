use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::{Layer, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod render;
mod util;

use commands::score::ScoreArgs;

#[derive(Parser)]
#[command(
    name = "flank",
    version,
    about = "Flank: assess Big 4 competitive pressure on an independent advisory firm"
)]
struct Cli {
    /// Pause after each answer before the next question appears (milliseconds)
    #[arg(long, env = "FLANK_ADVANCE_DELAY_MS", default_value_t = 400, global = true)]
    advance_delay_ms: u64,

    /// Emit logs as JSON lines on stderr
    #[arg(long, env = "FLANK_LOG_JSON", global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer the questionnaire interactively (default)
    Wizard,
    /// Score a firm from flags and print the report
    Score(ScoreArgs),
}

/// Used when `RUST_LOG` is unset. Core events stay at warn so the
/// interactive screen is not interleaved with per-selection logs.
const DEFAULT_LOG_FILTER: &str = "flank=info,flank_core=warn";

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    let fmt_layer = if json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

#[tokio::main]
async fn main() {
    // Load .env if present
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let code = match cli.command.unwrap_or(Commands::Wizard) {
        Commands::Wizard => {
            commands::wizard::run(Duration::from_millis(cli.advance_delay_ms)).await
        }
        Commands::Score(args) => commands::score::run(args),
    };

    std::process::exit(code);
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn default_log_filter_parses_and_keeps_cli_at_info() {
        let filter = tracing_subscriber::EnvFilter::try_new(DEFAULT_LOG_FILTER).unwrap();
        let rendered = filter.to_string();
        assert!(rendered.contains("flank=info"));
        assert!(rendered.contains("flank_core=warn"));
    }

    #[test]
    fn no_subcommand_falls_back_to_the_wizard() {
        let cli = Cli::try_parse_from(["flank"]).unwrap();
        assert!(cli.command.is_none());
    }
}
