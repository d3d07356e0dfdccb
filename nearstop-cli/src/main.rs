//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use clap::Parser;
use nearstop_cli::Cli;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => err.exit(),
    };
    init_logging(cli.verbose());
    nearstop_cli::run(cli).await?;
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "nearstop_core=debug,nearstop_data=debug,nearstop_cli=debug,info"
    } else {
        "nearstop_core=info,nearstop_data=info,nearstop_cli=info,warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
