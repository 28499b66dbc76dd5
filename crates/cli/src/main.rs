use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod args;
mod commands;

use args::AuthorityArgs;
use commands::Commands;

#[derive(Parser, Debug)]
#[command(name = "capstore")]
#[command(about = "Capability-token object authority with signed URLs", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    authority: AuthorityArgs,

    /// Log level
    #[arg(long, default_value = "info", global = true)]
    log_level: Level,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_level(true)
                .with_target(true)
                .with_thread_ids(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            cli.log_level,
        ))
        .init();

    let config = cli.authority.resolve()?;
    cli.command.execute(config).await
}
