use clap::Parser;

mod chat;
mod cli;
mod generate;
mod setup;

use cli::{Cli, Commands};
use gitfolio_config::load_config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let config = load_config(&cwd)?;

    // Write logs to a file so they don't interleave with chat output.
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("/tmp"))
        .join("gitfolio")
        .join("log");
    gitfolio_util::init_tracing(Some(log_dir), config.log_level.as_deref(), false);

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Generate { username, output }) => {
            generate::run_generate(config, &username, output).await
        }
        Some(Commands::Chat) | None => chat::run_chat(config).await,
    }
}
