use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;
use std::sync::Arc;
use tracing::info;

use script_cloner::cli::{Cli, Command};
use script_cloner::clipboard::Osc52Clipboard;
use script_cloner::config::Config;
use script_cloner::gemini::GeminiClient;
use script_cloner::{app, commands, logging};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    let config = Config::from_cli(&cli);

    logging::init(&config.log_file)?;
    info!(?config, "starting");

    let client = GeminiClient::new(&config)?;

    match cli.cmd {
        None => app::run_tui(Arc::new(client), Box::new(Osc52Clipboard)).await,
        Some(Command::Analyze { file, out }) => commands::analyze::run(client, &file, out).await,
        Some(Command::Generate { analysis, topic, out }) => {
            commands::generate::run(client, &analysis, &topic, out).await
        }
    }
}
