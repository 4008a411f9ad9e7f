mod app;
mod cli;
mod clipboard;
mod credentials;
mod export;
mod history;
mod llm;
mod logging;
mod output;
mod paths;
mod prompt;
mod render;
mod session;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    app::run(cli).await
}
