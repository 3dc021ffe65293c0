//! dealmemo CLI entry point.

use anyhow::Result;
use clap::Parser;
use std::path::Path;

use dealmemo::cli::{commands, Cli, Commands};
use dealmemo::domain::models::Config;
use dealmemo::infrastructure::config::ConfigLoader;
use dealmemo::infrastructure::logging::LoggerImpl;

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

async fn run(cli: Cli) -> Result<()> {
    let command = match cli.command {
        Commands::Init(args) => return commands::init::execute(args, cli.json).await,
        command => command,
    };

    let config = load_config(cli.config.as_deref())?;
    let _logger = LoggerImpl::init(&config.logging)?;

    match command {
        Commands::Init(_) => Ok(()),
        Commands::Analyze(args) => commands::analyze::execute(args, &config, cli.json).await,
        Commands::Improve(args) => commands::improve::execute(args, &config, cli.json).await,
        Commands::Generate(args) => commands::generate::execute(args, &config, cli.json).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;

    if let Err(err) = run(cli).await {
        dealmemo::cli::handle_error(err, json_mode);
    }
}
