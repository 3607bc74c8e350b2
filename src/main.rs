//! docsift CLI entry point.

use anyhow::Context;
use clap::Parser;

use docsift::cli::{Cli, Commands};
use docsift::infrastructure::config::ConfigLoader;
use docsift::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(err) => docsift::cli::handle_error(err, cli.json),
    };

    let _logger = match LogConfig::try_from(&config.logging)
        .context("Invalid logging configuration")
        .and_then(|log_config| LoggerImpl::init(&log_config))
    {
        Ok(logger) => logger,
        Err(err) => docsift::cli::handle_error(err, cli.json),
    };

    let result = match cli.command {
        Commands::Ingest(args) => docsift::cli::commands::ingest::execute(args, &config, cli.json).await,
        Commands::Query(args) => docsift::cli::commands::query::execute(args, &config, cli.json).await,
        Commands::Ask(args) => docsift::cli::commands::ask::execute(args, &config, cli.json).await,
        Commands::History(args) => docsift::cli::commands::history::execute(args, &config, cli.json).await,
    };

    if let Err(err) = result {
        docsift::cli::handle_error(err, cli.json);
    }
}
