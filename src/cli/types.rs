//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::commands::{ask::AskArgs, history::HistoryArgs, ingest::IngestArgs, query::QueryArgs};

/// Top-level command line
#[derive(Parser, Debug)]
#[command(name = "docsift")]
#[command(about = "docsift - offline question answering over PDF documents", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Read configuration from this file instead of .docsift/
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract, chunk and embed a directory of PDFs into an index
    Ingest(IngestArgs),

    /// Ask questions interactively against the index
    Query(QueryArgs),

    /// Answer a single question
    Ask(AskArgs),

    /// Show saved question/answer history
    History(HistoryArgs),
}
