//! Query command: interactive question loop on stdin/stdout.

use anyhow::{Context, Result};
use clap::Args;
use std::io;
use std::sync::Arc;

use super::open_retriever;
use crate::domain::models::Config;
use crate::infrastructure::history::FileSessionLog;
use crate::services::{build_summarizer, QuerySession, SessionOptions};

/// Arguments for `docsift query`
#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Chunks retrieved per question (defaults to retrieval.top_k)
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,
}

/// Run the loop until `exit` or end of input
///
/// `--json` has no effect here; the loop is for people at a terminal.
pub async fn execute(args: QueryArgs, config: &Config, _json_mode: bool) -> Result<()> {
    let top_k = args.top_k.unwrap_or(config.retrieval.top_k);
    if top_k == 0 {
        anyhow::bail!("--top-k must be at least 1");
    }

    let retriever = open_retriever(config)?;
    let summarizer = build_summarizer(&config.summary, Arc::clone(retriever.embedder()));
    let log = Arc::new(FileSessionLog::new(&config.history.path));

    let options = SessionOptions {
        top_k,
        preview_chars: config.retrieval.preview_chars,
        history_label: config.history.path.clone(),
    };

    let session = QuerySession::new(retriever, summarizer, log, options);
    let stats = session
        .run(io::stdin().lock(), io::stdout().lock())
        .await
        .context("Interactive session failed")?;

    tracing::info!(
        answered = stats.answered,
        unanswered = stats.unanswered,
        "session ended"
    );

    Ok(())
}
