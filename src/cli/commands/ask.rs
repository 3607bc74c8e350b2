//! Ask command: answer one question and exit.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use super::open_retriever;
use crate::cli::output::{output, truncate, CommandOutput};
use crate::domain::models::{Answer, Config};
use crate::services::{build_summarizer, AnswerService};

/// Arguments for `docsift ask`
#[derive(Args, Debug)]
pub struct AskArgs {
    /// The question to answer
    pub question: String,

    /// Include the supporting chunks in the output
    #[arg(long)]
    pub show_chunks: bool,

    /// Chunks retrieved (defaults to retrieval.top_k)
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,
}

/// Result of `docsift ask`
#[derive(Debug, Serialize)]
pub struct AskOutput {
    pub question: String,
    /// Summary and, when requested, its supporting chunks
    #[serde(flatten)]
    pub answer: Answer,
    /// Characters of each chunk shown in human output
    #[serde(skip)]
    pub preview_chars: usize,
}

impl CommandOutput for AskOutput {
    fn to_human(&self) -> String {
        let mut out = self.answer.text.clone();

        if let Some(chunks) = &self.answer.chunks {
            out.push_str("\n\nSources:");
            for (rank, chunk) in chunks.iter().enumerate() {
                out.push_str(&format!(
                    "\n[{}] {} (chunk {})\n    {}",
                    rank + 1,
                    chunk.source,
                    chunk.id,
                    truncate(&chunk.text, self.preview_chars)
                ));
            }
        }

        out
    }
}

/// Answer one question and print the result
pub async fn execute(args: AskArgs, config: &Config, json_mode: bool) -> Result<()> {
    let top_k = args.top_k.unwrap_or(config.retrieval.top_k);
    if top_k == 0 {
        anyhow::bail!("--top-k must be at least 1");
    }

    let retriever = open_retriever(config)?;
    let summarizer = build_summarizer(&config.summary, retriever.embedder().clone());
    let service = AnswerService::new(retriever, summarizer, top_k);

    let answer = service.generate_answer(&args.question, args.show_chunks).await;

    output(
        &AskOutput {
            question: args.question,
            answer,
            preview_chars: config.retrieval.preview_chars,
        },
        json_mode,
    );

    Ok(())
}
