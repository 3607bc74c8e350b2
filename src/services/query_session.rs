//! Interactive question loop
//!
//! Reads questions line by line, prints the top chunks and a summary for
//! each, and appends every answered exchange to the session log. Generic
//! over the reader and writer so tests can drive it with in-memory buffers.

use std::io::{BufRead, Write};
use std::sync::Arc;

use crate::domain::models::{SummaryRecord, NO_RELEVANT_INFORMATION};
use crate::domain::ports::{SessionLog, Summarizer};
use crate::services::retriever::Retriever;

const PROMPT: &str = "\nEnter your question (or type 'exit' to quit): ";

/// Display options for the loop
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Chunks retrieved per question
    pub top_k: usize,
    /// Characters shown per chunk preview
    pub preview_chars: usize,
    /// Shown to the user where history is kept
    pub history_label: String,
}

/// What happened over one loop run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Questions that got a summary
    pub answered: usize,
    /// Questions with nothing relevant
    pub unanswered: usize,
}

/// Interactive question loop
pub struct QuerySession {
    retriever: Retriever,
    summarizer: Arc<dyn Summarizer>,
    log: Arc<dyn SessionLog>,
    options: SessionOptions,
}

impl QuerySession {
    /// Loop over the given retriever, summarizer and history log
    pub fn new(
        retriever: Retriever,
        summarizer: Arc<dyn Summarizer>,
        log: Arc<dyn SessionLog>,
        options: SessionOptions,
    ) -> Self {
        Self {
            retriever,
            summarizer,
            log,
            options,
        }
    }

    /// Run until `exit` or end of input
    pub async fn run<R, W>(&self, mut input: R, mut out: W) -> std::io::Result<SessionStats>
    where
        R: BufRead,
        W: Write,
    {
        let mut stats = SessionStats::default();
        let mut line = String::new();

        loop {
            write!(out, "{PROMPT}")?;
            out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                break;
            }

            let query = line.trim();
            if query.eq_ignore_ascii_case("exit") {
                writeln!(
                    out,
                    "\nExiting... Your Q&A history is saved in '{}'.",
                    self.options.history_label
                )?;
                break;
            }
            if query.is_empty() {
                continue;
            }

            if self.answer(query, &mut out).await? {
                stats.answered += 1;
            } else {
                stats.unanswered += 1;
            }
        }

        Ok(stats)
    }

    /// Handle one question; true when a summary was produced and logged
    async fn answer<W: Write>(&self, query: &str, out: &mut W) -> std::io::Result<bool> {
        let chunks = match self.retriever.retrieve(query, self.options.top_k).await {
            Ok(chunks) => chunks,
            Err(err) => {
                tracing::warn!(error = %err, "retrieval failed");
                writeln!(out, "{NO_RELEVANT_INFORMATION}")?;
                return Ok(false);
            }
        };

        if chunks.is_empty() {
            writeln!(out, "No relevant chunks found.")?;
            return Ok(false);
        }

        writeln!(out, "\n--- TOP RETRIEVED CHUNKS ---")?;
        for (rank, chunk) in chunks.iter().enumerate() {
            let preview = chunk.preview(self.options.preview_chars);
            let ellipsis = if preview.len() < chunk.text.len() { "..." } else { "" };
            writeln!(
                out,
                "\n[Chunk {}] ({})\n{preview}{ellipsis}",
                rank + 1,
                chunk.source
            )?;
        }

        let texts: Vec<String> = chunks.into_iter().map(|c| c.text).collect();
        let summary = match self.summarizer.summarize(query, &texts).await {
            Ok(summary) => summary,
            Err(err) => {
                tracing::warn!(error = %err, "summarization failed");
                writeln!(out, "{NO_RELEVANT_INFORMATION}")?;
                return Ok(false);
            }
        };

        writeln!(out, "\n--- QUERY-BASED SUMMARY ---")?;
        writeln!(out, "{summary}")?;

        match self.log.append(&SummaryRecord::now(query, &summary)) {
            Ok(()) => writeln!(out, "\nSaved to {}", self.options.history_label)?,
            Err(err) => tracing::warn!(error = %err, "failed to write history"),
        }

        Ok(true)
    }
}
