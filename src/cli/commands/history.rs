//! History command: show saved question/answer exchanges.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::domain::models::{Config, SummaryRecord};
use crate::domain::ports::SessionLog;
use crate::infrastructure::history::FileSessionLog;

/// Arguments for `docsift history`
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Show at most this many of the latest exchanges
    #[arg(short = 'n', long, default_value = "20")]
    pub limit: usize,
}

/// Result of `docsift history`
#[derive(Debug, Serialize)]
pub struct HistoryOutput {
    /// History file the records came from
    pub path: String,
    /// Latest records, oldest first
    pub records: Vec<SummaryRecord>,
}

impl CommandOutput for HistoryOutput {
    fn to_human(&self) -> String {
        if self.records.is_empty() {
            return format!("No history in {}", self.path);
        }
        TableFormatter::new().format_history(&self.records)
    }
}

/// The last `limit` records, oldest first
fn latest(mut records: Vec<SummaryRecord>, limit: usize) -> Vec<SummaryRecord> {
    let skip = records.len().saturating_sub(limit);
    records.drain(..skip);
    records
}

/// Print the latest exchanges from the history file
pub async fn execute(args: HistoryArgs, config: &Config, json_mode: bool) -> Result<()> {
    let log = FileSessionLog::new(&config.history.path);
    let records = log
        .records()
        .with_context(|| format!("Failed to read history from {}", log.path().display()))?;

    output(
        &HistoryOutput {
            path: config.history.path.clone(),
            records: latest(records, args.limit),
        },
        json_mode,
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(n: usize) -> Vec<SummaryRecord> {
        (0..n)
            .map(|i| SummaryRecord {
                query: format!("q{i}"),
                answer: format!("a{i}"),
                timestamp: "2024-05-01 09:30:00".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_latest_keeps_tail() {
        let kept = latest(records(5), 2);
        let queries: Vec<&str> = kept.iter().map(|r| r.query.as_str()).collect();
        assert_eq!(queries, vec!["q3", "q4"]);

        assert_eq!(latest(records(2), 10).len(), 2);
        assert!(latest(records(3), 0).is_empty());
    }

    #[test]
    fn test_empty_history_message() {
        let result = HistoryOutput {
            path: "qa_history.txt".to_string(),
            records: Vec::new(),
        };
        assert_eq!(result.to_human(), "No history in qa_history.txt");
        assert_eq!(result.to_json()["records"], serde_json::json!([]));
    }
}
