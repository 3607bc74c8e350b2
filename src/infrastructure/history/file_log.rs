//! Plain-text question/answer history.
//!
//! Each exchange is appended as
//!
//! ```text
//!
//! [2024-05-01 09:30:00] Q: <query>
//! A: <answer>
//! --------------------------------------------------------------------------------
//! ```
//!
//! so the file stays readable in any editor; [`FileSessionLog::records`]
//! parses it back for the `history` command.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::domain::errors::DomainResult;
use crate::domain::models::SummaryRecord;
use crate::domain::ports::SessionLog;

const SEPARATOR_WIDTH: usize = 80;

/// Append-only history file
#[derive(Debug, Clone)]
pub struct FileSessionLog {
    path: PathBuf,
}

impl FileSessionLog {
    /// Log at `path`; the file is created on first append
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// History file location
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn separator() -> String {
    "-".repeat(SEPARATOR_WIDTH)
}

/// Render one record exactly as it is written to disk
pub fn format_record(record: &SummaryRecord) -> String {
    format!(
        "\n[{}] Q: {}\nA: {}\n{}\n",
        record.timestamp,
        record.query,
        record.answer,
        separator()
    )
}

/// Parse a history file's contents; malformed blocks are skipped
///
/// A separator line only ends a record when it is followed by the end of
/// the file or by the next record's `[timestamp]` header, so answers may
/// contain dashed rules of their own.
pub fn parse_records(contents: &str) -> Vec<SummaryRecord> {
    let terminator = format!("{}\n", separator());
    let mut records = Vec::new();
    let mut start = 0;
    let mut from = 0;

    while let Some(offset) = contents[from..].find(terminator.as_str()) {
        let at = from + offset;
        let end = at + terminator.len();
        let at_line_start = at == 0 || contents[..at].ends_with('\n');
        let rest = &contents[end..];

        if at_line_start && (rest.is_empty() || rest.starts_with("\n[")) {
            push_block(&contents[start..at], &mut records);
            start = end;
        }
        from = end;
    }
    push_block(&contents[start..], &mut records);

    records
}

fn push_block(block: &str, records: &mut Vec<SummaryRecord>) {
    if block.trim().is_empty() {
        return;
    }
    match parse_block(block) {
        Some(record) => records.push(record),
        None => tracing::warn!(block = %block.trim(), "skipping malformed history entry"),
    }
}

fn parse_block(block: &str) -> Option<SummaryRecord> {
    let block = block.strip_prefix('\n').unwrap_or(block);
    let block = block.strip_suffix('\n').unwrap_or(block);

    let (header, answer) = block.split_once("\nA: ")?;
    let (timestamp, query) = header.strip_prefix('[')?.split_once("] Q: ")?;

    Some(SummaryRecord {
        query: query.to_string(),
        answer: answer.to_string(),
        timestamp: timestamp.to_string(),
    })
}

impl SessionLog for FileSessionLog {
    fn append(&self, record: &SummaryRecord) -> DomainResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(format_record(record).as_bytes())?;

        tracing::debug!(path = %self.path.display(), "appended history record");
        Ok(())
    }

    fn records(&self) -> DomainResult<Vec<SummaryRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        Ok(parse_records(&contents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(query: &str, answer: &str) -> SummaryRecord {
        SummaryRecord {
            query: query.to_string(),
            answer: answer.to_string(),
            timestamp: "2024-05-01 09:30:00".to_string(),
        }
    }

    #[test]
    fn test_format_matches_log_layout() {
        let text = format_record(&record("What is the toll policy?", "Tolls apply."));
        assert_eq!(
            text,
            format!(
                "\n[2024-05-01 09:30:00] Q: What is the toll policy?\nA: Tolls apply.\n{}\n",
                "-".repeat(80)
            )
        );
    }

    #[test]
    fn test_append_then_read_back() {
        let dir = TempDir::new().unwrap();
        let log = FileSessionLog::new(dir.path().join("logs").join("qa_history.txt"));

        assert!(log.records().unwrap().is_empty());

        let first = record("first question", "first answer");
        let second = record("second question", "line one\nline two");
        log.append(&first).unwrap();
        log.append(&second).unwrap();

        assert_eq!(log.records().unwrap(), vec![first, second]);
    }

    #[test]
    fn test_dashed_rule_inside_answer() {
        let dir = TempDir::new().unwrap();
        let log = FileSessionLog::new(dir.path().join("qa_history.txt"));

        let ruled = record(
            "toll table?",
            &format!("Vehicle classes\n{}\nCars: 2.50\n{}\n", "-".repeat(80), "-".repeat(80)),
        );
        let after = record("speed?", "Posted limits apply.");
        log.append(&ruled).unwrap();
        log.append(&after).unwrap();

        assert_eq!(log.records().unwrap(), vec![ruled, after]);
    }

    #[test]
    fn test_malformed_blocks_are_skipped() {
        let good = format_record(&record("q", "a"));
        let contents = format!("garbage\n{}\n{good}", "-".repeat(80));

        let records = parse_records(&contents);
        assert_eq!(records, vec![record("q", "a")]);
    }

    #[test]
    fn test_now_uses_log_timestamp_format() {
        let stamped = SummaryRecord::now("q", "a");
        assert_eq!(stamped.timestamp.len(), "2024-05-01 09:30:00".len());
        assert!(chrono::NaiveDateTime::parse_from_str(&stamped.timestamp, "%Y-%m-%d %H:%M:%S").is_ok());
    }
}
