//! Question/answer history port.

use crate::domain::errors::DomainResult;
use crate::domain::models::SummaryRecord;

/// Append-only store of answered questions.
pub trait SessionLog: Send + Sync {
    fn append(&self, record: &SummaryRecord) -> DomainResult<()>;

    /// All records in the order they were written.
    fn records(&self) -> DomainResult<Vec<SummaryRecord>>;
}
