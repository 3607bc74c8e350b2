//! Table output formatting for CLI commands
//!
//! Renders question/answer history with comfy-table. Honors NO_COLOR and
//! dumb terminals.

use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use std::env;

use super::truncate;
use crate::domain::models::SummaryRecord;

/// Table formatter for CLI output
pub struct TableFormatter {
    use_colors: bool,
    /// Maximum width for tables (None = auto)
    max_width: Option<u16>,
}

impl TableFormatter {
    /// Formatter with colors and no width limit
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
            max_width: None,
        }
    }

    /// Formatter with explicit color and width settings
    pub fn with_config(use_colors: bool, max_width: Option<u16>) -> Self {
        Self {
            use_colors,
            max_width,
        }
    }

    /// Format history records, oldest first
    pub fn format_history(&self, records: &[SummaryRecord]) -> String {
        let mut table = self.create_base_table();

        table.set_header(vec![
            self.header("Time"),
            self.header("Question"),
            self.header("Answer"),
        ]);

        for record in records {
            let time = if self.use_colors {
                Cell::new(&record.timestamp).fg(Color::DarkGrey)
            } else {
                Cell::new(&record.timestamp)
            };
            table.add_row(vec![
                time,
                Cell::new(truncate(&record.query, 60)),
                Cell::new(truncate(&record.answer, 200)),
            ]);
        }

        table.to_string()
    }

    fn header(&self, title: &str) -> Cell {
        let cell = Cell::new(title).add_attribute(Attribute::Bold);
        if self.use_colors {
            cell.fg(Color::Cyan)
        } else {
            cell
        }
    }

    fn create_base_table(&self) -> Table {
        let mut table = Table::new();

        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        if let Some(width) = self.max_width {
            table.set_width(width);
        }

        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn supports_color() -> bool {
    if env::var("NO_COLOR").is_ok() {
        return false;
    }

    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    true
}
