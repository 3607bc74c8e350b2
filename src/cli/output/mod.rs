//! CLI output formatting
//!
//! Every command result implements [`CommandOutput`] so `--json` can switch
//! between human text and machine-readable output in one place.

pub mod progress;
pub mod table;

pub use progress::create_progress_bar;
pub use table::TableFormatter;

use serde::Serialize;

/// A command result printable as text or JSON
pub trait CommandOutput: Serialize {
    /// Text shown at a terminal
    fn to_human(&self) -> String;

    /// Machine-readable form; the serde representation by default
    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Print `result` in the selected mode
pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    if json_mode {
        println!("{}", serde_json::to_string_pretty(&result.to_json()).unwrap_or_default());
    } else {
        println!("{}", result.to_human());
    }
}

/// Truncate to `max_chars` characters, appending "..." if truncated.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
