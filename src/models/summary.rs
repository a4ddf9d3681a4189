//! Plain-text metadata summary sent as the user message.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Ordered `field: value` lines describing one book file.
///
/// The first line is always `Filename: {path}`; the remaining lines depend on
/// what the source format exposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataSummary {
    lines: Vec<String>,
}

impl MetadataSummary {
    /// Start a summary for the given path.
    pub fn new(path: &Path) -> Self {
        Self {
            lines: vec![format!("Filename: {}", path.display())],
        }
    }

    /// Append a `key: value` line.
    pub fn push(&mut self, key: &str, value: &str) {
        self.lines.push(format!("{}: {}", key, value));
    }

    /// Append a line only if the value is non-empty.
    pub fn push_non_empty(&mut self, key: &str, value: &str) {
        if !value.trim().is_empty() {
            self.push(key, value);
        }
    }

    /// The summary lines, filename first.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines, including the filename line.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Always false: a summary carries at least the filename line.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Render the newline-terminated text used as the user message.
    pub fn to_message(&self) -> String {
        let mut text = String::new();
        for line in &self.lines {
            text.push_str(line);
            text.push('\n');
        }
        text
    }
}

impl std::fmt::Display for MetadataSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_message())
    }
}
