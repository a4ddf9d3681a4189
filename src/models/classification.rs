//! Classification result returned by the completion service.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Sentinel stored in `edition` when the book has no edition.
pub const NO_EDITION: i64 = -1;

/// Structured classification of a single book.
///
/// Field names are part of the remote contract and must match the JSON
/// object returned by the completion service exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookClassification {
    /// Book title
    pub title: String,

    /// Author surnames (comma-separated)
    pub author_surnames: String,

    /// Whether the book carries an edition number
    pub has_edition: bool,

    /// Edition number, or [`NO_EDITION`] when `has_edition` is false
    pub edition: i64,

    /// `/`-delimited category path, e.g. `Computer Science/Algorithms`
    pub folder: String,
}

impl BookClassification {
    /// Create a classification for a book without an edition.
    pub fn without_edition(
        title: impl Into<String>,
        author_surnames: impl Into<String>,
        folder: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author_surnames: author_surnames.into(),
            has_edition: false,
            edition: NO_EDITION,
            folder: folder.into(),
        }
    }

    /// Create a classification for a numbered edition.
    pub fn with_edition(
        title: impl Into<String>,
        author_surnames: impl Into<String>,
        edition: i64,
        folder: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author_surnames: author_surnames.into(),
            has_edition: true,
            edition,
            folder: folder.into(),
        }
    }

    /// Check the `has_edition` / `edition` pairing.
    ///
    /// A book without an edition must carry the `-1` sentinel, and a book
    /// with one must carry a positive edition number.
    pub fn validate(&self) -> Result<(), String> {
        if !self.has_edition && self.edition != NO_EDITION {
            return Err(format!(
                "has_edition is false but edition is {} (expected {})",
                self.edition, NO_EDITION
            ));
        }
        if self.has_edition && self.edition < 1 {
            return Err(format!(
                "has_edition is true but edition is {}",
                self.edition
            ));
        }
        Ok(())
    }

    /// The edition number, if any.
    pub fn edition(&self) -> Option<i64> {
        self.has_edition.then_some(self.edition)
    }

    /// Surnames split on commas, trimmed, empty entries dropped.
    pub fn surnames(&self) -> Vec<&str> {
        self.author_surnames
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Folder path components.
    pub fn folder_components(&self) -> Vec<&str> {
        self.folder
            .split('/')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// JSON schema describing this type, as sent to the completion service.
    pub fn json_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "title": {
                    "type": "string",
                    "description": "The title of the book"
                },
                "author_surnames": {
                    "type": "string",
                    "description": "Comma-separated list of the surnames of the book's authors"
                },
                "has_edition": {
                    "type": "boolean",
                    "description": "Whether the book has an edition number"
                },
                "edition": {
                    "type": "integer",
                    "description": "The edition number, or -1 if the book has no edition"
                },
                "folder": {
                    "type": "string",
                    "description": "Category folder path using / as separator"
                }
            },
            "required": ["title", "author_surnames", "has_edition", "edition", "folder"],
            "additionalProperties": false
        })
    }
}

impl std::fmt::Display for BookClassification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "title={:?} author_surnames={:?} has_edition={} edition={} folder={:?}",
            self.title, self.author_surnames, self.has_edition, self.edition, self.folder
        )
    }
}
