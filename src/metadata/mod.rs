//! Bibliographic metadata extraction from book files.
//!
//! The format is inferred from the file name alone:
//!
//! - paths ending in `pdf` are read through their document-information dictionary
//! - paths ending in `epub` are read through the OPF package metadata
//! - anything else contributes only the `Filename:` line
//!
//! The suffix match is case-sensitive, so `BOOK.PDF` is treated as an unknown format.

mod epub;
mod pdf;

pub use epub::EpubMetadata;
pub use pdf::read_info_dictionary;

use std::path::Path;
use thiserror::Error;

use crate::models::MetadataSummary;

/// Errors that can occur while extracting metadata
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse {format} file: {message}")]
    Parse {
        format: BookFormat,
        message: String,
    },
}

impl ExtractError {
    pub(crate) fn parse(format: BookFormat, message: impl Into<String>) -> Self {
        ExtractError::Parse {
            format,
            message: message.into(),
        }
    }
}

/// Book file formats recognised by the extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookFormat {
    Pdf,
    Epub,
    Unknown,
}

impl BookFormat {
    /// Infer the format from the literal file name suffix.
    pub fn from_path(path: &Path) -> Self {
        let name = path.to_string_lossy();
        if name.ends_with("pdf") {
            BookFormat::Pdf
        } else if name.ends_with("epub") {
            BookFormat::Epub
        } else {
            BookFormat::Unknown
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BookFormat::Pdf => "PDF",
            BookFormat::Epub => "EPUB",
            BookFormat::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for BookFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Build the metadata summary for a book file.
///
/// Files of an unknown format are never opened, so they yield a summary
/// even when the path does not exist.
pub fn extract(path: &Path) -> Result<MetadataSummary, ExtractError> {
    let format = BookFormat::from_path(path);
    let mut summary = MetadataSummary::new(path);

    if format == BookFormat::Unknown {
        tracing::debug!("No metadata reader for {}", path.display());
        return Ok(summary);
    }

    if !path.exists() {
        return Err(ExtractError::NotFound(path.display().to_string()));
    }

    match format {
        BookFormat::Pdf => {
            for (key, value) in pdf::read_info_dictionary(path)? {
                summary.push(&key, &value);
            }
        }
        BookFormat::Epub => {
            let meta = EpubMetadata::read(path)?;
            if let Some(title) = &meta.title {
                summary.push_non_empty("Title", title);
            }
            if !meta.authors.is_empty() {
                summary.push("Authors", &meta.authors.join(", "));
            }
            if let Some(description) = &meta.description {
                summary.push_non_empty("Description", description);
            }
        }
        BookFormat::Unknown => {}
    }

    tracing::debug!(
        "Extracted {} metadata lines from {} file {}",
        summary.len() - 1,
        format,
        path.display()
    );

    Ok(summary)
}
