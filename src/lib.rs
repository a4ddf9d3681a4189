//! # Book Organizer
//!
//! Classifies an eBook into a category folder tree. The file name and embedded
//! bibliographic metadata are sent to a structured-completion service, which
//! returns the title, author surnames, edition and folder path.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`metadata`]: PDF and EPUB metadata extraction
//! - [`prompt`]: the classification instruction and conversation builder
//! - [`classifier`]: completion providers behind the [`Classifier`] trait
//! - [`pipeline`]: extract → prompt → classify for one file
//! - [`models`]: Core data structures (BookClassification, MetadataSummary, etc.)
//! - [`ui`]: report output
//! - [`utils`]: HTTP client and reply parsing helpers
//! - [`config`]: Configuration management

pub mod classifier;
pub mod config;
pub mod metadata;
pub mod models;
pub mod pipeline;
pub mod prompt;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use classifier::{Classifier, ClassifyError};
pub use models::{BookClassification, MetadataSummary};
pub use pipeline::{classify_file, PipelineError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
