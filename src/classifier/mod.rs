//! Structured-completion classifiers.
//!
//! This module defines the [`Classifier`] trait that every completion provider
//! implements. A classifier receives the two-message [`Conversation`] built by
//! [`crate::prompt::build`] and returns a validated [`BookClassification`].
//!
//! - [`OpenAiClassifier`]: OpenAI-compatible chat completions endpoint
//! - [`MockClassifier`]: canned replies for tests
//!
//! Each call issues at most one request. Failures are never retried.

mod mock;
mod openai;

pub use mock::MockClassifier;
pub use openai::OpenAiClassifier;

use async_trait::async_trait;

use crate::models::{BookClassification, Conversation};
use crate::utils::extract_json_payload;

/// The Classifier trait defines the interface for completion providers.
#[async_trait]
pub trait Classifier: Send + Sync + std::fmt::Debug {
    /// Human-readable name of this provider
    fn name(&self) -> &str;

    /// Classify a book from its prompt conversation
    async fn classify(
        &self,
        conversation: &Conversation,
    ) -> Result<BookClassification, ClassifyError>;
}

/// Errors that can occur while classifying a book
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    /// Connection failure, timeout, or non-success HTTP status
    #[error("Transport error: {0}")]
    Transport(String),

    /// The reply did not match the expected classification shape
    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    /// The classifier could not be set up
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ClassifyError {
    fn from(err: reqwest::Error) -> Self {
        ClassifyError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ClassifyError {
    fn from(err: serde_json::Error) -> Self {
        ClassifyError::SchemaViolation(format!("JSON: {}", err))
    }
}

/// Parse and validate the JSON content of a model reply.
pub fn parse_classification(content: &str) -> Result<BookClassification, ClassifyError> {
    let payload = extract_json_payload(content);
    let classification: BookClassification = serde_json::from_str(payload)?;
    classification
        .validate()
        .map_err(ClassifyError::SchemaViolation)?;
    Ok(classification)
}
