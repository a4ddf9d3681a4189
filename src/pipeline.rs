//! The extract → prompt → classify pipeline for a single book file.

use std::io::Write;
use std::path::Path;
use thiserror::Error;

use crate::classifier::{Classifier, ClassifyError};
use crate::metadata::{self, ExtractError};
use crate::models::{BookClassification, Conversation};
use crate::prompt;
use crate::ui::{self, OutputFormat};

/// Errors from any stage of the pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Classify(#[from] ClassifyError),

    #[error("Failed to write report: {0}")]
    Output(#[from] std::io::Error),
}

/// Outcome of a completed classification
#[derive(Debug, Clone)]
pub struct ClassifiedBook {
    /// The user message that was sent
    pub prompt: String,
    /// The validated classification
    pub classification: BookClassification,
}

/// Extract a file's metadata and build the conversation for it.
pub fn prepare(path: &Path) -> Result<Conversation, ExtractError> {
    let summary = metadata::extract(path)?;
    tracing::info!(
        "Built prompt for {} from {} metadata lines",
        path.display(),
        summary.len()
    );
    Ok(prompt::build(&summary))
}

/// Run the whole pipeline for one file.
pub async fn classify_file(
    path: &Path,
    classifier: &dyn Classifier,
) -> Result<ClassifiedBook, PipelineError> {
    let conversation = prepare(path)?;
    tracing::info!("Classifying {} with {}", path.display(), classifier.name());

    let classification = classifier.classify(&conversation).await?;
    Ok(ClassifiedBook {
        prompt: conversation.user().content.clone(),
        classification,
    })
}

/// Run the pipeline for one file and write the report to `out`.
///
/// The prompt is written and flushed before the classifier is called, so a
/// failed call leaves only the prompt in `out`.
pub async fn run<W: Write>(
    path: &Path,
    classifier: &dyn Classifier,
    out: &mut W,
    format: OutputFormat,
    styled: bool,
) -> Result<BookClassification, PipelineError> {
    let conversation = prepare(path)?;
    ui::report_prompt(out, &conversation.user().content)?;

    tracing::info!("Classifying {} with {}", path.display(), classifier.name());
    let classification = classifier.classify(&conversation).await?;

    ui::report_result(out, &classification, format, styled)?;
    Ok(classification)
}
