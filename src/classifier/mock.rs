//! Mock classifier for testing purposes.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::classifier::{parse_classification, Classifier, ClassifyError};
use crate::models::{BookClassification, Conversation};

#[derive(Debug)]
enum Reply {
    Content(String),
    TransportFailure(String),
}

/// A classifier that returns a predefined reply and records what it was sent.
#[derive(Debug)]
pub struct MockClassifier {
    reply: Reply,
    received: Mutex<Vec<Conversation>>,
}

impl MockClassifier {
    /// Reply with the given raw content, parsed like a real model reply.
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            reply: Reply::Content(content.into()),
            received: Mutex::new(Vec::new()),
        }
    }

    /// Reply with the JSON form of a classification.
    pub fn with_classification(classification: &BookClassification) -> Self {
        let content = serde_json::to_string(classification)
            .expect("BookClassification always serializes");
        Self::with_content(content)
    }

    /// Fail every call with a transport error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Reply::TransportFailure(message.into()),
            received: Mutex::new(Vec::new()),
        }
    }

    /// Conversations received so far.
    pub fn received(&self) -> Vec<Conversation> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl Classifier for MockClassifier {
    fn name(&self) -> &str {
        "Mock Classifier"
    }

    async fn classify(
        &self,
        conversation: &Conversation,
    ) -> Result<BookClassification, ClassifyError> {
        self.received.lock().unwrap().push(conversation.clone());

        match &self.reply {
            Reply::Content(content) => parse_classification(content),
            Reply::TransportFailure(message) => Err(ClassifyError::Transport(message.clone())),
        }
    }
}
