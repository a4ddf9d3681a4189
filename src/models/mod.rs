//! Core data models for book classification.

mod classification;
mod message;
mod summary;

pub use classification::{BookClassification, NO_EDITION};
pub use message::{Conversation, ConversationMessage, Role};
pub use summary::MetadataSummary;
