//! Chat messages exchanged with the completion service.

use serde::{Deserialize, Serialize};

/// Author of a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single `(role, content)` message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: Role,
    pub content: String,
}

impl ConversationMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// The two-message conversation sent for one classification.
///
/// The system instruction always precedes the user content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    system: ConversationMessage,
    user: ConversationMessage,
}

impl Conversation {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: ConversationMessage::system(system),
            user: ConversationMessage::user(user),
        }
    }

    pub fn system(&self) -> &ConversationMessage {
        &self.system
    }

    pub fn user(&self) -> &ConversationMessage {
        &self.user
    }

    /// Messages in send order.
    pub fn messages(&self) -> [&ConversationMessage; 2] {
        [&self.system, &self.user]
    }
}
