//! Dashboard chat transcript types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The signed-in user.
    User,
    /// The analysis assistant.
    Assistant,
}

/// A single message in the dashboard chat panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message id.
    pub id: String,
    /// Message body.
    pub content: String,
    /// Author role.
    pub role: ChatRole,
    /// When the message was sent.
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Creates a message.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        role: ChatRole,
        content: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            role,
            timestamp,
        }
    }
}
