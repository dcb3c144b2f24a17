//! Conversation turn types.
//!
//! This module contains types for representing turns in a conversation,
//! including roles and turn content.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Represents the role of a turn in a conversation.
///
/// Serializes to the lowercase strings the chat-completions wire format
/// expects (`"system"`, `"user"`, `"assistant"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// System instruction placed at the head of a request payload.
    System,
    /// Turn submitted by the user.
    User,
    /// Turn produced by the assistant.
    Assistant,
}

/// A single turn in a conversation history.
///
/// Each turn has a role (system, user, or assistant), content, and a
/// timestamp indicating when it was created. Turns are immutable once
/// appended to a history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// The role of the turn's author.
    pub role: TurnRole,
    /// The content of the turn.
    pub content: String,
    /// Timestamp when the turn was created (RFC 3339 format).
    pub created_at: String,
}

impl ConversationTurn {
    /// Creates a turn with the given role, stamped with the current time.
    pub fn new(role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            created_at: Utc::now().to_rfc3339(),
        }
    }

    /// Creates a system turn.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(TurnRole::System, content)
    }

    /// Creates a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(TurnRole::User, content)
    }

    /// Creates an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(TurnRole::Assistant, content)
    }
}
