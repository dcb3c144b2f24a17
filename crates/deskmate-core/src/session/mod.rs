//! Session domain module.
//!
//! This module contains the conversation types owned by a single assistant
//! session.
//!
//! # Module Structure
//!
//! - `turn`: Conversation turn types (`TurnRole`, `ConversationTurn`)
//! - `history`: Capacity-bounded history (`ConversationHistory`)
//! - `event`: UI-bound session events (`VoiceExchange`)

mod event;
mod history;
mod turn;

// Re-export public API
pub use event::VoiceExchange;
pub use history::{ConversationHistory, DEFAULT_HISTORY_CAPACITY};
pub use turn::{ConversationTurn, TurnRole};
