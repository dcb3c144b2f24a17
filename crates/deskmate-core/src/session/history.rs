//! Capacity-bounded conversation history.

use serde::{Deserialize, Serialize};

use crate::error::{DeskmateError, Result};
use crate::sanitize::sanitize_input;
use crate::session::turn::{ConversationTurn, TurnRole};
use crate::settings::Settings;

/// Number of turns kept by default before the oldest is evicted.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// An ordered, capacity-bounded list of conversation turns.
///
/// Insertion order is significant. Once the number of turns exceeds the
/// capacity the oldest turns are dropped, so the history always holds the
/// most recent window of the conversation. A history belongs to exactly one
/// session and is cleared wholesale when that session resets.
///
/// # Examples
///
/// ```
/// use deskmate_core::session::ConversationHistory;
///
/// let history = ConversationHistory::new();
/// assert!(history.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationHistory {
    turns: Vec<ConversationTurn>,
    capacity: usize,
}

impl ConversationHistory {
    /// Creates an empty history with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// Creates an empty history bounded to `capacity` turns.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            turns: Vec::new(),
            capacity,
        }
    }

    /// Appends a user turn after sanitizing the input.
    ///
    /// # Errors
    ///
    /// Returns `DeskmateError::InvalidInput` when the sanitized text is
    /// empty. The history is left unchanged in that case.
    pub fn append_user_turn(&mut self, text: &str) -> Result<()> {
        let cleaned = sanitize_input(text);
        if cleaned.is_empty() {
            return Err(DeskmateError::invalid_input(
                "message is empty after sanitization",
            ));
        }
        self.turns.push(ConversationTurn::user(cleaned));
        self.trim();
        Ok(())
    }

    /// Appends an assistant turn.
    ///
    /// Assistant content is trusted as-is; it comes from the completion
    /// gateway, not from user input, so no validation is applied.
    pub fn append_assistant_turn(&mut self, text: impl Into<String>) {
        self.turns.push(ConversationTurn::assistant(text));
        self.trim();
    }

    /// Drops the oldest turns until the history is within capacity.
    ///
    /// Both append operations call this, so `len() <= capacity()` holds
    /// after every append. Calling it again is harmless.
    pub fn trim(&mut self) {
        if self.turns.len() > self.capacity {
            let excess = self.turns.len() - self.capacity;
            self.turns.drain(..excess);
        }
    }

    /// Builds the ordered turn list for a completion request.
    ///
    /// The result is a single system turn carrying
    /// `settings.system_instruction` followed by every history turn in
    /// original order. The history itself is not modified.
    pub fn build_request(&self, settings: &Settings) -> Vec<ConversationTurn> {
        let mut payload = Vec::with_capacity(self.turns.len() + 1);
        payload.push(ConversationTurn::system(
            settings.system_instruction.clone(),
        ));
        payload.extend(self.turns.iter().cloned());
        payload
    }

    /// Removes every turn.
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// The retained turns, oldest first.
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// Number of retained turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Returns true when no turns are retained.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Maximum number of turns retained.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ConversationHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_stay_within_capacity() {
        let mut history = ConversationHistory::with_capacity(3);
        for i in 0..8 {
            history.append_user_turn(&format!("message {i}")).unwrap();
            assert!(history.len() <= 3);
        }
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn oldest_turns_are_evicted_first() {
        // Capacity 2: append user "a", assistant "b", user "c".
        // "a" must be gone, "b" and "c" retained in order.
        let mut history = ConversationHistory::with_capacity(2);
        history.append_user_turn("a").unwrap();
        history.append_assistant_turn("b");
        history.append_user_turn("c").unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(history.turns()[0].role, TurnRole::Assistant);
        assert_eq!(history.turns()[0].content, "b");
        assert_eq!(history.turns()[1].role, TurnRole::User);
        assert_eq!(history.turns()[1].content, "c");

        // The request payload reflects the trimmed window
        let payload = history.build_request(&Settings::default());
        assert_eq!(payload.len(), 3);
        assert_eq!(payload[0].role, TurnRole::System);
        assert_eq!(payload[1].content, "b");
        assert_eq!(payload[2].content, "c");
    }

    #[test]
    fn empty_user_input_is_rejected_and_history_unchanged() {
        let mut history = ConversationHistory::new();
        let err = history.append_user_turn("").unwrap_err();
        assert!(err.is_invalid_input());

        let err = history.append_user_turn("   \t  ").unwrap_err();
        assert!(err.is_invalid_input());

        assert!(history.is_empty());
    }

    #[test]
    fn input_that_sanitizes_to_nothing_is_rejected() {
        let mut history = ConversationHistory::new();
        let err = history
            .append_user_turn("<script>alert(1)</script>")
            .unwrap_err();
        assert!(err.is_invalid_input());
        assert!(history.is_empty());
    }

    #[test]
    fn user_input_is_sanitized_before_append() {
        let mut history = ConversationHistory::new();
        history.append_user_turn("  hello there  ").unwrap();
        assert_eq!(history.turns()[0].content, "hello there");
    }

    #[test]
    fn assistant_turns_are_appended_untouched() {
        let mut history = ConversationHistory::new();
        history.append_assistant_turn("  raw model output  ");
        assert_eq!(history.turns()[0].content, "  raw model output  ");
        assert_eq!(history.turns()[0].role, TurnRole::Assistant);
    }

    #[test]
    fn build_request_puts_system_instruction_first() {
        let mut history = ConversationHistory::new();
        history.append_user_turn("first").unwrap();
        history.append_assistant_turn("second");

        let settings = Settings::default();
        let payload = history.build_request(&settings);

        assert_eq!(payload.len(), 3);
        assert_eq!(payload[0].role, TurnRole::System);
        assert_eq!(payload[0].content, settings.system_instruction);
        assert_eq!(payload[1].content, "first");
        assert_eq!(payload[2].content, "second");
    }

    #[test]
    fn build_request_on_empty_history_is_system_only() {
        let history = ConversationHistory::new();
        let payload = history.build_request(&Settings::default());
        assert_eq!(payload.len(), 1);
        assert_eq!(payload[0].role, TurnRole::System);
    }

    #[test]
    fn build_request_does_not_consume_history() {
        let mut history = ConversationHistory::new();
        history.append_user_turn("kept").unwrap();
        let _ = history.build_request(&Settings::default());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn clear_removes_everything() {
        let mut history = ConversationHistory::new();
        history.append_user_turn("one").unwrap();
        history.append_assistant_turn("two");
        history.clear();
        assert!(history.is_empty());
    }
}
