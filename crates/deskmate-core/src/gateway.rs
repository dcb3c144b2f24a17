//! Remote completion gateway trait.
//!
//! Defines the interface for sending a conversation to a chat-completions
//! endpoint and receiving the assistant's reply.

use crate::error::Result;
use crate::session::ConversationTurn;
use crate::settings::Settings;

/// Gateway to a remote chat-completions API.
///
/// Implementations perform exactly one request per call; there are no
/// retries and no response caching. A missing credential must be detected
/// before any network activity.
///
/// # Errors
///
/// - `NotConfigured` when `settings` carries no usable API key
/// - `Transport` for connection failures and non-success HTTP statuses
#[async_trait::async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Requests a completion for the ordered `turns`.
    ///
    /// Returns the first completion's text. When the provider responds
    /// without a usable completion the implementation returns a fixed
    /// fallback string rather than an error.
    async fn complete(&self, turns: &[ConversationTurn], settings: &Settings) -> Result<String>;

    /// Requests a short, history-free completion for a single prompt.
    ///
    /// Used for lightweight one-shot answers; conversation history is
    /// neither read nor written.
    async fn quick_response(&self, prompt: &str, settings: &Settings) -> Result<String>;
}
