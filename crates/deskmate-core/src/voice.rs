//! Voice capture service trait.
//!
//! Defines the interface for turning a capture window into text. The
//! shipped implementation is a fixed-delay simulation; a real recognizer
//! would implement this same trait.

use crate::error::Result;

/// Service that captures one utterance and returns it as text.
#[async_trait::async_trait]
pub trait VoiceCapture: Send + Sync {
    /// Captures a single utterance.
    ///
    /// Resolves with the recognized text once the capture window closes.
    ///
    /// # Errors
    ///
    /// Returns `DeskmateError::Busy` when a capture is already in flight.
    async fn capture(&self) -> Result<String>;

    /// Returns true while a capture is in flight.
    fn is_listening(&self) -> bool;

    /// Clears the listening state.
    ///
    /// A capture already in flight still resolves; this only resets the
    /// guard so a new capture can start.
    fn stop(&self);
}
