use serde::{Deserialize, Serialize};

/// A completed voice interaction, published to the UI layer.
///
/// Delivery is fire-and-forget: the host pushes the pair onto the event
/// channel and does not wait for the UI to consume it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceExchange {
    /// What the voice capture heard (or a canned marker on failure).
    pub input: String,
    /// The response shown for it.
    pub response: String,
}

impl VoiceExchange {
    pub fn new(input: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            response: response.into(),
        }
    }
}
