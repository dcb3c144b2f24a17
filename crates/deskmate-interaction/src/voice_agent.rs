//! Simulated voice capture agent.
//!
//! There is no speech recognition here. The agent stands in for one while
//! the capture flow, busy guard, and UI plumbing around it stay real. A
//! recognizer backed by an actual speech service would implement the same
//! `VoiceCapture` trait.

use async_trait::async_trait;
use deskmate_core::error::{DeskmateError, Result};
use deskmate_core::voice::VoiceCapture;
use rand::seq::SliceRandom;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// How long a simulated capture takes, matching a short recording window.
const CAPTURE_DELAY: Duration = Duration::from_secs(2);

/// Utterances the simulation picks from.
const SIMULATED_UTTERANCES: [&str; 8] = [
    "What's the weather today?",
    "Help me with my coding project",
    "Set a reminder for 3 PM",
    "Tell me a joke",
    "What's the current time?",
    "Open my email",
    "Schedule a meeting",
    "Summarize my tasks",
];

/// Fixed-delay voice capture simulation.
///
/// `capture` waits out the recording window, then resolves with one random
/// canned utterance. Overlapping captures are rejected; a single microphone
/// can only serve one capture at a time and a real recognizer would need
/// the same guard.
pub struct SimulatedVoiceAgent {
    listening: AtomicBool,
    capture_delay: Duration,
}

impl SimulatedVoiceAgent {
    pub fn new() -> Self {
        Self {
            listening: AtomicBool::new(false),
            capture_delay: CAPTURE_DELAY,
        }
    }

    /// Overrides the capture delay. Tests use a short one.
    pub fn with_capture_delay(mut self, delay: Duration) -> Self {
        self.capture_delay = delay;
        self
    }
}

impl Default for SimulatedVoiceAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VoiceCapture for SimulatedVoiceAgent {
    async fn capture(&self) -> Result<String> {
        if self.listening.swap(true, Ordering::SeqCst) {
            return Err(DeskmateError::busy("Already listening"));
        }

        tracing::info!("[Voice] Recognition started");
        tokio::time::sleep(self.capture_delay).await;

        let phrase = SIMULATED_UTTERANCES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(SIMULATED_UTTERANCES[0])
            .to_string();

        self.listening.store(false, Ordering::SeqCst);
        tracing::info!("[Voice] Recognition completed: {}", phrase);
        Ok(phrase)
    }

    fn is_listening(&self) -> bool {
        self.listening.load(Ordering::SeqCst)
    }

    fn stop(&self) {
        self.listening.store(false, Ordering::SeqCst);
        tracing::info!("[Voice] Recognition stopped");
    }
}
