//! Assistant application service.
//!
//! Wires the session manager, voice capture, settings store, and the
//! UI-bound event channel into the flows the shell calls: text chat, the
//! voice command round trip, and settings updates.

use deskmate_core::error::Result;
use deskmate_core::gateway::CompletionGateway;
use deskmate_core::session::{ConversationTurn, VoiceExchange};
use deskmate_core::settings::{Settings, SettingsPatch};
use deskmate_core::voice::VoiceCapture;
use deskmate_infrastructure::SettingsStore;
use deskmate_interaction::AssistantManager;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::demo::demo_response;

const VOICE_FAILURE_INPUT: &str = "Voice command failed";
const VOICE_FAILURE_RESPONSE: &str = "Sorry, there was an error processing your voice command.";

/// Application-level facade over one assistant session.
pub struct AssistantService {
    manager: AssistantManager,
    gateway: Arc<dyn CompletionGateway>,
    voice: Arc<dyn VoiceCapture>,
    settings_store: SettingsStore,
    event_tx: Option<mpsc::UnboundedSender<VoiceExchange>>,
}

impl AssistantService {
    /// Creates a service over the given collaborators.
    ///
    /// `gateway` is the same instance the manager was built with; the
    /// service uses it directly for history-free quick responses.
    pub fn new(
        manager: AssistantManager,
        gateway: Arc<dyn CompletionGateway>,
        voice: Arc<dyn VoiceCapture>,
        settings_store: SettingsStore,
    ) -> Self {
        Self {
            manager,
            gateway,
            voice,
            settings_store,
            event_tx: None,
        }
    }

    /// Attaches the UI-bound event channel.
    ///
    /// Voice exchanges are pushed onto it fire-and-forget; without a
    /// sender the voice flow still works, callers just rely on the
    /// returned value alone.
    pub fn with_event_sender(mut self, event_tx: mpsc::UnboundedSender<VoiceExchange>) -> Self {
        self.event_tx = Some(event_tx);
        self
    }

    /// Runs one chat round trip against the session.
    pub async fn chat(&self, input: &str) -> Result<String> {
        self.manager.chat(input).await
    }

    /// Runs the full voice command flow: capture, chat, publish.
    ///
    /// When the completion fails the demo lookup supplies the response
    /// instead; that substitute is shown to the user but never recorded as
    /// an assistant turn. The resulting exchange is published on the event
    /// channel and returned.
    ///
    /// # Errors
    ///
    /// Returns the capture error when no utterance could be obtained. A
    /// canned failure pair is published in that case so an attached UI
    /// still shows something.
    pub async fn voice_command(&self) -> Result<VoiceExchange> {
        let heard = match self.voice.capture().await {
            Ok(heard) => heard,
            Err(err) => {
                tracing::warn!("[Voice] Capture failed: {}", err);
                self.publish(VoiceExchange::new(
                    VOICE_FAILURE_INPUT,
                    VOICE_FAILURE_RESPONSE,
                ));
                return Err(err);
            }
        };

        let response = match self.manager.chat(&heard).await {
            Ok(reply) => reply,
            Err(err) => {
                tracing::warn!("[Voice] Completion failed, using demo response: {}", err);
                demo_response(&heard)
            }
        };

        let exchange = VoiceExchange::new(heard, response);
        self.publish(exchange.clone());
        Ok(exchange)
    }

    /// Requests a short, history-free completion.
    pub async fn quick_response(&self, prompt: &str) -> Result<String> {
        let settings = self.manager.settings().await;
        self.gateway.quick_response(prompt, &settings).await
    }

    /// Applies a settings patch, persists the result wholesale, and makes
    /// it effective for subsequent requests.
    pub async fn update_settings(&self, patch: SettingsPatch) -> Result<Settings> {
        let updated = self.settings_store.update(patch)?;
        self.manager.replace_settings(updated.clone()).await;
        tracing::info!("[Settings] Updated and persisted");
        Ok(updated)
    }

    /// A snapshot of the effective settings.
    pub async fn settings(&self) -> Settings {
        self.manager.settings().await
    }

    /// A snapshot of the session history, oldest first.
    pub async fn history(&self) -> Vec<ConversationTurn> {
        self.manager.history().await
    }

    /// Clears the session history.
    pub async fn clear_history(&self) {
        self.manager.clear_history().await;
    }

    /// True while a voice capture is in flight.
    pub fn is_listening(&self) -> bool {
        self.voice.is_listening()
    }

    /// Resets the voice capture guard.
    pub fn stop_voice(&self) {
        self.voice.stop();
    }

    fn publish(&self, exchange: VoiceExchange) {
        if let Some(event_tx) = &self.event_tx {
            // Non-blocking send - a dropped receiver just means no UI is attached
            let _ = event_tx.send(exchange);
        }
    }
}
