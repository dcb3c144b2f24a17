//! Assistant session manager.
//!
//! Owns one session's conversation history and settings, and drives the
//! chat pipeline against the completion gateway: sanitize and record the
//! user turn, build the request payload, call the gateway, record the
//! assistant turn.

use deskmate_core::error::Result;
use deskmate_core::gateway::CompletionGateway;
use deskmate_core::session::{ConversationHistory, ConversationTurn};
use deskmate_core::settings::Settings;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Manages a single assistant session.
///
/// # Thread Safety
///
/// History and settings sit behind `RwLock` so the manager can be shared
/// (`Arc`) with background tasks such as the voice flow. Use remains
/// sequential per session: one completion is in flight at a time, enforced
/// by the calling surface rather than here.
pub struct AssistantManager {
    session_id: String,
    history: RwLock<ConversationHistory>,
    settings: RwLock<Settings>,
    gateway: Arc<dyn CompletionGateway>,
}

impl AssistantManager {
    /// Creates a manager for a fresh session with a generated id.
    pub fn new(settings: Settings, gateway: Arc<dyn CompletionGateway>) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            history: RwLock::new(ConversationHistory::new()),
            settings: RwLock::new(settings),
            gateway,
        }
    }

    /// Overrides the generated session id.
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }

    /// The id of the session this manager owns.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Runs one chat round trip and returns the assistant's reply.
    ///
    /// The user turn is recorded before the gateway call and stays recorded
    /// if the call fails; the assistant turn is only recorded on success.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` when the input sanitizes to nothing (the gateway is
    ///   never called and history is unchanged)
    /// - `NotConfigured` / `Transport` passed through from the gateway
    pub async fn chat(&self, input: &str) -> Result<String> {
        let settings = self.settings.read().await.clone();

        // Build the payload under the lock, call the gateway outside it
        let payload = {
            let mut history = self.history.write().await;
            history.append_user_turn(input)?;
            history.build_request(&settings)
        };

        tracing::info!(
            "[Chat] session={} sending {} turns to {}",
            self.session_id,
            payload.len(),
            settings.model_name
        );

        let reply = match self.gateway.complete(&payload, &settings).await {
            Ok(reply) => reply,
            Err(err) => {
                tracing::warn!("[Chat] session={} completion failed: {}", self.session_id, err);
                return Err(err);
            }
        };

        self.history
            .write()
            .await
            .append_assistant_turn(reply.clone());
        Ok(reply)
    }

    /// Clears the session's history.
    pub async fn clear_history(&self) {
        self.history.write().await.clear();
        tracing::info!("[Chat] session={} history cleared", self.session_id);
    }

    /// A snapshot of the retained turns, oldest first.
    pub async fn history(&self) -> Vec<ConversationTurn> {
        self.history.read().await.turns().to_vec()
    }

    /// A snapshot of the current settings.
    pub async fn settings(&self) -> Settings {
        self.settings.read().await.clone()
    }

    /// Swaps in a new settings record for subsequent requests.
    pub async fn replace_settings(&self, settings: Settings) {
        *self.settings.write().await = settings;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use deskmate_core::error::DeskmateError;
    use deskmate_core::session::TurnRole;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Gateway double: counts calls, records the payload, replies or fails.
    struct MockGateway {
        calls: AtomicUsize,
        reply: std::result::Result<String, DeskmateError>,
        last_payload: Mutex<Option<Vec<ConversationTurn>>>,
        last_settings: Mutex<Option<Settings>>,
    }

    impl MockGateway {
        fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                reply: Ok(reply.to_string()),
                last_payload: Mutex::new(None),
                last_settings: Mutex::new(None),
            })
        }

        fn failing(err: DeskmateError) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                reply: Err(err),
                last_payload: Mutex::new(None),
                last_settings: Mutex::new(None),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn last_payload(&self) -> Vec<ConversationTurn> {
            self.last_payload.lock().unwrap().clone().unwrap()
        }
    }

    #[async_trait]
    impl CompletionGateway for MockGateway {
        async fn complete(
            &self,
            turns: &[ConversationTurn],
            settings: &Settings,
        ) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_payload.lock().unwrap() = Some(turns.to_vec());
            *self.last_settings.lock().unwrap() = Some(settings.clone());
            self.reply.clone()
        }

        async fn quick_response(&self, prompt: &str, _settings: &Settings) -> Result<String> {
            Ok(format!("quick: {prompt}"))
        }
    }

    #[tokio::test]
    async fn chat_records_user_and_assistant_turns() {
        let gateway = MockGateway::replying("hello back");
        let manager = AssistantManager::new(Settings::default(), gateway.clone());

        let reply = manager.chat("hello").await.unwrap();
        assert_eq!(reply, "hello back");

        let history = manager.history().await;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, TurnRole::User);
        assert_eq!(history[0].content, "hello");
        assert_eq!(history[1].role, TurnRole::Assistant);
        assert_eq!(history[1].content, "hello back");
    }

    #[tokio::test]
    async fn failed_completion_keeps_user_turn_but_no_assistant_turn() {
        let gateway = MockGateway::failing(DeskmateError::transport_status(500, "boom"));
        let manager = AssistantManager::new(Settings::default(), gateway);

        let err = manager.chat("hello").await.unwrap_err();
        assert!(err.is_transport());

        let history = manager.history().await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].role, TurnRole::User);
    }

    #[tokio::test]
    async fn rejected_input_never_reaches_the_gateway() {
        let gateway = MockGateway::replying("unused");
        let manager = AssistantManager::new(Settings::default(), gateway.clone());

        let err = manager.chat("   ").await.unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(gateway.call_count(), 0);
        assert!(manager.history().await.is_empty());
    }

    #[tokio::test]
    async fn payload_opens_with_the_current_system_instruction() {
        let gateway = MockGateway::replying("ok");
        let manager = AssistantManager::new(Settings::default(), gateway.clone());

        let mut updated = Settings::default();
        updated.system_instruction = "You are a terse assistant.".to_string();
        manager.replace_settings(updated).await;

        manager.chat("hi").await.unwrap();

        let payload = gateway.last_payload();
        assert_eq!(payload[0].role, TurnRole::System);
        assert_eq!(payload[0].content, "You are a terse assistant.");
        assert_eq!(payload[1].content, "hi");
    }

    #[tokio::test]
    async fn replaced_settings_reach_the_gateway() {
        let gateway = MockGateway::replying("ok");
        let manager = AssistantManager::new(Settings::default(), gateway.clone());

        let mut updated = Settings::default();
        updated.model_name = "gpt-4".to_string();
        manager.replace_settings(updated).await;

        manager.chat("hi").await.unwrap();

        let settings = gateway.last_settings.lock().unwrap().clone().unwrap();
        assert_eq!(settings.model_name, "gpt-4");
    }

    #[tokio::test]
    async fn clear_history_empties_the_session() {
        let gateway = MockGateway::replying("ok");
        let manager = AssistantManager::new(Settings::default(), gateway);

        manager.chat("hi").await.unwrap();
        manager.clear_history().await;
        assert!(manager.history().await.is_empty());
    }

    #[tokio::test]
    async fn history_stays_within_capacity_across_many_rounds() {
        let gateway = MockGateway::replying("reply");
        let manager = AssistantManager::new(Settings::default(), gateway);

        for i in 0..12 {
            manager.chat(&format!("message {i}")).await.unwrap();
        }

        let history = manager.history().await;
        assert_eq!(history.len(), deskmate_core::session::DEFAULT_HISTORY_CAPACITY);
        // The newest round trip is always retained
        assert_eq!(history.last().unwrap().content, "reply");
    }
}
