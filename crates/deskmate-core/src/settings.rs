//! Assistant settings.
//!
//! One flat record drives both collaborators: the completion gateway reads
//! the credential and model parameters, the history manager reads the system
//! instruction when building a request payload. The record is loaded once at
//! startup and passed explicitly; there is no ambient global.

use serde::{Deserialize, Serialize};

/// Model used when none has been configured.
pub const DEFAULT_MODEL_NAME: &str = "gpt-3.5-turbo";

/// Sampling temperature used when none has been configured.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Completion token budget used when none has been configured.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1000;

/// System instruction prepended to every completion request.
pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "You are DeskMate, an intelligent desktop assistant. You help users with various tasks including:
- Answering questions and providing information
- Helping with productivity and organization
- Providing coding assistance and technical support
- Managing reminders and tasks
- System-level assistance

Be concise, helpful, and friendly. Always aim to provide actionable advice.";

/// The persisted assistant settings record.
///
/// Serialized as flat JSON; unknown or missing fields fall back to defaults
/// so older settings files keep loading after a field is added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// API key for the completion endpoint. `None` or blank means the
    /// gateway is not configured and must not be called.
    pub api_key: Option<String>,
    /// Model identifier sent with every request.
    pub model_name: String,
    /// Sampling temperature sent with every request.
    pub temperature: f32,
    /// Completion token budget sent with every request.
    pub max_output_tokens: u32,
    /// System instruction injected as the first message of every request.
    pub system_instruction: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            model_name: DEFAULT_MODEL_NAME.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            system_instruction: DEFAULT_SYSTEM_INSTRUCTION.to_string(),
        }
    }
}

impl Settings {
    /// Returns true when a non-blank API key is present.
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }

    /// Merges a partial update into this record, field by field.
    ///
    /// Fields the patch leaves unset keep their current value.
    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(api_key) = patch.api_key {
            self.api_key = Some(api_key);
        }
        if let Some(model_name) = patch.model_name {
            self.model_name = model_name;
        }
        if let Some(temperature) = patch.temperature {
            self.temperature = temperature;
        }
        if let Some(max_output_tokens) = patch.max_output_tokens {
            self.max_output_tokens = max_output_tokens;
        }
        if let Some(system_instruction) = patch.system_instruction {
            self.system_instruction = system_instruction;
        }
    }
}

/// A partial settings update.
///
/// Every field is optional; only present fields overwrite the stored record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsPatch {
    pub api_key: Option<String>,
    pub model_name: Option<String>,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
    pub system_instruction: Option<String>,
}

impl SettingsPatch {
    /// Returns true when the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.api_key.is_none()
            && self.model_name.is_none()
            && self.temperature.is_none()
            && self.max_output_tokens.is_none()
            && self.system_instruction.is_none()
    }
}
