pub mod completion;
pub mod manager;
pub mod voice_agent;

pub use completion::{
    ChatTransport, HttpChatTransport, NO_COMPLETION_FALLBACK, NO_QUICK_RESPONSE_FALLBACK,
    OpenAiCompletionAgent,
};
pub use manager::AssistantManager;
pub use voice_agent::SimulatedVoiceAgent;
