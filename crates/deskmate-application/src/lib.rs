//! Application layer: use cases over the session, voice, and settings
//! collaborators.

pub mod demo;
pub mod service;

pub use demo::demo_response;
pub use service::AssistantService;
