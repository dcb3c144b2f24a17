pub mod ask;
pub mod chat;
pub mod settings;
pub mod voice;
