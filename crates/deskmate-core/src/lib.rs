pub mod error;
pub mod gateway;
pub mod sanitize;
pub mod session;
pub mod settings;
pub mod voice;

// Re-export common error type
pub use error::{DeskmateError, Result};
