pub mod paths;
pub mod settings_store;

pub use crate::paths::DeskmatePaths;
pub use crate::settings_store::SettingsStore;
