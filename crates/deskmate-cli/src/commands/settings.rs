use anyhow::Result;
use colored::Colorize;

use deskmate_core::settings::{Settings, SettingsPatch};
use deskmate_infrastructure::SettingsStore;

/// Prints the persisted settings.
pub fn show() -> Result<()> {
    let store = SettingsStore::new()?;
    let settings = store.load()?;
    print_settings(&settings);
    Ok(())
}

/// Applies a patch to the persisted settings and prints the result.
pub fn set(patch: SettingsPatch) -> Result<()> {
    if patch.is_empty() {
        println!("{}", "Nothing to change. Pass at least one --flag.".yellow());
        return Ok(());
    }

    let store = SettingsStore::new()?;
    let updated = store.update(patch)?;

    println!("{}", "Settings updated.".bright_green());
    print_settings(&updated);
    Ok(())
}

/// Displays a settings record. The API key value is never shown.
pub(crate) fn print_settings(settings: &Settings) {
    let api_key = if settings.has_api_key() {
        "(set)"
    } else {
        "(not set)"
    };

    println!("{}", "Settings".bright_magenta().bold());
    println!("  api_key: {}", api_key);
    println!("  model_name: {}", settings.model_name);
    println!("  temperature: {}", settings.temperature);
    println!("  max_output_tokens: {}", settings.max_output_tokens);
    println!("  system_instruction:");
    for line in settings.system_instruction.lines() {
        println!("    {}", line.bright_black());
    }
}
