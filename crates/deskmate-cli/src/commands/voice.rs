use anyhow::Result;
use colored::Colorize;

use deskmate_application::AssistantService;

/// Runs one voice command and prints the exchange.
pub async fn run(service: AssistantService) -> Result<()> {
    println!("{}", "Listening...".bright_black());

    let exchange = service.voice_command().await?;

    println!("{}", format!("Heard: {}", exchange.input).green());
    for line in exchange.response.lines() {
        println!("{}", line.bright_blue());
    }

    Ok(())
}
