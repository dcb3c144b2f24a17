use anyhow::Result;
use colored::Colorize;

use deskmate_application::AssistantService;

/// Sends one prompt and prints the reply.
///
/// `brief` routes through the quick response path: no session history,
/// short answer.
pub async fn run(service: AssistantService, prompt: &str, brief: bool) -> Result<()> {
    let reply = if brief {
        service.quick_response(prompt).await?
    } else {
        service.chat(prompt).await?
    };

    for line in reply.lines() {
        println!("{}", line.bright_blue());
    }

    Ok(())
}
