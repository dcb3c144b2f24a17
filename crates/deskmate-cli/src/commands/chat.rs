use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::Editor;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use tokio::sync::mpsc;

use deskmate_application::AssistantService;
use deskmate_core::session::{TurnRole, VoiceExchange};

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: vec![
                "/voice".to_string(),
                "/history".to_string(),
                "/settings".to_string(),
                "/clear".to_string(),
            ],
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

/// Runs the interactive chat REPL.
///
/// Text input is sent to the assistant synchronously, one request in
/// flight at a time. `/voice` runs in the background; its exchange comes
/// back over the event channel and is printed by a spawned consumer task.
pub async fn run(
    service: AssistantService,
    mut event_rx: mpsc::UnboundedReceiver<VoiceExchange>,
) -> Result<()> {
    let service = Arc::new(service);

    // Spawn the voice exchange consumer
    let printer = tokio::spawn(async move {
        while let Some(exchange) = event_rx.recv().await {
            println!("{}", format!("[Voice] {}", exchange.input).bright_magenta());
            for line in exchange.response.lines() {
                println!("{}", line.bright_blue());
            }
            println!();
        }
    });

    // ===== REPL Setup =====
    let helper = CliHelper::new();
    let mut rl = Editor::new()?;
    rl.set_helper(Some(helper));

    println!("{}", "=== DeskMate ===".bright_magenta().bold());
    println!(
        "{}",
        "Type '/voice' for a voice command, '/history', '/settings', '/clear', or 'quit' to exit."
            .bright_black()
    );
    println!();

    // ===== Main REPL Loop =====
    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();

                // Handle quit command
                if trimmed == "quit" || trimmed == "exit" {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }

                // Skip empty lines
                if trimmed.is_empty() {
                    continue;
                }

                // Add to history
                let _ = rl.add_history_entry(&line);

                match trimmed {
                    "/voice" => {
                        if service.is_listening() {
                            println!("{}", "Already listening".yellow());
                            continue;
                        }
                        println!("{}", "Listening...".bright_black());
                        let service = Arc::clone(&service);
                        tokio::spawn(async move {
                            if let Err(e) = service.voice_command().await {
                                eprintln!("{}", format!("Voice command failed: {}", e).red());
                            }
                        });
                    }
                    "/history" => {
                        let history = service.history().await;
                        if history.is_empty() {
                            println!("{}", "History is empty.".bright_black());
                        }
                        for turn in history {
                            let line = match turn.role {
                                TurnRole::System => {
                                    format!("[system] {}", turn.content).bright_black()
                                }
                                TurnRole::User => format!("[user] {}", turn.content).green(),
                                TurnRole::Assistant => {
                                    format!("[assistant] {}", turn.content).bright_blue()
                                }
                            };
                            println!("{}", line);
                        }
                    }
                    "/settings" => {
                        super::settings::print_settings(&service.settings().await);
                    }
                    "/clear" => {
                        service.clear_history().await;
                        println!("{}", "History cleared.".bright_green());
                    }
                    cmd if cmd.starts_with('/') => {
                        println!("{}", "Unknown command".bright_black());
                    }
                    input => {
                        // Display user input in green
                        println!("{}", format!("> {}", input).green());

                        match service.chat(input).await {
                            Ok(reply) => {
                                for line in reply.lines() {
                                    println!("{}", line.bright_blue());
                                }
                            }
                            Err(e) => {
                                eprintln!("{}", format!("Error: {}", e).red());
                            }
                        }
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                if service.is_listening() {
                    service.stop_voice();
                }
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    // Drop our service handle; once in-flight voice tasks finish, the
    // event channel closes and the printer task exits.
    drop(service);
    let _ = printer.await;

    Ok(())
}
