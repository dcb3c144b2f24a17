use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use deskmate_application::AssistantService;
use deskmate_core::gateway::CompletionGateway;
use deskmate_core::session::VoiceExchange;
use deskmate_core::settings::SettingsPatch;
use deskmate_core::voice::VoiceCapture;
use deskmate_infrastructure::SettingsStore;
use deskmate_interaction::{AssistantManager, OpenAiCompletionAgent, SimulatedVoiceAgent};

mod commands;

#[derive(Parser)]
#[command(name = "deskmate")]
#[command(about = "DeskMate - AI-powered desktop assistant", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session
    Chat,
    /// Send a single prompt and print the reply
    Ask {
        /// Prompt text to send
        prompt: String,
        /// Ask for a 1-2 sentence reply outside the session history
        #[arg(long)]
        brief: bool,
    },
    /// Run one simulated voice command
    Voice,
    /// Inspect or change persisted settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the current settings with the API key redacted
    Show,
    /// Update one or more settings fields
    Set {
        /// OpenAI API key
        #[arg(long)]
        api_key: Option<String>,
        /// Chat model name
        #[arg(long)]
        model: Option<String>,
        /// Sampling temperature
        #[arg(long)]
        temperature: Option<f32>,
        /// Completion token cap
        #[arg(long)]
        max_output_tokens: Option<u32>,
        /// System instruction prepended to every request
        #[arg(long)]
        system_instruction: Option<String>,
    },
}

/// Composition root: builds the assistant service over the persisted
/// settings and the production gateway and voice agents.
fn build_service(event_tx: Option<mpsc::UnboundedSender<VoiceExchange>>) -> Result<AssistantService> {
    let settings_store = SettingsStore::new()?;
    let settings = settings_store.load()?;

    let gateway: Arc<dyn CompletionGateway> = Arc::new(OpenAiCompletionAgent::new());
    let voice: Arc<dyn VoiceCapture> = Arc::new(SimulatedVoiceAgent::new());
    let manager = AssistantManager::new(settings, gateway.clone()).with_session_id("cli-session");

    let mut service = AssistantService::new(manager, gateway, voice, settings_store);
    if let Some(event_tx) = event_tx {
        service = service.with_event_sender(event_tx);
    }
    Ok(service)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Log to stderr so REPL output on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Chat => {
            let (event_tx, event_rx) = mpsc::unbounded_channel();
            let service = build_service(Some(event_tx))?;
            commands::chat::run(service, event_rx).await?
        }
        Commands::Ask { prompt, brief } => {
            commands::ask::run(build_service(None)?, &prompt, brief).await?
        }
        Commands::Voice => commands::voice::run(build_service(None)?).await?,
        Commands::Settings { action } => match action {
            SettingsAction::Show => commands::settings::show()?,
            SettingsAction::Set {
                api_key,
                model,
                temperature,
                max_output_tokens,
                system_instruction,
            } => commands::settings::set(SettingsPatch {
                api_key,
                model_name: model,
                temperature,
                max_output_tokens,
                system_instruction,
            })?,
        },
    }

    Ok(())
}
