use clap::{Parser, Subcommand};
use futures::StreamExt;

mod agents;
mod tools;

use agents::build_architect_chat;
use parley_chat::{ChatConfig, ChatEvent, StopReason};

const DEFAULT_SEED: &str =
    "The design name is 'Payment Processing System' and the OAR Id Tag is 'OAR-12345'.";

#[derive(Parser, Debug)]
#[command(name = "parley", version)]
#[command(about = "Parley CLI - multi-agent group chat orchestration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the architect review scenario
    Chat {
        /// Seed message opening the conversation
        #[arg(long, default_value = DEFAULT_SEED)]
        seed: String,
        /// Hard ceiling on rounds
        #[arg(long, default_value_t = 10)]
        max_iterations: u32,
        /// Require every agent to confirm before terminating
        #[arg(long)]
        all_confirm: bool,
        /// Completion marker, matched case-insensitively
        #[arg(long, default_value = "no action needed")]
        marker: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize JSON logging once.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env();
    let env_filter = match "info".parse() {
        Ok(directive) => env_filter.add_directive(directive),
        Err(_) => env_filter, // fallback to default if parsing fails
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .json()
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Chat {
            seed,
            max_iterations,
            all_confirm,
            marker,
        } => {
            let config = ChatConfig::default()
                .with_maximum_iterations(max_iterations)
                .with_completion_marker(marker);
            let mut chat = match build_architect_chat(config, all_confirm) {
                Ok(chat) => chat,
                Err(e) => {
                    tracing::error!(code = e.error_code(), "failed to assemble chat: {e}");
                    std::process::exit(1);
                }
            };

            let mut failed = false;
            {
                let stream = chat.invoke(seed);
                futures::pin_mut!(stream);
                while let Some(event) = stream.next().await {
                    match event {
                        ChatEvent::Reply(message) => {
                            println!("{}: {}", message.author, message.content);
                            println!();
                        }
                        ChatEvent::Ended(report) => {
                            println!("Run ended: {} after {} round(s).", report.reason, report.rounds);
                            if report.reason == StopReason::FatalError {
                                failed = true;
                                if let Some(error) = &report.error {
                                    tracing::error!(code = error.error_code(), "run failed: {error}");
                                }
                            }
                        }
                    }
                }
            }

            println!("Agents cleaned up successfully.");
            if failed {
                std::process::exit(1);
            }
        }
    }
}
