//! Command-line interface parsing and handling
//!
//! This module parses command-line arguments, sets up diagnostics, and
//! dispatches to the chat loop or one of the one-shot subcommands.

pub mod language_list;

use std::error::Error;
use std::fs::OpenOptions;
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cli::language_list::list_languages;
use crate::core::config::{Config, ConfigKey};
use crate::ui::chat_loop::{run_chat, ChatOptions};

#[derive(Parser, Debug)]
#[command(name = "parlance")]
#[command(about = "Practice a foreign language with a conversational tutor")]
#[command(
    long_about = "Parlance is a full-screen terminal client for practicing a foreign language \
with a remote tutor service. Pick a language, chat, and ask for an evaluation of how you did.\n\n\
Controls:\n\
  Enter             Send the message\n\
  Alt+Enter         Insert a new line\n\
  Ctrl+E            Evaluate the conversation\n\
  Ctrl+N            Start a new conversation in the same language\n\
  Ctrl+L            Clear the conversation on the tutor and locally\n\
  Ctrl+G            Choose a different language\n\
  PageUp/PageDown   Scroll through the conversation\n\
  Ctrl+C            Quit the application\n\n\
Configuration:\n\
  parlance set api-base http://tutor.example/api\n\
  parlance set default-language es"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Base URL of the tutor API (overrides the config)
    #[arg(long, global = true, value_name = "URL")]
    pub api_base: Option<String>,

    /// Language code to start practicing right away
    #[arg(short = 'L', long, global = true, value_name = "CODE")]
    pub language: Option<String>,

    /// Write diagnostic logs to the specified file
    #[arg(long, global = true, value_name = "FILE")]
    pub log: Option<String>,

    /// Append the conversation transcript to the specified file
    #[arg(long, global = true, value_name = "FILE")]
    pub transcript: Option<String>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// List the languages the tutor offers
    Languages,
    /// Set configuration values
    Set {
        /// Configuration key to set (api-base, default-language)
        key: String,
        /// Value to set for the key
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Option<Vec<String>>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset
        key: String,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_tracing(args.log.as_deref())?;

    tokio::runtime::Runtime::new()?.block_on(async_main(args))
}

/// Route `tracing` output to `log_file`. Without a file nothing is installed,
/// since the terminal belongs to the UI.
fn init_tracing(log_file: Option<&str>) -> Result<(), Box<dyn Error>> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("parlance=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| format!("failed to initialize logging: {err}"))?;

    Ok(())
}

async fn async_main(args: Args) -> Result<(), Box<dyn Error>> {
    match args.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let config = Config::load()?;
            let options = ChatOptions {
                api_base: config.resolve_api_base(args.api_base.as_deref()),
                language: config.resolve_language(args.language.as_deref()),
                transcript: args.transcript,
            };
            run_chat(options).await
        }
        Commands::Languages => {
            let config = Config::load()?;
            let api_base = config.resolve_api_base(args.api_base.as_deref());
            let default_language = config.resolve_language(args.language.as_deref());
            list_languages(&api_base, default_language.as_deref()).await
        }
        Commands::Set { key, value } => {
            let mut config = Config::load()?;
            let value = value.unwrap_or_default();
            if value.is_empty() {
                config.print_all();
                return Ok(());
            }
            match apply_set(&mut config, &key, &value) {
                Ok(key) => {
                    config.save()?;
                    println!("✅ Set {key} to: {}", value.join(" "));
                    Ok(())
                }
                Err(message) => {
                    eprintln!("❌ {message}");
                    std::process::exit(1);
                }
            }
        }
        Commands::Unset { key } => {
            let mut config = Config::load()?;
            match apply_unset(&mut config, &key) {
                Ok(key) => {
                    config.save()?;
                    println!("✅ Unset {key}");
                    Ok(())
                }
                Err(message) => {
                    eprintln!("❌ {message}");
                    std::process::exit(1);
                }
            }
        }
    }
}

fn apply_set(config: &mut Config, key: &str, value: &[String]) -> Result<ConfigKey, String> {
    let key: ConfigKey = key.parse()?;
    config.set(key, &value.join(" "))?;
    Ok(key)
}

fn apply_unset(config: &mut Config, key: &str) -> Result<ConfigKey, String> {
    let key: ConfigKey = key.parse()?;
    config.unset(key);
    Ok(key)
}

#[cfg(test)]
mod tests;
