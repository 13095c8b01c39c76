mod chatbot;
mod cli;
mod composer;
mod config;
mod conversation;
mod detector;
mod formatter;
mod generator;
mod memory;
mod speech;
mod translator;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use translator::Language;

#[derive(Parser)]
#[command(name = "emobot")]
#[command(about = "Emotion-aware multilingual chatbot with bounded emotional memory")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a single message and print the reply with the emotional summary
    Chat {
        message: String,
        /// Conversation language (name or ISO code, e.g. "hindi" or "hi")
        #[arg(long, default_value = "english")]
        lang: String,
        /// Data directory for config (default: platform config dir)
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Text-generation provider (ollama, openai)
        #[arg(long)]
        provider: Option<String>,
        /// Model name override
        #[arg(long)]
        model: Option<String>,
    },
    /// Start an interactive conversation
    Talk {
        /// Conversation language (name or ISO code)
        #[arg(long, default_value = "english")]
        lang: String,
        /// Data directory for config (default: platform config dir)
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Text-generation provider (ollama, openai)
        #[arg(long)]
        provider: Option<String>,
        /// Model name override
        #[arg(long)]
        model: Option<String>,
        /// Capture input by voice instead of typing
        #[arg(long)]
        voice: bool,
    },
    /// List supported languages
    Languages,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    match args.command {
        Commands::Chat {
            message,
            lang,
            data_dir,
            provider,
            model,
        } => {
            let language: Language = lang.parse()?;
            cli::handle_chat(message, language, data_dir, provider, model).await?;
        }
        Commands::Talk {
            lang,
            data_dir,
            provider,
            model,
            voice,
        } => {
            let language: Language = lang.parse()?;
            conversation::run(language, data_dir, provider, model, voice).await?;
        }
        Commands::Languages => {
            cli::handle_languages();
        }
    }

    Ok(())
}
