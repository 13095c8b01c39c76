use std::path::PathBuf;

use anyhow::Result;
use colored::*;

use crate::chatbot::ChatSession;
use crate::config::Config;
use crate::formatter::print_summary;
use crate::translator::{Language, ALL_LANGUAGES};

/// One-shot chat: single message in, reply and post-turn emotional state
/// out. The session exists only for this turn.
pub async fn handle_chat(
    message: String,
    language: Language,
    data_dir: Option<PathBuf>,
    provider: Option<String>,
    model: Option<String>,
) -> Result<()> {
    let config = Config::new(data_dir)?;
    let mut session = ChatSession::new(&config, provider, model);

    let reply = session.respond(&message, language).await;

    println!("{}: {}", "You".cyan(), message);
    println!("{}: {}", "Bot".green(), reply);
    println!();

    print_summary(&session.emotional_summary());

    Ok(())
}

pub fn handle_languages() {
    println!("{}", "Supported Languages".cyan().bold());
    println!(
        "{:<12} {:<12} {:<6} {}",
        "Name".dimmed(),
        "Native".dimmed(),
        "Code".dimmed(),
        "Speech".dimmed()
    );
    for language in ALL_LANGUAGES {
        println!(
            "{:<12} {:<12} {:<6} {}",
            language.to_string(),
            language.native_name(),
            language.code(),
            language.speech_code()
        );
    }
}
