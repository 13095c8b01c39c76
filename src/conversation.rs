use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use colored::*;

use crate::chatbot::ChatSession;
use crate::config::Config;
use crate::formatter::{print_history, print_mood_breakdown, print_summary};
use crate::speech::SpeechClient;
use crate::translator::Language;

/// Interactive conversation loop. The session (and its emotional memory)
/// lives exactly as long as this loop.
pub async fn run(
    language: Language,
    data_dir: Option<PathBuf>,
    provider: Option<String>,
    model: Option<String>,
    voice: bool,
) -> Result<()> {
    let config = Config::new(data_dir)?;
    let mut session = ChatSession::new(&config, provider, model);

    let speech = if voice {
        match &config.speech {
            Some(speech_config) => Some(SpeechClient::new(speech_config.clone())),
            None => {
                println!(
                    "{}",
                    "No speech service configured; falling back to typed input.".yellow()
                );
                None
            }
        }
    } else {
        None
    };

    println!("{}", "=== Emotion-Aware Chatbot ===".cyan().bold());
    println!("I'm here to chat and understand your emotions!");
    println!(
        "Commands: {}, {}, {} — type {} to leave.",
        "summary".yellow(),
        "history".yellow(),
        "moods".yellow(),
        "quit".yellow()
    );
    println!("{}", "---".dimmed());

    loop {
        let input = match read_input(&speech, language).await? {
            Some(text) => text,
            None => continue,
        };

        match input.to_lowercase().as_str() {
            "quit" | "exit" | "bye" => {
                println!("{}", "Goodbye! Take care!".green());
                println!(
                    "{}",
                    format!("({} interactions this session)", session.interaction_count()).dimmed()
                );
                break;
            }
            "summary" => {
                print_summary(&session.emotional_summary());
                println!();
                continue;
            }
            "history" => {
                print_history(&session.recent_context(10));
                println!();
                continue;
            }
            "moods" => {
                print_mood_breakdown(&session.mood_history());
                println!();
                continue;
            }
            "" => continue,
            _ => {}
        }

        let reply = session.respond(&input, language).await;
        println!("{} {}", "Bot:".green().bold(), reply);

        if let Some(client) = &speech {
            match client.synthesize(&reply, language).await {
                Ok(audio) => {
                    let path = std::env::temp_dir().join("emobot-reply.wav");
                    if std::fs::write(&path, audio).is_ok() {
                        println!("{}", format!("🔊 audio reply: {}", path.display()).dimmed());
                    }
                }
                Err(e) => println!("{}", e.to_string().dimmed()),
            }
        }

        if let Some(record) = session.recent_context(1).first() {
            println!(
                "{}",
                format!(
                    "  └─ detected {} ({}, {:.2})",
                    record.emotion.label, record.emotion.intensity, record.emotion.confidence
                )
                .dimmed()
            );
        }
        println!();
    }

    Ok(())
}

async fn read_input(speech: &Option<SpeechClient>, language: Language) -> Result<Option<String>> {
    if let Some(client) = speech {
        println!("{}", "Listening...".yellow());
        match client.capture(language).await {
            Ok(text) => {
                println!("{} {}", "You:".cyan().bold(), text);
                return Ok(Some(text));
            }
            Err(e) => {
                // Per-cause message; the turn is discarded and nothing is
                // recorded.
                println!("{}", e.to_string().red());
                return Ok(None);
            }
        }
    }

    print!("{} ", "You:".cyan().bold());
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(Some(input.trim().to_string()))
}
