use colored::*;

use crate::composer::compose_response;
use crate::config::Config;
use crate::detector::EmotionDetector;
use crate::generator::{
    base_prompt, follow_up_prompt, GenerationConstraints, ResponseGenerator, BASE_FALLBACK,
    FOLLOW_UP_FALLBACK, GENERIC_FALLBACK,
};
use crate::memory::{EmotionalMemory, EmotionalSummary, InteractionRecord};
use crate::translator::{Language, Translator};

/// One conversation session: the collaborator clients plus the session's
/// emotional memory. Constructed per session, passed by `&mut` into the
/// request path, dropped with the session — no global state.
pub struct ChatSession {
    translator: Translator,
    detector: EmotionDetector,
    generator: ResponseGenerator,
    memory: EmotionalMemory,
}

impl ChatSession {
    pub fn new(config: &Config, provider: Option<String>, model: Option<String>) -> Self {
        Self {
            translator: Translator::new(config.translator.as_ref()),
            detector: EmotionDetector::new(config.classifier.as_ref()),
            generator: ResponseGenerator::new(config.generator_config(provider, model)),
            memory: EmotionalMemory::new(config.max_history),
        }
    }

    /// Session with no external services: keyword classification, fixed
    /// fallback replies, no translation.
    pub fn offline(max_history: usize) -> Self {
        Self {
            translator: Translator::new(None),
            detector: EmotionDetector::offline(),
            generator: ResponseGenerator::offline(),
            memory: EmotionalMemory::new(max_history),
        }
    }

    /// Process one turn: translate to English, classify, generate, compose
    /// with the emotional trend, translate back, and record the completed
    /// interaction. Every collaborator failure degrades locally; the user
    /// always gets a reply, and the memory is only touched once the reply
    /// exists.
    pub async fn respond(&mut self, user_input: &str, language: Language) -> String {
        let english_input = match self
            .translator
            .translate(user_input, language, Language::English)
            .await
        {
            Ok(text) => text,
            Err(e) => {
                if language != Language::English {
                    eprintln!(
                        "{}",
                        format!("Translation failed ({}), using original text", e).yellow()
                    );
                }
                user_input.to_string()
            }
        };

        let emotion = self.detector.detect(&english_input).await;
        let summary = self.memory.get_emotional_summary();

        let base = match self
            .generator
            .generate(&base_prompt(&emotion), GenerationConstraints::base_response())
            .await
        {
            Ok(text) => text,
            Err(e) => {
                eprintln!(
                    "{}",
                    format!("Response generation failed ({}), using fallback", e).yellow()
                );
                BASE_FALLBACK.to_string()
            }
        };

        let follow_up = match self
            .generator
            .generate(
                &follow_up_prompt(&english_input, &emotion),
                GenerationConstraints::follow_up(),
            )
            .await
        {
            Ok(text) => text,
            Err(_) => FOLLOW_UP_FALLBACK.to_string(),
        };

        let reply = compose_response(&base, &follow_up, &summary);
        // A model can legally return empty strings; never hand those out.
        let reply = if reply.trim().is_empty() {
            GENERIC_FALLBACK.to_string()
        } else {
            reply
        };

        let final_reply = match self
            .translator
            .translate(&reply, Language::English, language)
            .await
        {
            Ok(text) => text,
            Err(e) => {
                if language != Language::English {
                    eprintln!(
                        "{}",
                        format!("Translation failed ({}), replying in English", e).yellow()
                    );
                }
                reply
            }
        };

        self.memory
            .add_interaction(user_input, emotion, &final_reply);

        final_reply
    }

    pub fn emotional_summary(&self) -> EmotionalSummary {
        self.memory.get_emotional_summary()
    }

    pub fn recent_context(&self, n: usize) -> Vec<&InteractionRecord> {
        self.memory.get_recent_context(n)
    }

    pub fn mood_history(&self) -> Vec<String> {
        self.memory.mood_history()
    }

    pub fn interaction_count(&self) -> usize {
        self.memory.len()
    }
}
