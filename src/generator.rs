use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::memory::EmotionClassification;

/// Fallback reply when the base generation call fails.
pub const BASE_FALLBACK: &str =
    "I understand how you're feeling. Would you like to tell me more?";

/// Fallback follow-up question when generation fails.
pub const FOLLOW_UP_FALLBACK: &str = "Can you tell me more about that?";

/// Last-resort reply when a whole turn cannot be processed.
pub const GENERIC_FALLBACK: &str =
    "I apologize, but I'm having trouble processing that right now. Could you please try again?";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TextProvider {
    OpenAI,
    Ollama,
    /// Hosted text2text-generation model (HuggingFace inference API shape);
    /// the only provider that honors every decoding constraint.
    HuggingFace,
}

impl std::fmt::Display for TextProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextProvider::OpenAI => write!(f, "openai"),
            TextProvider::Ollama => write!(f, "ollama"),
            TextProvider::HuggingFace => write!(f, "huggingface"),
        }
    }
}

impl std::str::FromStr for TextProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "openai" | "gpt" => Ok(TextProvider::OpenAI),
            "ollama" => Ok(TextProvider::Ollama),
            "huggingface" | "hf" => Ok(TextProvider::HuggingFace),
            _ => Err(anyhow!("Unknown text provider: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub provider: TextProvider,
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

/// Decoding constraints passed to the text-generation model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationConstraints {
    pub max_length: u32,
    pub min_length: u32,
    pub beam_count: u32,
    pub no_repeat_ngram: u32,
    pub early_stopping: bool,
}

impl GenerationConstraints {
    /// Preset for the base empathetic response.
    pub fn base_response() -> Self {
        Self {
            max_length: 200,
            min_length: 50,
            beam_count: 5,
            no_repeat_ngram: 2,
            early_stopping: true,
        }
    }

    /// Preset for the shorter follow-up question.
    pub fn follow_up() -> Self {
        Self {
            max_length: 100,
            min_length: 20,
            beam_count: 3,
            no_repeat_ngram: 2,
            early_stopping: false,
        }
    }
}

/// Prompt asking for the base empathetic response.
pub fn base_prompt(emotion: &EmotionClassification) -> String {
    format!(
        "Given a user feeling {} with {} intensity, generate an empathetic and helpful \
         response that addresses their emotional state. The response should be natural, \
         supportive, and engaging, similar to how a professional counselor would respond. \
         Include specific observations about their emotional state and offer appropriate \
         support or guidance.",
        emotion.label, emotion.intensity
    )
}

/// Prompt asking for an open-ended follow-up question.
pub fn follow_up_prompt(user_input: &str, emotion: &EmotionClassification) -> String {
    format!(
        "Based on the message: '{}' and emotion: {}, generate a thoughtful follow-up \
         question that encourages deeper discussion and shows understanding of their \
         emotional state. The question should be open-ended and empathetic.",
        user_input, emotion.label
    )
}

/// Client for the text-generation model behind the reply surface.
///
/// Constructed without a provider it is a no-op that always errors, which
/// callers turn into the fixed fallback strings.
pub struct ResponseGenerator {
    config: Option<GeneratorConfig>,
    http_client: reqwest::Client,
}

impl ResponseGenerator {
    pub fn new(config: Option<GeneratorConfig>) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Generator with no backing model; every call errors so the caller's
    /// fallback branch runs.
    pub fn offline() -> Self {
        Self::new(None)
    }

    pub async fn generate(&self, prompt: &str, constraints: GenerationConstraints) -> Result<String> {
        let config = self
            .config
            .as_ref()
            .ok_or_else(|| anyhow!("No text-generation provider configured"))?;

        match config.provider {
            TextProvider::OpenAI => self.generate_openai(config, prompt, constraints).await,
            TextProvider::Ollama => self.generate_ollama(config, prompt, constraints).await,
            TextProvider::HuggingFace => self.generate_hf(config, prompt, constraints).await,
        }
    }

    async fn generate_hf(
        &self,
        config: &GeneratorConfig,
        prompt: &str,
        constraints: GenerationConstraints,
    ) -> Result<String> {
        let endpoint = config
            .base_url
            .as_ref()
            .ok_or_else(|| anyhow!("HuggingFace provider requires a model endpoint URL"))?;

        let request_body = serde_json::json!({
            "inputs": prompt,
            "parameters": {
                "max_length": constraints.max_length,
                "min_length": constraints.min_length,
                "num_beams": constraints.beam_count,
                "no_repeat_ngram_size": constraints.no_repeat_ngram,
                "early_stopping": constraints.early_stopping,
            }
        });

        let mut request = self
            .http_client
            .post(endpoint)
            .header("Content-Type", "application/json")
            .json(&request_body);

        if let Some(key) = &config.api_key {
            request = request.header("Authorization", format!("Bearer {}", key));
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(anyhow!("HuggingFace API error: {}", error_text));
        }

        let response_json: serde_json::Value = response.json().await?;

        let content = response_json[0]["generated_text"]
            .as_str()
            .ok_or_else(|| anyhow!("Invalid HuggingFace response format"))?
            .trim()
            .to_string();

        Ok(content)
    }

    async fn generate_openai(
        &self,
        config: &GeneratorConfig,
        prompt: &str,
        constraints: GenerationConstraints,
    ) -> Result<String> {
        let api_key = config
            .api_key
            .as_ref()
            .ok_or_else(|| anyhow!("OpenAI API key required"))?;

        let request_body = serde_json::json!({
            "model": config.model,
            "messages": [{ "role": "user", "content": prompt }],
            "max_tokens": constraints.max_length,
            "n": 1,
        });

        let response = self
            .http_client
            .post("https://api.openai.com/v1/chat/completions")
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(anyhow!("OpenAI API error: {}", error_text));
        }

        let response_json: serde_json::Value = response.json().await?;

        let content = response_json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| anyhow!("Invalid OpenAI response format"))?
            .trim()
            .to_string();

        Ok(content)
    }

    async fn generate_ollama(
        &self,
        config: &GeneratorConfig,
        prompt: &str,
        constraints: GenerationConstraints,
    ) -> Result<String> {
        let default_url = "http://localhost:11434".to_string();
        let base_url = config.base_url.as_ref().unwrap_or(&default_url);

        let request_body = serde_json::json!({
            "model": config.model,
            "prompt": prompt,
            "stream": false,
            "options": {
                "num_predict": constraints.max_length,
                "repeat_last_n": constraints.no_repeat_ngram,
            }
        });

        let url = format!("{}/api/generate", base_url);
        let response = self
            .http_client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(anyhow!("Ollama API error: {}", error_text));
        }

        let response_json: serde_json::Value = response.json().await?;

        let content = response_json["response"]
            .as_str()
            .ok_or_else(|| anyhow!("Invalid Ollama response format"))?
            .trim()
            .to_string();

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::Intensity;
    use std::str::FromStr;

    #[test]
    fn test_constraint_presets() {
        let base = GenerationConstraints::base_response();
        assert_eq!(base.max_length, 200);
        assert_eq!(base.min_length, 50);
        assert_eq!(base.beam_count, 5);

        let follow = GenerationConstraints::follow_up();
        assert_eq!(follow.max_length, 100);
        assert_eq!(follow.min_length, 20);
        assert_eq!(follow.beam_count, 3);
    }

    #[test]
    fn test_base_prompt_names_emotion_and_intensity() {
        let emotion = EmotionClassification::new("sadness", Intensity::High, 0.9);
        let prompt = base_prompt(&emotion);
        assert!(prompt.contains("feeling sadness"));
        assert!(prompt.contains("high intensity"));
    }

    #[test]
    fn test_follow_up_prompt_quotes_input() {
        let emotion = EmotionClassification::new("fear", Intensity::Medium, 0.5);
        let prompt = follow_up_prompt("I have an exam tomorrow", &emotion);
        assert!(prompt.contains("'I have an exam tomorrow'"));
        assert!(prompt.contains("emotion: fear"));
    }

    #[test]
    fn test_provider_from_str() {
        assert!(matches!(
            TextProvider::from_str("OpenAI").unwrap(),
            TextProvider::OpenAI
        ));
        assert!(matches!(
            TextProvider::from_str("ollama").unwrap(),
            TextProvider::Ollama
        ));
        assert!(matches!(
            TextProvider::from_str("hf").unwrap(),
            TextProvider::HuggingFace
        ));
        assert!(TextProvider::from_str("bard").is_err());
    }

    #[tokio::test]
    async fn test_offline_generator_errors() {
        let generator = ResponseGenerator::offline();
        assert!(generator
            .generate("hello", GenerationConstraints::base_response())
            .await
            .is_err());
    }
}
