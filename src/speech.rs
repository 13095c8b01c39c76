use std::time::Duration;

use thiserror::Error;

use crate::config::SpeechConfig;
use crate::translator::Language;

/// Speech I/O failure kinds, each with its own user-facing message. These
/// are shown to the user directly; they never touch the emotional memory.
#[derive(Error, Debug)]
pub enum SpeechError {
    #[error("No speech detected within the timeout period")]
    Timeout,

    #[error("Could not understand the audio")]
    Unintelligible,

    #[error("Could not request results: {0}")]
    Service(String),
}

/// Client for external speech-to-text and text-to-speech services. The
/// conversational core never depends on audio; this is a surface-level
/// convenience for the voice input mode.
pub struct SpeechClient {
    config: SpeechConfig,
    http_client: reqwest::Client,
}

impl SpeechClient {
    pub fn new(config: SpeechConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.listen_timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            config,
            http_client,
        }
    }

    /// Capture one utterance and return the recognized text.
    pub async fn capture(&self, language: Language) -> Result<String, SpeechError> {
        let request_body = serde_json::json!({
            "language": language.speech_code(),
        });

        let response = self
            .http_client
            .post(&self.config.capture_endpoint)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SpeechError::Timeout
                } else {
                    SpeechError::Service(e.to_string())
                }
            })?;

        if response.status() == reqwest::StatusCode::UNPROCESSABLE_ENTITY {
            return Err(SpeechError::Unintelligible);
        }
        if !response.status().is_success() {
            return Err(SpeechError::Service(response.status().to_string()));
        }

        let response_json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| SpeechError::Service(e.to_string()))?;

        match response_json["text"].as_str() {
            Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
            _ => Err(SpeechError::Unintelligible),
        }
    }

    /// Synthesize the reply as audio. Returns the raw audio bytes.
    pub async fn synthesize(&self, text: &str, language: Language) -> Result<Vec<u8>, SpeechError> {
        let request_body = serde_json::json!({
            "text": text,
            "language": language.code(),
        });

        let response = self
            .http_client
            .post(&self.config.synthesize_endpoint)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SpeechError::Timeout
                } else {
                    SpeechError::Service(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(SpeechError::Service(response.status().to_string()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SpeechError::Service(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_are_distinct_per_cause() {
        let timeout = SpeechError::Timeout.to_string();
        let unintelligible = SpeechError::Unintelligible.to_string();
        let service = SpeechError::Service("503".to_string()).to_string();

        assert!(timeout.contains("timeout"));
        assert!(unintelligible.contains("understand"));
        assert!(service.contains("503"));
        assert_ne!(timeout, unintelligible);
        assert_ne!(unintelligible, service);
    }
}
