use anyhow::{anyhow, Result};
use colored::*;

use crate::config::ClassifierConfig;
use crate::memory::{EmotionClassification, Intensity};

/// Keyword table for the offline fallback classifier. Checked in order;
/// first bucket with a hit wins.
const KEYWORD_BUCKETS: &[(&str, &[&str])] = &[
    ("joy", &["happy", "joy", "great", "wonderful", "excited"]),
    ("sadness", &["sad", "depressed", "unhappy", "down"]),
    ("anger", &["angry", "mad", "frustrated", "upset"]),
    ("fear", &["afraid", "scared", "fear", "worried"]),
    ("surprise", &["surprised", "shocked", "amazed"]),
    ("love", &["love", "loved", "loving"]),
];

/// Detects the dominant emotion in a piece of text.
///
/// Wraps an optional remote text-classification model; when the remote call
/// fails or no model is configured, degrades to the keyword heuristic. The
/// caller always gets a usable classification, never an error.
pub struct EmotionDetector {
    remote: Option<RemoteClassifier>,
}

impl EmotionDetector {
    pub fn new(config: Option<&ClassifierConfig>) -> Self {
        Self {
            remote: config.map(RemoteClassifier::new),
        }
    }

    /// Detector with no remote model; always uses the keyword fallback.
    pub fn offline() -> Self {
        Self { remote: None }
    }

    pub async fn detect(&self, text: &str) -> EmotionClassification {
        match &self.remote {
            Some(remote) => match remote.classify(text).await {
                Ok(classification) => classification,
                Err(e) => {
                    eprintln!(
                        "{}",
                        format!("Emotion classifier unavailable ({}), using keyword fallback", e)
                            .yellow()
                    );
                    keyword_classify(text)
                }
            },
            None => keyword_classify(text),
        }
    }
}

/// Deterministic keyword-based classification. Texts with no recognizable
/// keyword get a fixed low-confidence `joy`.
pub fn keyword_classify(text: &str) -> EmotionClassification {
    let lower = text.to_lowercase();
    for (label, keywords) in KEYWORD_BUCKETS {
        if keywords.iter().any(|kw| lower.contains(kw)) {
            return EmotionClassification::new(*label, Intensity::Medium, 0.5);
        }
    }
    EmotionClassification::new("joy", Intensity::Low, 0.3)
}

/// Client for a hosted text-classification model that returns per-label
/// scores (HuggingFace inference API response shape).
struct RemoteClassifier {
    endpoint: String,
    api_key: Option<String>,
    http_client: reqwest::Client,
}

impl RemoteClassifier {
    fn new(config: &ClassifierConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            http_client: reqwest::Client::new(),
        }
    }

    async fn classify(&self, text: &str) -> Result<EmotionClassification> {
        let request_body = serde_json::json!({ "inputs": text });

        let mut request = self
            .http_client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&request_body);

        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {}", key));
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(anyhow!("Classifier API error: {}", error_text));
        }

        let response_json: serde_json::Value = response.json().await?;

        // Response shape: [[{"label": "...", "score": 0.9}, ...]]
        let scores = response_json
            .get(0)
            .and_then(|v| v.as_array())
            .ok_or_else(|| anyhow!("Invalid classifier response format"))?;

        let dominant = scores
            .iter()
            .max_by(|a, b| {
                let sa = a["score"].as_f64().unwrap_or(0.0);
                let sb = b["score"].as_f64().unwrap_or(0.0);
                sa.partial_cmp(&sb).unwrap_or(std::cmp::Ordering::Equal)
            })
            .ok_or_else(|| anyhow!("Classifier returned no scores"))?;

        let label = dominant["label"]
            .as_str()
            .ok_or_else(|| anyhow!("Classifier result missing label"))?
            .to_lowercase();
        let score = dominant["score"].as_f64().unwrap_or(0.0) as f32;

        Ok(EmotionClassification::new(
            label,
            Intensity::from_score(score),
            score,
        ))
    }
}
