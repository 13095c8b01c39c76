use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::generator::{GeneratorConfig, TextProvider};
use crate::memory::DEFAULT_MAX_HISTORY;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip)]
    pub data_dir: PathBuf,
    pub default_provider: String,
    pub providers: HashMap<String, ProviderConfig>,
    /// Remote emotion-classification endpoint; keyword fallback when absent.
    #[serde(default)]
    pub classifier: Option<ClassifierConfig>,
    /// Translation endpoint; non-English turns pass through untranslated
    /// when absent.
    #[serde(default)]
    pub translator: Option<TranslatorConfig>,
    /// Speech capture/synthesis endpoints; voice input disabled when absent.
    #[serde(default)]
    pub speech: Option<SpeechConfig>,
    /// Capacity of the per-session emotional memory.
    #[serde(default = "default_max_history")]
    pub max_history: usize,
}

fn default_max_history() -> usize {
    DEFAULT_MAX_HISTORY
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub default_model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    pub endpoint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    pub endpoint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    pub capture_endpoint: String,
    pub synthesize_endpoint: String,
    /// Listen timeout in seconds for speech capture.
    #[serde(default = "default_listen_timeout")]
    pub listen_timeout_secs: u64,
}

fn default_listen_timeout() -> u64 {
    5
}

impl Config {
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("emobot")
        });

        std::fs::create_dir_all(&data_dir).context("Failed to create data directory")?;

        let config_path = data_dir.join("config.json");

        if config_path.exists() {
            let config_str =
                std::fs::read_to_string(&config_path).context("Failed to read config.json")?;
            let mut config: Config =
                serde_json::from_str(&config_str).context("Failed to parse config.json")?;
            config.data_dir = data_dir;
            // Pick up the API key from the environment when the file has none
            if let Some(openai_config) = config.providers.get_mut("openai") {
                if openai_config.api_key.as_ref().map_or(true, |key| key.is_empty()) {
                    openai_config.api_key = std::env::var("OPENAI_API_KEY").ok();
                }
            }
            return Ok(config);
        }

        let config = Self::default_config(data_dir);

        let json_str =
            serde_json::to_string_pretty(&config).context("Failed to serialize default config")?;
        std::fs::write(&config_path, json_str).context("Failed to write default config.json")?;

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = self.data_dir.join("config.json");
        let json_str = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&config_path, json_str).context("Failed to write config.json")?;
        Ok(())
    }

    pub fn default_config(data_dir: PathBuf) -> Self {
        let mut providers = HashMap::new();

        providers.insert(
            "ollama".to_string(),
            ProviderConfig {
                default_model: "qwen2.5".to_string(),
                host: Some("http://localhost:11434".to_string()),
                api_key: None,
            },
        );

        providers.insert(
            "openai".to_string(),
            ProviderConfig {
                default_model: "gpt-4o-mini".to_string(),
                host: None,
                api_key: std::env::var("OPENAI_API_KEY").ok(),
            },
        );

        Config {
            data_dir,
            default_provider: "ollama".to_string(),
            providers,
            classifier: None,
            translator: None,
            speech: None,
            max_history: DEFAULT_MAX_HISTORY,
        }
    }

    pub fn get_provider(&self, provider_name: &str) -> Option<&ProviderConfig> {
        self.providers.get(provider_name)
    }

    /// Resolve the text-generation settings for the chosen (or default)
    /// provider. `None` when that provider has no configuration, which puts
    /// the generator into fallback-only mode.
    pub fn generator_config(
        &self,
        provider: Option<String>,
        model: Option<String>,
    ) -> Option<GeneratorConfig> {
        let provider_name = provider.unwrap_or_else(|| self.default_provider.clone());
        let provider_config = self.get_provider(&provider_name)?;
        let text_provider: TextProvider = provider_name.parse().ok()?;
        let model_name = model.unwrap_or_else(|| provider_config.default_model.clone());

        Some(GeneratorConfig {
            provider: text_provider,
            model: model_name,
            api_key: provider_config.api_key.clone(),
            base_url: provider_config.host.clone(),
        })
    }
}
