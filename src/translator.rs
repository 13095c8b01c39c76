use anyhow::{anyhow, Result};

use crate::config::TranslatorConfig;

/// Languages the chat surface supports: English plus the Indic languages
/// the original interface offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Hindi,
    Telugu,
    Tamil,
    Bengali,
    Kannada,
    Marathi,
    Gujarati,
    Malayalam,
    Punjabi,
    Urdu,
    Odia,
    Assamese,
    Sanskrit,
}

pub const ALL_LANGUAGES: &[Language] = &[
    Language::English,
    Language::Hindi,
    Language::Telugu,
    Language::Tamil,
    Language::Bengali,
    Language::Kannada,
    Language::Marathi,
    Language::Gujarati,
    Language::Malayalam,
    Language::Punjabi,
    Language::Urdu,
    Language::Odia,
    Language::Assamese,
    Language::Sanskrit,
];

impl Language {
    /// ISO 639-1 code used by the translation service.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
            Language::Telugu => "te",
            Language::Tamil => "ta",
            Language::Bengali => "bn",
            Language::Kannada => "kn",
            Language::Marathi => "mr",
            Language::Gujarati => "gu",
            Language::Malayalam => "ml",
            Language::Punjabi => "pa",
            Language::Urdu => "ur",
            Language::Odia => "or",
            Language::Assamese => "as",
            Language::Sanskrit => "sa",
        }
    }

    /// Locale code for speech recognition (Indian-region variants).
    pub fn speech_code(&self) -> &'static str {
        match self {
            Language::English => "en-IN",
            Language::Hindi => "hi-IN",
            Language::Telugu => "te-IN",
            Language::Tamil => "ta-IN",
            Language::Bengali => "bn-IN",
            Language::Kannada => "kn-IN",
            Language::Marathi => "mr-IN",
            Language::Gujarati => "gu-IN",
            Language::Malayalam => "ml-IN",
            Language::Punjabi => "pa-IN",
            Language::Urdu => "ur-IN",
            Language::Odia => "or-IN",
            Language::Assamese => "as-IN",
            Language::Sanskrit => "sa-IN",
        }
    }

    /// Name in the language's own script, for the language listing.
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "हिंदी",
            Language::Telugu => "తెలుగు",
            Language::Tamil => "தமிழ்",
            Language::Bengali => "বাংলা",
            Language::Kannada => "ಕನ್ನಡ",
            Language::Marathi => "मराठी",
            Language::Gujarati => "ગુજરાતી",
            Language::Malayalam => "മലയാളം",
            Language::Punjabi => "ਪੰਜਾਬੀ",
            Language::Urdu => "اردو",
            Language::Odia => "ଓଡ଼ିଆ",
            Language::Assamese => "অসমীয়া",
            Language::Sanskrit => "संस्कृतम्",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Language::English => "english",
            Language::Hindi => "hindi",
            Language::Telugu => "telugu",
            Language::Tamil => "tamil",
            Language::Bengali => "bengali",
            Language::Kannada => "kannada",
            Language::Marathi => "marathi",
            Language::Gujarati => "gujarati",
            Language::Malayalam => "malayalam",
            Language::Punjabi => "punjabi",
            Language::Urdu => "urdu",
            Language::Odia => "odia",
            Language::Assamese => "assamese",
            Language::Sanskrit => "sanskrit",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "english" | "en" => Ok(Language::English),
            "hindi" | "hi" => Ok(Language::Hindi),
            "telugu" | "te" => Ok(Language::Telugu),
            "tamil" | "ta" => Ok(Language::Tamil),
            "bengali" | "bn" => Ok(Language::Bengali),
            "kannada" | "kn" => Ok(Language::Kannada),
            "marathi" | "mr" => Ok(Language::Marathi),
            "gujarati" | "gu" => Ok(Language::Gujarati),
            "malayalam" | "ml" => Ok(Language::Malayalam),
            "punjabi" | "pa" => Ok(Language::Punjabi),
            "urdu" | "ur" => Ok(Language::Urdu),
            "odia" | "or" => Ok(Language::Odia),
            "assamese" | "as" => Ok(Language::Assamese),
            "sanskrit" | "sa" => Ok(Language::Sanskrit),
            _ => Err(anyhow!("Unknown language: {}", s)),
        }
    }
}

/// Client for a LibreTranslate-compatible translation endpoint.
///
/// Callers are expected to fail open: on `Err`, keep the original text and
/// carry on. Translation problems never reach the emotional memory.
pub struct Translator {
    endpoint: Option<String>,
    api_key: Option<String>,
    http_client: reqwest::Client,
}

impl Translator {
    pub fn new(config: Option<&TranslatorConfig>) -> Self {
        Self {
            endpoint: config.map(|c| c.endpoint.clone()),
            api_key: config.and_then(|c| c.api_key.clone()),
            http_client: reqwest::Client::new(),
        }
    }

    pub async fn translate(&self, text: &str, source: Language, dest: Language) -> Result<String> {
        if source == dest {
            return Ok(text.to_string());
        }

        let endpoint = self
            .endpoint
            .as_ref()
            .ok_or_else(|| anyhow!("No translation endpoint configured"))?;

        let mut request_body = serde_json::json!({
            "q": text,
            "source": source.code(),
            "target": dest.code(),
            "format": "text"
        });
        if let Some(key) = &self.api_key {
            request_body["api_key"] = serde_json::json!(key);
        }

        let response = self
            .http_client
            .post(endpoint)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(anyhow!("Translation API error: {}", error_text));
        }

        let response_json: serde_json::Value = response.json().await?;

        let translated = response_json["translatedText"]
            .as_str()
            .ok_or_else(|| anyhow!("Invalid translation response format"))?
            .to_string();

        Ok(translated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::Hindi.code(), "hi");
        assert_eq!(Language::Sanskrit.code(), "sa");
        assert_eq!(Language::English.code(), "en");
    }

    #[test]
    fn test_speech_codes_use_indian_region() {
        assert_eq!(Language::English.speech_code(), "en-IN");
        assert_eq!(Language::Tamil.speech_code(), "ta-IN");
    }

    #[test]
    fn test_from_str_accepts_names_and_codes() {
        assert_eq!(Language::from_str("Telugu").unwrap(), Language::Telugu);
        assert_eq!(Language::from_str("te").unwrap(), Language::Telugu);
        assert!(Language::from_str("klingon").is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for lang in ALL_LANGUAGES {
            assert_eq!(Language::from_str(&lang.to_string()).unwrap(), *lang);
        }
    }

    #[tokio::test]
    async fn test_same_language_is_identity() {
        let translator = Translator::new(None);
        let out = translator
            .translate("hello", Language::English, Language::English)
            .await
            .unwrap();
        assert_eq!(out, "hello");
    }

    #[tokio::test]
    async fn test_unconfigured_translator_errors() {
        let translator = Translator::new(None);
        assert!(translator
            .translate("hello", Language::English, Language::Hindi)
            .await
            .is_err());
    }
}
