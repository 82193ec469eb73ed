use std::{env, fmt, time::Duration};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_MAX_OUTPUT_TOKENS: u16 = 150;
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Gemini configuration sourced from the environment.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_output_tokens: u16,
    pub temperature: f32,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn from_env() -> Result<Self, GeminiConfigError> {
        // GEMINI_API_KEY preferred; plain API_KEY accepted for parity with
        // older deployments.
        let api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("API_KEY"))
            .map_err(|_| GeminiConfigError::MissingApiKey)
            .and_then(|value| {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    Err(GeminiConfigError::MissingApiKey)
                } else {
                    Ok(trimmed.to_string())
                }
            })?;

        let base_url = env::var("GEMINI_BASE_URL")
            .map(|value| value.trim().to_string())
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let model = env::var("GEMINI_MODEL")
            .map(|value| value.trim().to_string())
            .unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let timeout = env::var("GEMINI_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .filter(|value| *value > 0)
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        let max_output_tokens = env::var("GEMINI_MAX_OUTPUT_TOKENS")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(DEFAULT_MAX_OUTPUT_TOKENS);

        let temperature = env::var("GEMINI_TEMPERATURE")
            .ok()
            .and_then(|value| value.parse::<f32>().ok())
            .filter(|value| *value >= 0.0)
            .unwrap_or(DEFAULT_TEMPERATURE);

        Ok(Self {
            api_key,
            base_url,
            model,
            max_output_tokens,
            temperature,
            timeout,
        })
    }

    pub fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[derive(Debug)]
pub enum GeminiConfigError {
    MissingApiKey,
    ClientBuild(String),
}

impl fmt::Display for GeminiConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingApiKey => write!(f, "missing GEMINI_API_KEY"),
            Self::ClientBuild(message) => write!(f, "client build failure: {}", message),
        }
    }
}

impl std::error::Error for GeminiConfigError {}
