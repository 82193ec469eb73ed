use bevy::log::warn;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::dialogue::{
    errors::{ReplyError, MISSING_CREDENTIAL_LINE},
    types::ReplyRequest,
};

use super::{
    config::{GeminiConfig, GeminiConfigError},
    ReplyBroker,
};

const API_KEY_HEADER: &str = "x-goog-api-key";
const CONVERSATION_HEADER: &str = "Current conversation:";
const PLAYER_SPEAKER_LABEL: &str = "Player";

/// Primary Gemini reply broker. Runs live when a credential is configured,
/// otherwise answers every request with the fixed missing-credential line
/// without touching the network.
pub struct GeminiReplyBroker {
    mode: BrokerMode,
}

enum BrokerMode {
    Live(GeminiLiveClient),
    Fallback,
}

impl GeminiReplyBroker {
    pub fn new() -> Self {
        match GeminiConfig::from_env() {
            Ok(config) => match GeminiLiveClient::new(config) {
                Ok(client) => Self {
                    mode: BrokerMode::Live(client),
                },
                Err(err) => {
                    warn!(
                        "Gemini broker running without live replies ({}). Check HTTP client configuration.",
                        err
                    );
                    Self {
                        mode: BrokerMode::Fallback,
                    }
                }
            },
            Err(GeminiConfigError::MissingApiKey) => {
                warn!("GEMINI_API_KEY not set; NPCs will answer with the offline line.");
                Self {
                    mode: BrokerMode::Fallback,
                }
            }
            Err(GeminiConfigError::ClientBuild(message)) => {
                warn!(
                    "Failed to construct Gemini HTTP client ({}). NPCs will answer with the offline line.",
                    message
                );
                Self {
                    mode: BrokerMode::Fallback,
                }
            }
        }
    }
}

impl Default for GeminiReplyBroker {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplyBroker for GeminiReplyBroker {
    fn provider_label(&self) -> &'static str {
        match self.mode {
            BrokerMode::Live(_) => "gemini (live)",
            BrokerMode::Fallback => "gemini (offline)",
        }
    }

    fn generate_reply(&self, request: &ReplyRequest) -> Result<String, ReplyError> {
        match &self.mode {
            BrokerMode::Live(client) => client.send(request),
            BrokerMode::Fallback => Ok(MISSING_CREDENTIAL_LINE.to_string()),
        }
    }
}

struct GeminiLiveClient {
    http: Client,
    config: GeminiConfig,
}

impl GeminiLiveClient {
    fn new(config: GeminiConfig) -> Result<Self, GeminiConfigError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| GeminiConfigError::ClientBuild(err.to_string()))?;

        Ok(Self { http, config })
    }

    fn send(&self, request: &ReplyRequest) -> Result<String, ReplyError> {
        let payload = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_prompt(request),
                }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: self.config.max_output_tokens.into(),
                temperature: self.config.temperature,
            },
        };

        let response = self
            .http
            .post(self.config.generate_url())
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&payload)
            .send()
            .map_err(|err| ReplyError::transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<GeminiErrorResponse>()
                .map(|body| body.error.message)
                .unwrap_or_else(|_| "unreadable error body".to_string());
            return Err(ReplyError::service_status(status.as_u16(), message));
        }

        let completion: GenerateContentResponse = response
            .json()
            .map_err(|err| ReplyError::transport(err.to_string()))?;

        extract_text(completion)
    }
}

/// Builds the completion prompt: persona, the recent transcript (which
/// already ends with the player's new line), then the NPC name as cue.
fn build_prompt(request: &ReplyRequest) -> String {
    let mut lines = Vec::with_capacity(request.history.len() + 3);
    lines.push(request.persona.trim().to_string());
    lines.push(String::new());
    lines.push(CONVERSATION_HEADER.to_string());

    for message in &request.history {
        let speaker = if message.is_player {
            PLAYER_SPEAKER_LABEL
        } else {
            request.npc_name.as_str()
        };
        lines.push(format!("{}: {}", speaker, message.text));
    }

    lines.push(format!("{}:", request.npc_name));
    lines.join("\n")
}

fn extract_text(completion: GenerateContentResponse) -> Result<String, ReplyError> {
    completion
        .candidates
        .into_iter()
        .flat_map(|candidate| candidate.content.parts)
        .map(|part| part.text)
        .find(|text| !text.trim().is_empty())
        .map(|text| text.trim().to_string())
        .ok_or(ReplyError::EmptyCompletion)
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    message: String,
}
