use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::error::ModelError;

/// System message sent with every page-object prompt.
pub const SYSTEM_PROMPT: &str =
    "You are an expert Appium QA assistant writing clean Page Object classes.";

pub const DEFAULT_CHAT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_OLLAMA_ENDPOINT: &str = "http://localhost:11434/api/generate";
pub const DEFAULT_OLLAMA_MODEL: &str = "qwen2.5-coder:7b";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// TextInference trait: one-shot prompt to text
// ============================================================================

/// Submits a prompt to a generative model and returns its raw text answer.
///
/// Implementations report every failure (transport, status, payload shape)
/// as a `ModelError`; callers treat them all alike.
pub trait TextInference {
    fn infer_text(&self, prompt: &str) -> Result<String, ModelError>;
}

// ============================================================================
// Model configuration
// ============================================================================

/// Which wire protocol the model endpoint speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    /// OpenAI-compatible `/chat/completions`
    ChatCompletions,
    /// Ollama `/api/generate`
    Ollama,
    /// No model; model-assisted generation always falls back
    Disabled,
}

impl Provider {
    pub fn default_endpoint(self) -> &'static str {
        match self {
            Provider::ChatCompletions => DEFAULT_CHAT_ENDPOINT,
            Provider::Ollama => DEFAULT_OLLAMA_ENDPOINT,
            Provider::Disabled => "",
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            Provider::ChatCompletions => DEFAULT_CHAT_MODEL,
            Provider::Ollama => DEFAULT_OLLAMA_MODEL,
            Provider::Disabled => "",
        }
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" | "chat" | "chat-completions" => Ok(Provider::ChatCompletions),
            "ollama" => Ok(Provider::Ollama),
            "none" | "disabled" | "off" => Ok(Provider::Disabled),
            other => Err(format!(
                "unknown LLM provider '{}' (expected openai, ollama or none)",
                other
            )),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::ChatCompletions => f.write_str("openai"),
            Provider::Ollama => f.write_str("ollama"),
            Provider::Disabled => f.write_str("none"),
        }
    }
}

/// Explicit model endpoint settings, passed to the generator at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub provider: Provider,
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl ModelConfig {
    pub fn for_provider(provider: Provider) -> Self {
        Self {
            provider,
            endpoint: provider.default_endpoint().to_string(),
            model: provider.default_model().to_string(),
            api_key: None,
            temperature: 0.3,
            max_tokens: 2000,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn disabled() -> Self {
        Self::for_provider(Provider::Disabled)
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::for_provider(Provider::ChatCompletions)
    }
}

/// Build the inference backend described by `config`.
pub fn build_backend(config: &ModelConfig) -> Result<Box<dyn TextInference>, ModelError> {
    match config.provider {
        Provider::ChatCompletions if config.api_key.is_none() => Ok(Box::new(UnavailableInference {
            reason: "no API key configured for the chat-completions endpoint".to_string(),
        })),
        Provider::ChatCompletions => Ok(Box::new(ChatCompletionsBackend::new(config)?)),
        Provider::Ollama => Ok(Box::new(OllamaBackend::new(config)?)),
        Provider::Disabled => Ok(Box::new(UnavailableInference {
            reason: "LLM provider disabled".to_string(),
        })),
    }
}

fn http_client(timeout: Duration) -> Result<reqwest::blocking::Client, ModelError> {
    Ok(reqwest::blocking::Client::builder().timeout(timeout).build()?)
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

// ============================================================================
// Chat-completions backend (OpenAI-compatible)
// ============================================================================

pub struct ChatCompletionsBackend {
    client: reqwest::blocking::Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    error: Option<ChatApiError>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatApiError {
    #[serde(default)]
    message: String,
}

impl ChatCompletionsBackend {
    pub fn new(config: &ModelConfig) -> Result<Self, ModelError> {
        Ok(Self {
            client: http_client(config.timeout)?,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }
}

/// Pull the answer text out of a chat-completions response body.
pub fn parse_chat_response(status: u16, body: &str) -> Result<String, ModelError> {
    let parsed: ChatResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(_) if !is_success(status) => {
            return Err(ModelError::Status {
                code: status,
                body: body.to_string(),
            });
        }
        Err(e) => return Err(ModelError::UnexpectedResponse(format!("invalid JSON: {}", e))),
    };

    if let Some(error) = parsed.error {
        return Err(ModelError::Api(error.message));
    }
    if !is_success(status) {
        return Err(ModelError::Status {
            code: status,
            body: body.to_string(),
        });
    }

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| ModelError::UnexpectedResponse("no choices in response".to_string()))
}

impl TextInference for ChatCompletionsBackend {
    fn infer_text(&self, prompt: &str) -> Result<String, ModelError> {
        let request = ChatRequest {
            model: &self.model,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        debug!(endpoint = %self.endpoint, model = %self.model, "sending chat-completions request");

        let mut builder = self.client.post(&self.endpoint).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }
        let response = builder.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;

        parse_chat_response(status, &body)
    }
}

// ============================================================================
// Ollama backend
// ============================================================================

pub struct OllamaBackend {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    system: &'static str,
    prompt: &'a str,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Deserialize)]
struct OllamaResponse {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl OllamaBackend {
    pub fn new(config: &ModelConfig) -> Result<Self, ModelError> {
        Ok(Self {
            client: http_client(config.timeout)?,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }
}

/// Pull the answer text out of an Ollama `/api/generate` response body.
pub fn parse_ollama_response(status: u16, body: &str) -> Result<String, ModelError> {
    let parsed: OllamaResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(_) if !is_success(status) => {
            return Err(ModelError::Status {
                code: status,
                body: body.to_string(),
            });
        }
        Err(e) => return Err(ModelError::UnexpectedResponse(format!("invalid JSON: {}", e))),
    };

    if let Some(error) = parsed.error {
        return Err(ModelError::Api(error));
    }
    if !is_success(status) {
        return Err(ModelError::Status {
            code: status,
            body: body.to_string(),
        });
    }

    parsed
        .response
        .ok_or_else(|| ModelError::UnexpectedResponse("missing 'response' field".to_string()))
}

impl TextInference for OllamaBackend {
    fn infer_text(&self, prompt: &str) -> Result<String, ModelError> {
        let request = OllamaRequest {
            model: &self.model,
            system: SYSTEM_PROMPT,
            prompt,
            stream: false,
            options: OllamaOptions {
                temperature: self.temperature,
                num_predict: self.max_tokens,
            },
        };

        debug!(endpoint = %self.endpoint, model = %self.model, "sending ollama request");

        let response = self.client.post(&self.endpoint).json(&request).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;

        parse_ollama_response(status, &body)
    }
}

// ============================================================================
// Mock and unavailable backends
// ============================================================================

/// Returns a canned response for every prompt.
pub struct MockTextInference {
    pub response: String,
}

impl TextInference for MockTextInference {
    fn infer_text(&self, _prompt: &str) -> Result<String, ModelError> {
        Ok(self.response.clone())
    }
}

/// Fails every call; used when no model is configured.
pub struct UnavailableInference {
    pub reason: String,
}

impl TextInference for UnavailableInference {
    fn infer_text(&self, _prompt: &str) -> Result<String, ModelError> {
        Err(ModelError::Unavailable(self.reason.clone()))
    }
}
