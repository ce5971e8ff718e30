use crate::error::{RelayError, RelayResult};
use crate::io_struct::{BotResponse, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChatTurn};
use crate::prompt::SYSTEM_PROMPT;
use crate::schema;
use bytes::Bytes;
use serde_json::Value;
use std::fmt;

pub const DEFAULT_PROVIDER_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const MODEL: &str = "gpt-4o-mini";
pub const TEMPERATURE: f64 = 0.3;
/// Number of most recent history entries forwarded to the provider.
pub const HISTORY_WINDOW: usize = 10;
/// Largest accepted `/api/chat` body. Callers resend the whole conversation.
pub const DEFAULT_MAX_PAYLOAD_SIZE: usize = 8 * 1024 * 1024;

#[derive(Clone)]
pub struct RelayConfig {
    pub host: String,
    pub port: u16,
    pub provider_url: String,
    pub api_key: Option<String>,
    /// Client timeout in seconds. `None` leaves the transport default.
    pub timeout: Option<u64>,
    pub max_payload_size: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        RelayConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            provider_url: DEFAULT_PROVIDER_URL.to_string(),
            api_key: None,
            timeout: None,
            max_payload_size: DEFAULT_MAX_PAYLOAD_SIZE,
        }
    }
}

impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("provider_url", &self.provider_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("max_payload_size", &self.max_payload_size)
            .finish()
    }
}

impl RelayConfig {
    /// The configured key; an empty one counts as missing.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }
}

#[derive(Debug, Clone)]
pub struct RelayState {
    pub client: reqwest::Client,
    pub config: RelayConfig,
}

impl RelayState {
    pub fn new(config: RelayConfig) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(std::time::Duration::from_secs(timeout));
        }
        let client = builder.build()?;
        Ok(Self { client, config })
    }

    /// System instruction, then the last [`HISTORY_WINDOW`] history entries
    /// in their original order, then the new user message.
    pub fn compose_messages(message: &str, history: &[ChatMessage]) -> Vec<ChatMessage> {
        let start = history.len().saturating_sub(HISTORY_WINDOW);
        let mut messages = Vec::with_capacity(history.len() - start + 2);
        messages.push(ChatMessage::system(SYSTEM_PROMPT));
        messages.extend(history[start..].iter().cloned());
        messages.push(ChatMessage::user(message));
        messages
    }

    pub fn build_request(turn: &ChatTurn) -> RelayResult<ChatCompletionRequest<'static>> {
        let message = turn.message().ok_or(RelayError::MissingField)?;
        Ok(ChatCompletionRequest {
            model: MODEL,
            messages: Self::compose_messages(message, &turn.history),
            response_format: schema::response_format(),
            temperature: TEMPERATURE,
        })
    }

    /// Validates the turn, issues exactly one completion call and parses
    /// the returned content as a [`BotResponse`].
    pub async fn chat(&self, turn: &ChatTurn) -> RelayResult<BotResponse> {
        let request = Self::build_request(turn)
            .inspect_err(|e| log::warn!("Rejected chat request: {}", e))?;
        let api_key = self.config.api_key().ok_or_else(|| {
            log::error!("Rejected chat request: OPENAI_API_KEY is not configured");
            RelayError::Misconfiguration
        })?;

        log::info!(
            "Relaying chat turn ({} of {} history entries kept)",
            request.messages.len() - 2,
            turn.history.len()
        );
        let completion = self.complete(api_key, &request).await?;
        let content = completion.content();
        let response: BotResponse = serde_json::from_str(content).map_err(|e| {
            log::error!("Provider content is not a valid bot response: {}", e);
            RelayError::from(e)
        })?;
        log::debug!(
            "Extracted lead: intent={} city={} budget={}",
            response.extracted.intent,
            response.extracted.city,
            response.extracted.budget
        );
        Ok(response)
    }

    async fn complete(
        &self,
        api_key: &str,
        request: &ChatCompletionRequest<'_>,
    ) -> RelayResult<ChatCompletionResponse> {
        let resp = self
            .client
            .post(&self.config.provider_url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                log::error!("Completion request failed: {}", e);
                RelayError::Provider(Value::String(e.to_string()))
            })?;
        let status = resp.status();
        let body: Bytes = resp
            .bytes()
            .await
            .map_err(|e| {
                log::error!("Reading completion response failed: {}", e);
                RelayError::Provider(Value::String(e.to_string()))
            })?;
        if !status.is_success() {
            log::error!("Completion provider returned {}", status);
            return Err(RelayError::Provider(provider_error_payload(&body)));
        }
        serde_json::from_slice(&body).map_err(|e| {
            log::error!("Completion envelope is not valid JSON: {}", e);
            RelayError::from(e)
        })
    }
}

/// The provider's `error` member when present, else its whole JSON body,
/// else the raw body text.
pub fn provider_error_payload(body: &[u8]) -> Value {
    match serde_json::from_slice::<Value>(body) {
        Ok(json) => match json.get("error") {
            Some(error) if !error.is_null() => error.clone(),
            _ => json,
        },
        Err(_) => Value::String(String::from_utf8_lossy(body).into_owned()),
    }
}
