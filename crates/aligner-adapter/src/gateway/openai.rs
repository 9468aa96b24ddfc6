//! OpenAiOracle - Term oracle over an OpenAI-compatible chat API
//!
//! Both operations send one prompt asking for a JSON object and parse the
//! reply. A missing or empty translation falls back to the source term and
//! a missing confidence falls back to 0.5. No retries are attempted.

use std::time::Duration;

use aligner_domain::{OracleError, TermOracle, TermTranslation};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::{OracleConfig, OracleConfigError};
use tracing::debug;

/// Confidence assumed when the model omits one
const FALLBACK_CONFIDENCE: f64 = 0.5;

/// Sends a prompt and returns the raw message content
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, OracleError>;
}

/// Production transport using reqwest
#[derive(Clone)]
pub struct ReqwestTransport {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f64,
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}

impl ReqwestTransport {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        temperature: f64,
        timeout: Duration,
    ) -> Result<Self, OracleConfigError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OracleConfigError {
                kind: "openai".to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            temperature,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[async_trait]
impl ChatTransport for ReqwestTransport {
    async fn complete(&self, prompt: &str) -> Result<String, OracleError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: Some(prompt.to_string()),
            }],
            response_format: ResponseFormat { kind: "json_object" },
            temperature: self.temperature,
        };

        let response = self
            .http_client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| OracleError::Unavailable {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(OracleError::Unavailable {
                message: format!("API error ({}): {}", status, error_text),
            });
        }

        let completion: ChatCompletionResponse =
            response.json().await.map_err(|e| OracleError::MalformedResponse {
                message: e.to_string(),
            })?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| OracleError::MalformedResponse {
                message: "no response from model".to_string(),
            })
    }
}

/// LLM-backed term oracle
#[derive(Debug, Clone)]
pub struct OpenAiOracle<T = ReqwestTransport> {
    transport: T,
}

impl OpenAiOracle<ReqwestTransport> {
    /// Build from `oracle` settings, reading the API key from the environment
    pub fn from_config(config: &OracleConfig) -> Result<Self, OracleConfigError> {
        let OracleConfig::OpenAi {
            model,
            base_url,
            api_key_env,
            temperature,
            timeout_secs,
        } = config
        else {
            return Err(OracleConfigError {
                kind: config.kind().to_string(),
                reason: "not an openai oracle configuration".to_string(),
            });
        };

        let api_key = std::env::var(api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| OracleConfigError {
                kind: "openai".to_string(),
                reason: format!("environment variable {} is not set", api_key_env),
            })?;

        let transport = ReqwestTransport::new(
            base_url.as_str(),
            api_key,
            model.as_str(),
            *temperature,
            Duration::from_secs(*timeout_secs),
        )?;
        Ok(Self::with_transport(transport))
    }
}

impl<T: ChatTransport> OpenAiOracle<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }
}

fn extraction_prompt(message: &str, vocabulary: &str) -> String {
    format!(
        "Identify the domain-specific terms of the \"{vocabulary}\" vocabulary that appear in the message below.\n\
         Return each term exactly as it is written in the message, in order of first appearance, without duplicates.\n\
         Respond with a JSON object of the form {{\"terms\": [\"term\", ...]}}.\n\n\
         Message:\n{message}"
    )
}

fn translation_prompt(term: &str, source_vocab: &str, target_vocab: &str, context: Option<&str>) -> String {
    let mut prompt = format!(
        "Translate the term \"{term}\" from the \"{source_vocab}\" vocabulary into the \"{target_vocab}\" vocabulary.\n"
    );
    if let Some(context) = context {
        prompt.push_str(&format!("It appears in this message: {}\n", context));
    }
    prompt.push_str(
        "Respond with a JSON object of the form {\"translatedTerm\": \"...\", \"confidence\": 0.0} \
         where confidence is a number between 0 and 1.",
    );
    prompt
}

fn parse_json(content: &str) -> Result<Value, OracleError> {
    serde_json::from_str(content).map_err(|e| OracleError::MalformedResponse {
        message: format!("model reply is not JSON: {}", e),
    })
}

fn parse_terms(content: &str) -> Result<Vec<String>, OracleError> {
    match parse_json(content)?.get("terms") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| OracleError::MalformedResponse {
                    message: format!("term is not a string: {}", item),
                })
            })
            .collect(),
        Some(other) => Err(OracleError::MalformedResponse {
            message: format!("\"terms\" is not an array: {}", other),
        }),
    }
}

fn parse_translation(content: &str, term: &str) -> Result<TermTranslation, OracleError> {
    let reply = parse_json(content)?;

    let translated_term = reply
        .get("translatedTerm")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .unwrap_or(term);

    let confidence = match reply.get("confidence") {
        None | Some(Value::Null) => FALLBACK_CONFIDENCE,
        Some(value) => value.as_f64().ok_or_else(|| OracleError::MalformedResponse {
            message: format!("confidence is not a number: {}", value),
        })?,
    };

    Ok(TermTranslation::new(translated_term, confidence))
}

impl<T: ChatTransport> TermOracle for OpenAiOracle<T> {
    async fn extract_terms(&self, message: &str, vocabulary: &str) -> Result<Vec<String>, OracleError> {
        let content = self
            .transport
            .complete(&extraction_prompt(message, vocabulary))
            .await?;
        let terms = parse_terms(&content)?;
        debug!(vocabulary, count = terms.len(), "terms extracted");
        Ok(terms)
    }

    async fn translate_term(
        &self,
        term: &str,
        source_vocab: &str,
        target_vocab: &str,
        context: Option<&str>,
    ) -> Result<TermTranslation, OracleError> {
        let content = self
            .transport
            .complete(&translation_prompt(term, source_vocab, target_vocab, context))
            .await?;
        parse_translation(&content, term)
    }
}
