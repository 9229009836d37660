//! Gemini provider implementation for Legalis
//!
//! This module implements the Provider trait against the Gemini
//! `generateContent` REST endpoint, with JSON-schema constrained output,
//! optional Google Search grounding and a thinking budget.

use crate::config::GeminiConfig;
use crate::error::{LegalisError, Result};
use crate::providers::{
    CallPolicy, GenerateRequest, GenerateResponse, GroundingChunk, Part, Provider, TokenUsage,
};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Gemini API provider
///
/// # Examples
///
/// ```no_run
/// use legalis::config::GeminiConfig;
/// use legalis::providers::GeminiProvider;
///
/// # fn example() -> legalis::error::Result<()> {
/// let config = GeminiConfig {
///     api_key: Some("my-key".to_string()),
///     ..Default::default()
/// };
/// let provider = GeminiProvider::new(config)?;
/// # Ok(())
/// # }
/// ```
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
    api_key: String,
    policy: CallPolicy,
}

/// Request body for `models/{model}:generateContent`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<GeminiTool>>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<GeminiInlineData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    thought: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiInlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiTool {
    google_search: serde_json::Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
    thinking_config: GeminiThinkingConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiThinkingConfig {
    thinking_budget: u32,
}

/// Response structure from the Gemini API
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    usage_metadata: Option<GeminiUsage>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContent>,
    #[serde(default)]
    grounding_metadata: Option<GeminiGroundingMetadata>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GeminiGroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GeminiUsage {
    #[serde(default)]
    prompt_token_count: usize,
    #[serde(default)]
    candidates_token_count: usize,
}

/// Outcome of one HTTP attempt
enum Attempt {
    Done(GeminiResponse),
    Transient(LegalisError),
}

impl GeminiProvider {
    /// Create a new Gemini provider
    ///
    /// # Errors
    ///
    /// Returns `LegalisError::Config` if no API key is configured, or
    /// `LegalisError::Provider` if the HTTP client cannot be built
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                LegalisError::Config(
                    "API key is missing. Set LEGALIS_API_KEY (or GEMINI_API_KEY).".to_string(),
                )
            })?;

        let policy = config.call_policy();

        let client = Client::builder()
            .user_agent("legalis/0.1.0")
            .build()
            .map_err(|e| LegalisError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(
            "Initialized Gemini provider: model={}, attempts={}",
            config.model,
            policy.attempts()
        );

        Ok(Self {
            client,
            config,
            api_key,
            policy,
        })
    }

    /// Override the call policy from the configuration
    pub fn with_policy(mut self, policy: CallPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Endpoint for the configured model
    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        )
    }

    fn build_body(&self, request: &GenerateRequest) -> GeminiRequest {
        let parts = request
            .parts
            .iter()
            .map(|part| match part {
                Part::Text(text) => GeminiPart {
                    text: Some(text.clone()),
                    ..Default::default()
                },
                Part::InlineData { mime_type, data } => GeminiPart {
                    inline_data: Some(GeminiInlineData {
                        mime_type: mime_type.clone(),
                        data: data.clone(),
                    }),
                    ..Default::default()
                },
            })
            .collect();

        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts,
            }],
            tools: request.search.then(|| {
                vec![GeminiTool {
                    google_search: serde_json::json!({}),
                }]
            }),
            generation_config: GeminiGenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: request.response_schema.clone(),
                thinking_config: GeminiThinkingConfig {
                    thinking_budget: self.config.thinking_budget,
                },
            },
        }
    }

    async fn attempt(&self, url: &str, body: &GeminiRequest) -> Result<Attempt> {
        let mut builder = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body);
        if let Some(timeout) = self.policy.timeout {
            builder = builder.timeout(timeout);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() || e.is_connect() => {
                return Ok(Attempt::Transient(LegalisError::Http(e)));
            }
            Err(e) => {
                tracing::error!("Gemini request failed: {}", e);
                return Err(LegalisError::Http(e).into());
            }
        };

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let error = LegalisError::Provider(format!(
                "Gemini returned error {}: {}",
                status, error_text
            ));
            if CallPolicy::is_transient_status(status.as_u16()) {
                return Ok(Attempt::Transient(error));
            }
            tracing::error!("Gemini returned error {}", status);
            return Err(error.into());
        }

        let parsed: GeminiResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            LegalisError::Provider(format!("Failed to parse Gemini response: {}", e))
        })?;

        Ok(Attempt::Done(parsed))
    }
}

/// Concatenate the non-thought text parts of the first candidate
fn answer_text(response: &GeminiResponse) -> Option<String> {
    let content = response.candidates.first()?.content.as_ref()?;
    let texts: Vec<&str> = content
        .parts
        .iter()
        .filter(|part| part.thought != Some(true))
        .filter_map(|part| part.text.as_deref())
        .collect();

    if texts.is_empty() {
        None
    } else {
        Some(texts.concat())
    }
}

impl From<GeminiResponse> for GenerateResponse {
    fn from(response: GeminiResponse) -> Self {
        let text = answer_text(&response);
        let usage = response
            .usage_metadata
            .as_ref()
            .map(|u| TokenUsage::new(u.prompt_token_count, u.candidates_token_count));
        let grounding_chunks = response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.grounding_metadata)
            .map(|metadata| metadata.grounding_chunks)
            .unwrap_or_default();

        Self {
            text,
            grounding_chunks,
            usage,
        }
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        let url = self.endpoint();
        let body = self.build_body(request);

        tracing::debug!(
            "Sending Gemini request: {} parts, search={}",
            body.contents[0].parts.len(),
            request.search
        );

        let attempts = self.policy.attempts();
        let mut attempt_no = 1;
        loop {
            match self.attempt(&url, &body).await? {
                Attempt::Done(parsed) => {
                    let response = GenerateResponse::from(parsed);
                    if let Some(usage) = response.usage {
                        tracing::debug!(
                            "Gemini response: prompt_tokens={}, completion_tokens={}",
                            usage.prompt_tokens,
                            usage.completion_tokens
                        );
                    }
                    return Ok(response);
                }
                Attempt::Transient(error) if attempt_no < attempts => {
                    tracing::warn!(
                        "Transient Gemini failure (attempt {}/{}): {}",
                        attempt_no,
                        attempts,
                        error
                    );
                    tokio::time::sleep(self.policy.retry_delay).await;
                    attempt_no += 1;
                }
                Attempt::Transient(error) => {
                    tracing::error!("{}", error);
                    return Err(error.into());
                }
            }
        }
    }

    fn model(&self) -> String {
        self.config.model.clone()
    }
}
