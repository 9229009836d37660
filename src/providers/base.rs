//! Base provider trait and common types for Legalis
//!
//! This module defines the Provider trait that generative-model backends
//! implement, the request/response shapes exchanged with them, and the
//! call policy (timeout and retries) applied to each call.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One piece of request content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    /// Instruction or document text
    Text(String),
    /// Binary document, base64-encoded without any data-URI prefix
    InlineData {
        /// Declared MIME type of the payload
        mime_type: String,
        /// Base64 payload
        data: String,
    },
}

impl Part {
    /// Creates a text part
    ///
    /// # Examples
    ///
    /// ```
    /// use legalis::providers::Part;
    ///
    /// let part = Part::text("Analyze this");
    /// assert_eq!(part.as_text(), Some("Analyze this"));
    /// ```
    pub fn text(content: impl Into<String>) -> Self {
        Part::Text(content.into())
    }

    /// Text content of a text part
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text(text) => Some(text),
            Part::InlineData { .. } => None,
        }
    }
}

/// A single generation request
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Content parts, in order
    pub parts: Vec<Part>,
    /// Enable the provider's web search tool for this call
    pub search: bool,
    /// Schema the JSON answer must conform to
    pub response_schema: serde_json::Value,
}

/// A web page cited by a search-backed answer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSource {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// One grounding chunk returned alongside a search-backed answer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingChunk {
    #[serde(default)]
    pub web: Option<WebSource>,
}

impl GroundingChunk {
    /// Chunk citing a single web address
    pub fn web(uri: impl Into<String>) -> Self {
        Self {
            web: Some(WebSource {
                uri: Some(uri.into()),
                title: None,
            }),
        }
    }
}

/// Token usage information from a generation call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens in the prompt (including inline documents)
    pub prompt_tokens: usize,
    /// Tokens in the answer
    pub completion_tokens: usize,
    /// Total tokens used (prompt + completion)
    pub total_tokens: usize,
}

impl TokenUsage {
    /// Create a new TokenUsage instance
    ///
    /// # Examples
    ///
    /// ```
    /// use legalis::providers::TokenUsage;
    ///
    /// let usage = TokenUsage::new(100, 50);
    /// assert_eq!(usage.total_tokens, 150);
    /// ```
    pub fn new(prompt_tokens: usize, completion_tokens: usize) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// Answer to a generation request
#[derive(Debug, Clone, Default)]
pub struct GenerateResponse {
    /// Answer text; `None` when the model produced no text at all
    pub text: Option<String>,
    /// Grounding chunks of the first candidate
    pub grounding_chunks: Vec<GroundingChunk>,
    /// Token usage if reported
    pub usage: Option<TokenUsage>,
}

impl GenerateResponse {
    /// Response carrying only answer text
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }
}

/// Timeout and retry behaviour of a provider call
///
/// The default is a single attempt with the transport's own timeout.
/// Retries, when enabled, only apply to transient failures (rate limiting,
/// server errors, connection problems and timeouts).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallPolicy {
    /// Per-attempt timeout
    pub timeout: Option<Duration>,
    /// Additional attempts after a transient failure
    pub max_retries: u32,
    /// Pause between attempts
    pub retry_delay: Duration,
}

impl Default for CallPolicy {
    fn default() -> Self {
        Self {
            timeout: None,
            max_retries: 0,
            retry_delay: Duration::from_millis(500),
        }
    }
}

impl CallPolicy {
    /// Total number of attempts this policy allows
    pub fn attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Whether an HTTP status is worth retrying
    ///
    /// # Examples
    ///
    /// ```
    /// use legalis::providers::CallPolicy;
    ///
    /// assert!(CallPolicy::is_transient_status(429));
    /// assert!(CallPolicy::is_transient_status(503));
    /// assert!(!CallPolicy::is_transient_status(400));
    /// ```
    pub fn is_transient_status(status: u16) -> bool {
        status == 429 || (500..600).contains(&status)
    }
}

/// Generative-model provider
///
/// # Examples
///
/// ```no_run
/// use legalis::providers::{GenerateRequest, GenerateResponse, Provider};
/// use legalis::error::Result;
/// use async_trait::async_trait;
///
/// struct EchoProvider;
///
/// #[async_trait]
/// impl Provider for EchoProvider {
///     async fn generate(&self, _request: &GenerateRequest) -> Result<GenerateResponse> {
///         Ok(GenerateResponse::with_text("{}"))
///     }
///
///     fn model(&self) -> String {
///         "echo".to_string()
///     }
/// }
/// ```
#[async_trait]
pub trait Provider: Send + Sync {
    /// Run one generation request
    ///
    /// # Errors
    ///
    /// Returns error if the call fails after the configured attempts. Errors
    /// are not rewritten: the caller sees the transport failure as-is.
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse>;

    /// Model identifier used for calls
    fn model(&self) -> String;
}
