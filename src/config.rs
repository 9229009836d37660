//! Configuration management for Legalis
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{LegalisError, Result};
use crate::providers::CallPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variables consulted for the API key, in priority order
pub const API_KEY_ENV_VARS: [&str; 3] = ["LEGALIS_API_KEY", "GEMINI_API_KEY", "API_KEY"];

/// Main configuration structure for Legalis
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Generative model provider settings
    #[serde(default)]
    pub provider: GeminiConfig,
    /// Local store settings
    #[serde(default)]
    pub storage: StorageConfig,
    /// Account flow settings
    #[serde(default)]
    pub auth: AuthConfig,
    /// Analysis input settings
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Gemini provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Model to use for analyses
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// API base URL (overridable so tests can point at a mock server)
    #[serde(default = "default_gemini_api_base")]
    pub api_base: String,

    /// API key; usually supplied through the environment instead
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Thinking token budget passed in the generation config
    #[serde(default = "default_thinking_budget")]
    pub thinking_budget: u32,

    /// Request timeout in seconds; `None` keeps the transport default
    #[serde(default)]
    pub timeout_seconds: Option<u64>,

    /// Retries on transient failures; 0 means a single attempt
    #[serde(default)]
    pub max_retries: u32,
}

fn default_gemini_model() -> String {
    "gemini-3-pro-preview".to_string()
}

fn default_gemini_api_base() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_thinking_budget() -> u32 {
    2048
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: default_gemini_model(),
            api_base: default_gemini_api_base(),
            api_key: None,
            thinking_budget: default_thinking_budget(),
            timeout_seconds: None,
            max_retries: 0,
        }
    }
}

impl GeminiConfig {
    /// Build the call policy described by this configuration
    pub fn call_policy(&self) -> CallPolicy {
        CallPolicy {
            timeout: self.timeout_seconds.map(Duration::from_secs),
            max_retries: self.max_retries,
            ..CallPolicy::default()
        }
    }
}

/// Local store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the store database; defaults to the platform data directory
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Maximum number of analyses kept in history
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_history_limit() -> usize {
    20
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: None,
            history_limit: default_history_limit(),
        }
    }
}

/// Account flow configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Simulated signup round trip (milliseconds)
    #[serde(default = "default_signup_latency")]
    pub signup_latency_ms: u64,

    /// Simulated login round trip (milliseconds)
    #[serde(default = "default_login_latency")]
    pub login_latency_ms: u64,
}

fn default_signup_latency() -> u64 {
    1000
}

fn default_login_latency() -> u64 {
    800
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            signup_latency_ms: default_signup_latency(),
            login_latency_ms: default_login_latency(),
        }
    }
}

/// Analysis input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Largest document accepted through `--file` (bytes)
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
}

fn default_max_file_bytes() -> u64 {
    20 * 1024 * 1024 // 20 MiB
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: default_max_file_bytes(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::debug!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| LegalisError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| LegalisError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(model) = std::env::var("LEGALIS_MODEL") {
            self.provider.model = model;
        }

        if let Ok(api_base) = std::env::var("LEGALIS_API_BASE") {
            self.provider.api_base = api_base;
        }

        let env_key = API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|value| !value.trim().is_empty());
        if let Some(key) = env_key {
            self.provider.api_key = Some(key);
        }

        if let Ok(store_path) = std::env::var("LEGALIS_STORE_PATH") {
            self.storage.path = Some(PathBuf::from(store_path));
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        if let Some(path) = &cli.storage_path {
            tracing::debug!("Using storage path override from CLI: {}", path);
            self.storage.path = Some(PathBuf::from(path));
        }
    }

    /// Validate the configuration
    ///
    /// The API key is deliberately not checked here: only the analysis path
    /// needs it, and its absence is reported when the provider is built.
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.provider.model.trim().is_empty() {
            return Err(LegalisError::Config("provider.model cannot be empty".to_string()).into());
        }

        if !(self.provider.api_base.starts_with("http://")
            || self.provider.api_base.starts_with("https://"))
        {
            return Err(LegalisError::Config(format!(
                "provider.api_base must be an http(s) URL, got: {}",
                self.provider.api_base
            ))
            .into());
        }

        if self.provider.thinking_budget > 32_768 {
            return Err(LegalisError::Config(
                "provider.thinking_budget must be less than or equal to 32768".to_string(),
            )
            .into());
        }

        if self.storage.history_limit == 0 {
            return Err(LegalisError::Config(
                "storage.history_limit must be greater than 0".to_string(),
            )
            .into());
        }

        if self.analysis.max_file_bytes == 0 {
            return Err(LegalisError::Config(
                "analysis.max_file_bytes must be greater than 0".to_string(),
            )
            .into());
        }

        Ok(())
    }
}
