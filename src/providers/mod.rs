//! Provider module for Legalis
//!
//! This module contains the generative-model provider abstraction and the
//! Gemini implementation.

pub mod base;
pub mod gemini;

pub use base::{
    CallPolicy, GenerateRequest, GenerateResponse, GroundingChunk, Part, Provider, TokenUsage,
    WebSource,
};
pub use gemini::GeminiProvider;

use crate::config::GeminiConfig;
use crate::error::Result;

/// Create a provider instance from configuration
///
/// # Arguments
///
/// * `config` - Gemini configuration
/// * `model_override` - Optional model name taking precedence over the config
///
/// # Errors
///
/// Returns a configuration error if no API key is available
pub fn create_provider(
    config: &GeminiConfig,
    model_override: Option<&str>,
) -> Result<Box<dyn Provider>> {
    let mut config = config.clone();
    if let Some(model) = model_override {
        config.model = model.to_string();
    }
    Ok(Box::new(GeminiProvider::new(config)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_provider_applies_model_override() {
        let config = GeminiConfig {
            api_key: Some("key".to_string()),
            ..Default::default()
        };
        let provider = create_provider(&config, Some("gemini-2.5-flash")).unwrap();
        assert_eq!(provider.model(), "gemini-2.5-flash");
    }

    #[test]
    fn test_create_provider_uses_config_model() {
        let config = GeminiConfig {
            api_key: Some("key".to_string()),
            ..Default::default()
        };
        let provider = create_provider(&config, None).unwrap();
        assert_eq!(provider.model(), "gemini-3-pro-preview");
    }

    #[test]
    fn test_create_provider_without_key_fails() {
        assert!(create_provider(&GeminiConfig::default(), None).is_err());
    }
}
