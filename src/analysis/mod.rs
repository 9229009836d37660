//! Contract risk analysis
//!
//! An analysis runs in three steps: [`build_request`] turns the user's input
//! into a model request, a [`Provider`] answers it, and [`interpret`] checks
//! the answer against the declared schema. [`Analyzer`] ties the steps
//! together and records successful results in the history.

pub mod input;
pub mod request;
pub mod response;
pub mod types;

pub use request::{build_request, response_schema, AnalysisInput};
pub use response::{collect_sources, interpret};
pub use types::{
    AnalysisResult, InputMode, InputRecord, RiskBand, RiskClause, Severity, SpecificRisks, Verdict,
};

use crate::error::Result;
use crate::history::HistoryManager;
use crate::providers::Provider;

/// Runs analyses against a provider and records them in history
pub struct Analyzer {
    provider: Box<dyn Provider>,
    history: HistoryManager,
}

impl Analyzer {
    /// Create an analyzer
    pub fn new(provider: Box<dyn Provider>, history: HistoryManager) -> Self {
        Self { provider, history }
    }

    /// Model used for calls
    pub fn model(&self) -> String {
        self.provider.model()
    }

    /// Analyze one input
    ///
    /// The result is saved to history only when the whole call succeeds.
    ///
    /// # Errors
    ///
    /// Returns validation errors for blank input, the provider's error as-is
    /// when the call fails, and `EmptyResponse`/`Parse` errors for unusable
    /// answers
    pub async fn analyze(&self, input: AnalysisInput) -> Result<AnalysisResult> {
        let request = build_request(&input)?;
        tracing::info!(
            "Analyzing {} input with {} ({} parts, search: {})",
            input.mode(),
            self.provider.model(),
            request.parts.len(),
            request.search
        );

        let response = self.provider.generate(&request).await?;
        if let Some(usage) = response.usage {
            tracing::debug!(
                "Token usage: prompt={}, completion={}, total={}",
                usage.prompt_tokens,
                usage.completion_tokens,
                usage.total_tokens
            );
        }

        let result = interpret(&response, &input, request.search)?;
        self.history.save_to_history(result.clone());
        tracing::info!(
            "Analysis complete: {} ({}/100)",
            result.verdict,
            result.overall_risk_score
        );
        Ok(result)
    }
}
