//! Analysis response interpreter
//!
//! Validates the model's JSON answer against the declared shape and turns
//! it into an [`AnalysisResult`] carrying input metadata and cited sources.

use crate::analysis::request::AnalysisInput;
use crate::analysis::types::{
    deserialize_risk_score, AnalysisResult, RiskClause, SpecificRisks, Verdict,
};
use crate::error::{LegalisError, Result};
use crate::providers::{GenerateResponse, GroundingChunk};
use chrono::Utc;
use serde::Deserialize;
use std::collections::HashSet;
use uuid::Uuid;

/// Shape the model must answer with
///
/// Unknown verdict or severity labels, a score outside 0..=100 and missing
/// fields all fail deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelReply {
    summary: String,
    #[serde(deserialize_with = "deserialize_risk_score")]
    overall_risk_score: u8,
    verdict: Verdict,
    specific_risks: SpecificRisks,
    clauses: Vec<RiskClause>,
}

/// Remove a Markdown code fence wrapped around a JSON answer
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.strip_suffix("```").unwrap_or(rest);
    // Drop the info string ("json") on the opening fence line.
    match body.split_once('\n') {
        Some((info, content)) if !info.trim_start().starts_with('{') => content.trim(),
        _ => body.trim(),
    }
}

/// Collect cited web addresses, deduplicated in first-seen order
///
/// # Examples
///
/// ```
/// use legalis::analysis::collect_sources;
/// use legalis::providers::GroundingChunk;
///
/// let chunks = vec![
///     GroundingChunk::web("https://a.com"),
///     GroundingChunk::web("https://a.com"),
///     GroundingChunk::web("https://b.com"),
/// ];
/// assert_eq!(collect_sources(&chunks), vec!["https://a.com", "https://b.com"]);
/// ```
pub fn collect_sources(chunks: &[GroundingChunk]) -> Vec<String> {
    let mut seen = HashSet::new();
    chunks
        .iter()
        .filter_map(|chunk| chunk.web.as_ref()?.uri.clone())
        .filter(|uri| seen.insert(uri.clone()))
        .collect()
}

/// Interpret a model answer
///
/// # Arguments
///
/// * `response` - Raw provider response
/// * `input` - The input the request was built from
/// * `searched` - Whether the call ran with web search enabled
///
/// # Errors
///
/// Returns `LegalisError::EmptyResponse` if there is no answer text and
/// `LegalisError::Parse` if the answer does not match the schema
pub fn interpret(
    response: &GenerateResponse,
    input: &AnalysisInput,
    searched: bool,
) -> Result<AnalysisResult> {
    let text = response
        .text
        .as_deref()
        .map(strip_code_fence)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| LegalisError::EmptyResponse("No response from AI.".to_string()))?;

    let reply: ModelReply = serde_json::from_str(text).map_err(|e| {
        tracing::warn!("Model answer did not match the response schema: {}", e);
        LegalisError::Parse(format!("Model answer did not match the schema: {}", e))
    })?;

    let sources = if searched {
        Some(collect_sources(&response.grounding_chunks)).filter(|s| !s.is_empty())
    } else {
        None
    };

    tracing::debug!(
        "Interpreted analysis: verdict={}, score={}, clauses={}, sources={}",
        reply.verdict,
        reply.overall_risk_score,
        reply.clauses.len(),
        sources.as_ref().map_or(0, Vec::len)
    );

    Ok(AnalysisResult {
        id: Some(Uuid::new_v4().to_string()),
        timestamp: Some(Utc::now().timestamp_millis()),
        summary: reply.summary,
        overall_risk_score: reply.overall_risk_score,
        verdict: reply.verdict,
        specific_risks: Some(reply.specific_risks),
        clauses: reply.clauses,
        sources,
        input: Some(input.record()),
    })
}
