use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use legalis::storage::SledStore;

#[allow(dead_code)]
pub fn create_temp_store() -> (Arc<SledStore>, TempDir) {
    let tmp = TempDir::new().expect("failed to create tempdir");
    let store =
        SledStore::new_with_path(tmp.path().join("store.db")).expect("failed to open sled store");
    (Arc::new(store), tmp)
}

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

/// A well-formed model answer with `clauses` flagged clauses
#[allow(dead_code)]
pub fn model_reply(clauses: usize) -> Value {
    let clauses: Vec<Value> = (0..clauses)
        .map(|i| {
            json!({
                "originalText": format!("Clause {}", i + 1),
                "simplifiedExplanation": "You could lose money.",
                "severity": if i == 0 { "CRITICAL" } else { "LOW" },
                "category": "Money",
                "recommendation": "Negotiate this clause."
            })
        })
        .collect();

    json!({
        "summary": "Several one-sided terms.",
        "overallRiskScore": 72,
        "verdict": "High Risk",
        "specificRisks": {
            "human": "No significant risk",
            "financial": "Unlimited liability.",
            "cyber": "Data shared with partners.",
            "mental": "No significant risk"
        },
        "clauses": clauses
    })
}

/// Gemini `generateContent` body wrapping `text`, citing `sources`
#[allow(dead_code)]
pub fn gemini_body(text: &str, sources: &[&str]) -> Value {
    let chunks: Vec<Value> = sources
        .iter()
        .map(|uri| json!({"web": {"uri": uri, "title": "source"}}))
        .collect();

    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP",
            "groundingMetadata": {"groundingChunks": chunks}
        }],
        "usageMetadata": {"promptTokenCount": 1200, "candidatesTokenCount": 300}
    })
}
