//! Analysis request builder
//!
//! Turns user input into a [`GenerateRequest`]: instruction text, optional
//! inline document, search flag and the declared response schema.

use crate::analysis::types::{InputMode, InputRecord, Severity};
use crate::error::{LegalisError, Result};
use crate::prompts::build_prompt;
use crate::providers::{GenerateRequest, Part};
use serde_json::json;

/// Placeholder recorded when a file input carries no name
pub const UNNAMED_DOCUMENT: &str = "Uploaded Document";

/// Input submitted for analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisInput {
    /// Contract text pasted or read from a text file
    Text(String),
    /// Website address or company name whose terms should be found
    Url(String),
    /// Binary document
    File {
        /// Base64 payload, optionally prefixed with a `data:...;base64,` URI header
        data: String,
        /// Declared MIME type
        mime_type: String,
        /// Original file name, recorded instead of the payload
        file_name: Option<String>,
    },
}

impl AnalysisInput {
    /// Mode of this input
    pub fn mode(&self) -> InputMode {
        match self {
            AnalysisInput::Text(_) => InputMode::Text,
            AnalysisInput::Url(_) => InputMode::Url,
            AnalysisInput::File { .. } => InputMode::File,
        }
    }

    /// Whether the call for this input uses web search
    pub fn uses_search(&self) -> bool {
        matches!(self, AnalysisInput::Url(_))
    }

    /// Record of this input as stored with the result
    ///
    /// File inputs keep only their name and MIME type.
    ///
    /// # Examples
    ///
    /// ```
    /// use legalis::analysis::AnalysisInput;
    ///
    /// let input = AnalysisInput::File {
    ///     data: "JVBERi0=".to_string(),
    ///     mime_type: "application/pdf".to_string(),
    ///     file_name: Some("nda.pdf".to_string()),
    /// };
    /// let record = input.record();
    /// assert_eq!(record.value, "nda.pdf");
    /// assert_eq!(record.mime_type.as_deref(), Some("application/pdf"));
    /// ```
    pub fn record(&self) -> InputRecord {
        match self {
            AnalysisInput::Text(text) => InputRecord {
                mode: InputMode::Text,
                value: text.clone(),
                mime_type: None,
            },
            AnalysisInput::Url(target) => InputRecord {
                mode: InputMode::Url,
                value: target.clone(),
                mime_type: None,
            },
            AnalysisInput::File {
                mime_type,
                file_name,
                ..
            } => InputRecord {
                mode: InputMode::File,
                value: file_name
                    .clone()
                    .unwrap_or_else(|| UNNAMED_DOCUMENT.to_string()),
                mime_type: Some(mime_type.clone()),
            },
        }
    }

    fn ensure_not_empty(&self) -> Result<()> {
        let (blank, what) = match self {
            AnalysisInput::Text(text) => (text.trim().is_empty(), "Contract text"),
            AnalysisInput::Url(target) => (target.trim().is_empty(), "URL or company name"),
            AnalysisInput::File { data, .. } => (strip_data_uri(data).is_empty(), "Document"),
        };
        if blank {
            return Err(LegalisError::Validation(format!("{} cannot be empty.", what)).into());
        }
        Ok(())
    }
}

/// Drop a `data:<mime>;base64,` prefix from a payload, if present
///
/// # Examples
///
/// ```
/// use legalis::analysis::request::strip_data_uri;
///
/// assert_eq!(strip_data_uri("data:application/pdf;base64,JVBERi0="), "JVBERi0=");
/// assert_eq!(strip_data_uri("JVBERi0="), "JVBERi0=");
/// ```
pub fn strip_data_uri(data: &str) -> &str {
    match data.split_once("base64,") {
        Some((_, payload)) => payload,
        None => data,
    }
}

/// Schema the model's JSON answer must follow
pub fn response_schema() -> serde_json::Value {
    let severities: Vec<&str> = Severity::ALL.iter().map(|s| s.label()).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "summary": { "type": "STRING", "description": "A concise, simple executive summary." },
            "overallRiskScore": { "type": "INTEGER", "description": "A score from 0 (safe) to 100 (dangerous)." },
            "verdict": { "type": "STRING", "description": "One of the allowed verdict phrases." },
            "specificRisks": {
                "type": "OBJECT",
                "properties": {
                    "human": { "type": "STRING", "description": "Simple summary of rights risks." },
                    "financial": { "type": "STRING", "description": "Simple summary of money risks." },
                    "cyber": { "type": "STRING", "description": "Simple summary of data risks." },
                    "mental": { "type": "STRING", "description": "Simple summary of stress risks." }
                },
                "required": ["human", "financial", "cyber", "mental"]
            },
            "clauses": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "originalText": { "type": "STRING", "description": "The exact text of the clause." },
                        "simplifiedExplanation": { "type": "STRING", "description": "Simple explanation of the risk." },
                        "severity": { "type": "STRING", "enum": severities },
                        "category": { "type": "STRING", "description": "e.g., Money, Privacy, Termination" },
                        "recommendation": { "type": "STRING", "description": "Simple advice." }
                    },
                    "required": ["originalText", "simplifiedExplanation", "severity", "category", "recommendation"]
                }
            }
        },
        "required": ["summary", "overallRiskScore", "verdict", "clauses", "specificRisks"]
    })
}

/// Build the model request for an input
///
/// # Errors
///
/// Returns `LegalisError::Validation` for blank input
///
/// # Examples
///
/// ```
/// use legalis::analysis::{build_request, AnalysisInput};
///
/// let request = build_request(&AnalysisInput::Url("example.com".to_string())).unwrap();
/// assert!(request.search);
/// assert_eq!(request.parts.len(), 1);
/// ```
pub fn build_request(input: &AnalysisInput) -> Result<GenerateRequest> {
    input.ensure_not_empty()?;

    let mut parts = vec![Part::text(build_prompt(input))];
    if let AnalysisInput::File {
        data, mime_type, ..
    } = input
    {
        parts.push(Part::InlineData {
            mime_type: mime_type.clone(),
            data: strip_data_uri(data).to_string(),
        });
    }

    Ok(GenerateRequest {
        parts,
        search: input.uses_search(),
        response_schema: response_schema(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_input(data: &str) -> AnalysisInput {
        AnalysisInput::File {
            data: data.to_string(),
            mime_type: "application/pdf".to_string(),
            file_name: Some("lease.pdf".to_string()),
        }
    }

    #[test]
    fn test_text_request_has_single_part_and_no_search() {
        let request = build_request(&AnalysisInput::Text("Clause 1.".to_string())).unwrap();
        assert!(!request.search);
        assert_eq!(request.parts.len(), 1);
        assert!(request.parts[0].as_text().unwrap().contains("Clause 1."));
    }

    #[test]
    fn test_url_request_enables_search() {
        let request = build_request(&AnalysisInput::Url("https://acme.test".to_string())).unwrap();
        assert!(request.search);
        assert!(request.parts[0]
            .as_text()
            .unwrap()
            .contains("https://acme.test"));
    }

    #[test]
    fn test_file_request_strips_data_uri_and_attaches_payload() {
        let request = build_request(&file_input("data:application/pdf;base64,JVBERi0xLjQ=")).unwrap();
        assert!(!request.search);
        assert_eq!(request.parts.len(), 2);
        assert_eq!(
            request.parts[1],
            Part::InlineData {
                mime_type: "application/pdf".to_string(),
                data: "JVBERi0xLjQ=".to_string(),
            }
        );
    }

    #[test]
    fn test_file_request_without_prefix_keeps_payload() {
        let request = build_request(&file_input("JVBERi0xLjQ=")).unwrap();
        match &request.parts[1] {
            Part::InlineData { data, .. } => assert_eq!(data, "JVBERi0xLjQ="),
            other => panic!("unexpected part: {:?}", other),
        }
    }

    #[test]
    fn test_blank_inputs_rejected() {
        for input in [
            AnalysisInput::Text("   ".to_string()),
            AnalysisInput::Url(String::new()),
            file_input("data:application/pdf;base64,"),
        ] {
            let err = build_request(&input).unwrap_err();
            assert!(matches!(
                err.downcast_ref::<LegalisError>(),
                Some(LegalisError::Validation(_))
            ));
        }
    }

    #[test]
    fn test_schema_requires_all_top_level_fields() {
        let schema = response_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        for field in [
            "summary",
            "overallRiskScore",
            "verdict",
            "clauses",
            "specificRisks",
        ] {
            assert!(required.contains(&field), "missing {}", field);
        }
        assert_eq!(schema["properties"]["overallRiskScore"]["type"], "INTEGER");
        assert_eq!(
            schema["properties"]["specificRisks"]["required"]
                .as_array()
                .unwrap()
                .len(),
            4
        );
    }

    #[test]
    fn test_schema_clause_severity_enum() {
        let schema = response_schema();
        let clause = &schema["properties"]["clauses"]["items"];
        assert_eq!(
            clause["properties"]["severity"]["enum"],
            json!(["LOW", "MEDIUM", "HIGH", "CRITICAL"])
        );
        assert_eq!(clause["required"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_record_for_unnamed_file() {
        let input = AnalysisInput::File {
            data: "AAAA".to_string(),
            mime_type: "application/pdf".to_string(),
            file_name: None,
        };
        assert_eq!(input.record().value, UNNAMED_DOCUMENT);
        assert_eq!(input.mode(), InputMode::File);
    }

    #[test]
    fn test_record_for_text_keeps_content() {
        let input = AnalysisInput::Text("Full contract".to_string());
        let record = input.record();
        assert_eq!(record.mode, InputMode::Text);
        assert_eq!(record.value, "Full contract");
        assert!(record.mime_type.is_none());
    }
}
