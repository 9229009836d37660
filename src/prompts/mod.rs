//! Prompts sent to the generative model
//!
//! This module assembles the mode-specific instruction text for an analysis
//! request on top of the shared audit instructions.

pub mod audit_prompt;

use crate::analysis::AnalysisInput;

/// Builds the instruction text for an analysis input
///
/// File inputs only get the shared instructions; the document itself travels
/// as a separate inline-data part.
///
/// # Examples
///
/// ```
/// use legalis::analysis::AnalysisInput;
/// use legalis::prompts::build_prompt;
///
/// let prompt = build_prompt(&AnalysisInput::Url("example.com".to_string()));
/// assert!(prompt.contains("\"example.com\""));
/// assert!(prompt.contains("Terms of Service"));
/// ```
pub fn build_prompt(input: &AnalysisInput) -> String {
    let instructions = audit_prompt::generate_audit_instructions();

    match input {
        AnalysisInput::Url(target) => format!(
            r#"{instructions}

TASK:
The user has provided a URL or Company Name: "{target}".
1. Search for the latest "Terms of Service", "Terms of Use", or "Privacy Policy" associated with this URL or Company.
2. Analyze the content of that legal agreement."#
        ),
        AnalysisInput::File { .. } => instructions,
        AnalysisInput::Text(text) => format!(
            r#"{instructions}

Contract Text:
"{text}""#
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_prompt_text_appends_contract() {
        let prompt = build_prompt(&AnalysisInput::Text("The tenant pays all fees.".to_string()));
        assert!(prompt.contains("Contract Text:"));
        assert!(prompt.ends_with("\"The tenant pays all fees.\""));
    }

    #[test]
    fn test_build_prompt_file_is_instructions_only() {
        let input = AnalysisInput::File {
            data: "JVBERi0=".to_string(),
            mime_type: "application/pdf".to_string(),
            file_name: Some("lease.pdf".to_string()),
        };
        let prompt = build_prompt(&input);
        assert_eq!(prompt, audit_prompt::generate_audit_instructions());
        assert!(!prompt.contains("JVBERi0="));
    }

    #[test]
    fn test_build_prompt_url_contains_search_task() {
        let prompt = build_prompt(&AnalysisInput::Url("Acme Corp".to_string()));
        assert!(prompt.contains("TASK:"));
        assert!(prompt.contains("Privacy Policy"));
        assert!(prompt.contains("\"Acme Corp\""));
    }
}
