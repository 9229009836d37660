//! Contract audit instructions
//!
//! The fixed instruction block shared by every analysis mode. It asks for
//! plain-English output and spells out every field of the response schema.

/// Fallback phrase for a risk area with nothing to report
pub const NO_SIGNIFICANT_RISK: &str = "No significant risk";

/// Word cap for each risk-area description
pub const RISK_AREA_WORD_LIMIT: usize = 15;

/// Generates the risk-area breakdown instruction
pub fn generate_risk_categories_instruction() -> String {
    format!(
        r#"5. A specific breakdown of risks in these 4 categories. Keep descriptions extremely short (under {limit} words) using simple, globally understood English:
   - Human Centric (impact on personal rights, freedom, privacy)
   - Financial (unexpected costs, penalties, money loss)
   - Cyber (data leaks, hacking, spying)
   - Mental (stress, unfair pressure, peace of mind)
   If no risk is detected in a category, state "{fallback}"."#,
        limit = RISK_AREA_WORD_LIMIT,
        fallback = NO_SIGNIFICANT_RISK,
    )
}

/// Generates the instruction block common to all analysis modes
///
/// # Examples
///
/// ```
/// use legalis::prompts::audit_prompt::generate_audit_instructions;
///
/// let prompt = generate_audit_instructions();
/// assert!(prompt.contains("High Risk"));
/// assert!(prompt.contains("No significant risk"));
/// ```
pub fn generate_audit_instructions() -> String {
    let verdicts = crate::analysis::Verdict::ALL
        .iter()
        .map(|v| format!("\"{}\"", v.label()))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"You are an expert senior legal counsel and contract risk auditor.
Analyze the provided legal document or text.
Identify hidden risks, dangerous clauses, and unfair terms.

CRITICAL INSTRUCTION: Use simple, universally understood English (CEFR Level B1). Avoid complex legal jargon. If a legal term is necessary, explain it simply.

Provide a structured analysis including:
1. A plain-English executive summary. Simple words only.
2. An overall risk score (0-100, where 0 is Safe and 100 is Dangerous).
3. A short verdict. Use ONLY one of these globally understood phrases: {verdicts}.
4. A list of specific risky clauses.
   - Simplified Explanation: Explain the danger as if speaking to a non-lawyer.
   - Severity: one of LOW, MEDIUM, HIGH, CRITICAL.
   - Category: a short label such as Money, Privacy, Termination.
   - Recommendation: Clear, actionable advice using simple verbs (e.g., "Ask to remove this", "Change this to...").
{categories}"#,
        verdicts = verdicts,
        categories = generate_risk_categories_instruction(),
    )
}
