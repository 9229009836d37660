//! Domain types for contract risk analyses
//!
//! Field names serialize in camelCase so stored history stays readable by the
//! browser build of Legalis.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Closed set of verdict labels attached to an analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// Nothing worth flagging
    #[serde(rename = "Safe")]
    Safe,
    /// Minor issues
    #[serde(rename = "Low Risk")]
    LowRisk,
    /// Read carefully before signing
    #[serde(rename = "Caution")]
    Caution,
    /// Significant risks
    #[serde(rename = "High Risk")]
    HighRisk,
    /// Do not sign as-is
    #[serde(rename = "Critical")]
    Critical,
}

impl Verdict {
    /// All verdicts, mildest first
    pub const ALL: [Verdict; 5] = [
        Verdict::Safe,
        Verdict::LowRisk,
        Verdict::Caution,
        Verdict::HighRisk,
        Verdict::Critical,
    ];

    /// The label shown to users and sent to the model
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Safe => "Safe",
            Verdict::LowRisk => "Low Risk",
            Verdict::Caution => "Caution",
            Verdict::HighRisk => "High Risk",
            Verdict::Critical => "Critical",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Severity of a flagged clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// All severities, lowest first
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    /// Wire label (`LOW`, `MEDIUM`, ...)
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Colour band of an overall risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskBand {
    /// Score below 30
    Low,
    /// Score from 30 to 69
    Moderate,
    /// Score of 70 or more
    High,
}

impl RiskBand {
    /// Band for a 0-100 score
    ///
    /// # Examples
    ///
    /// ```
    /// use legalis::analysis::RiskBand;
    ///
    /// assert_eq!(RiskBand::from_score(29), RiskBand::Low);
    /// assert_eq!(RiskBand::from_score(30), RiskBand::Moderate);
    /// assert_eq!(RiskBand::from_score(70), RiskBand::High);
    /// ```
    pub fn from_score(score: u8) -> Self {
        if score < 30 {
            RiskBand::Low
        } else if score < 70 {
            RiskBand::Moderate
        } else {
            RiskBand::High
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskBand::Low => write!(f, "low"),
            RiskBand::Moderate => write!(f, "moderate"),
            RiskBand::High => write!(f, "high"),
        }
    }
}

/// One flagged passage of the analyzed document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskClause {
    /// Exact text of the clause
    pub original_text: String,
    /// Plain-English explanation of the danger
    pub simplified_explanation: String,
    /// How bad it is
    pub severity: Severity,
    /// Free-text label such as "Money" or "Privacy"
    pub category: String,
    /// Actionable advice
    pub recommendation: String,
}

/// Short per-area risk summaries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecificRisks {
    /// Personal rights, freedom, privacy
    pub human: String,
    /// Costs, penalties, money loss
    pub financial: String,
    /// Data leaks, hacking, tracking
    pub cyber: String,
    /// Stress, unfair pressure
    pub mental: String,
}

/// Kind of input submitted for analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    Text,
    Url,
    File,
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputMode::Text => write!(f, "text"),
            InputMode::Url => write!(f, "url"),
            InputMode::File => write!(f, "file"),
        }
    }
}

/// What was analyzed
///
/// For file inputs `value` holds the file name only, never the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputRecord {
    pub mode: InputMode,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// One completed audit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Opaque unique identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Creation time in epoch milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// Executive summary
    pub summary: String,
    /// Overall risk from 0 (safe) to 100 (dangerous)
    #[serde(deserialize_with = "deserialize_risk_score")]
    pub overall_risk_score: u8,
    /// Closed-set verdict
    pub verdict: Verdict,
    /// Per-area breakdown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific_risks: Option<SpecificRisks>,
    /// Flagged clauses in model output order
    #[serde(default)]
    pub clauses: Vec<RiskClause>,
    /// Web pages cited by a search-backed analysis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
    /// What was analyzed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<InputRecord>,
}

impl AnalysisResult {
    /// Colour band of the overall score
    pub fn risk_band(&self) -> RiskBand {
        RiskBand::from_score(self.overall_risk_score)
    }

    /// Highest clause severity, if any clause was flagged
    pub fn worst_severity(&self) -> Option<Severity> {
        self.clauses.iter().map(|c| c.severity).max()
    }
}

/// Accept only whole numbers within 0..=100
pub(crate) fn deserialize_risk_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    u8::try_from(raw)
        .ok()
        .filter(|score| *score <= 100)
        .ok_or_else(|| {
            serde::de::Error::custom(format!("overallRiskScore {} is outside 0..=100", raw))
        })
}
