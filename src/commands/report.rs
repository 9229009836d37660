//! Terminal rendering of analyses
//!
//! Reports use `colored` for the verdict, score and severities and
//! `prettytable` for clause and history listings.

use crate::analysis::{AnalysisResult, RiskBand, Severity};
use crate::error::{LegalisError, Result};
use chrono::{Local, TimeZone};
use colored::{ColoredString, Colorize};
use prettytable::{format, row, Table};

/// Shorten `text` to at most `max` characters, marking the cut with "..."
pub fn truncate(text: &str, max: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept.trim_end())
}

/// First eight characters of an id
pub fn short_id(id: Option<&str>) -> String {
    id.map(|id| id.chars().take(8).collect())
        .unwrap_or_else(|| "-".to_string())
}

/// Millisecond timestamp as local date and time
pub fn format_timestamp(millis: Option<i64>) -> String {
    millis
        .and_then(|ms| Local.timestamp_millis_opt(ms).single())
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn colored_score(result: &AnalysisResult) -> ColoredString {
    let text = format!("{}/100", result.overall_risk_score);
    match result.risk_band() {
        RiskBand::Low => text.green(),
        RiskBand::Moderate => text.yellow(),
        RiskBand::High => text.red(),
    }
}

fn colored_severity(severity: Severity) -> ColoredString {
    match severity {
        Severity::Low => severity.label().green(),
        Severity::Medium => severity.label().yellow(),
        Severity::High => severity.label().red(),
        Severity::Critical => severity.label().red().bold(),
    }
}

/// Full report for one analysis
pub fn render_result(result: &AnalysisResult) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "\n{}  {}  ({} risk)\n",
        result.verdict.label().bold(),
        colored_score(result),
        result.risk_band()
    ));
    if let Some(input) = &result.input {
        out.push_str(&format!(
            "{} {}: {}\n",
            "Input".dimmed(),
            input.mode,
            truncate(&input.value, 60)
        ));
    }
    out.push_str(&format!(
        "{} {}  {} {}\n",
        "ID".dimmed(),
        result.id.as_deref().unwrap_or("-"),
        "Date".dimmed(),
        format_timestamp(result.timestamp)
    ));

    out.push_str(&format!("\n{}\n{}\n", "Summary".bold(), result.summary));

    if let Some(risks) = &result.specific_risks {
        out.push_str(&format!("\n{}\n", "Risk areas".bold()));
        for (area, text) in [
            ("Human", &risks.human),
            ("Financial", &risks.financial),
            ("Cyber", &risks.cyber),
            ("Mental", &risks.mental),
        ] {
            out.push_str(&format!("  {:<10} {}\n", area, text));
        }
    }

    if result.clauses.is_empty() {
        out.push_str(&format!("\n{}\n", "No risky clauses flagged.".green()));
    } else {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row![
            "Severity".bold(),
            "Category".bold(),
            "Clause".bold(),
            "What it means".bold(),
            "Recommendation".bold()
        ]);
        for clause in &result.clauses {
            table.add_row(row![
                colored_severity(clause.severity),
                clause.category,
                truncate(&clause.original_text, 60),
                clause.simplified_explanation,
                clause.recommendation
            ]);
        }
        let worst = result
            .worst_severity()
            .map(colored_severity)
            .unwrap_or_else(|| "-".normal());
        out.push_str(&format!(
            "\n{} ({}, worst {})\n{}",
            "Flagged clauses".bold(),
            result.clauses.len(),
            worst,
            table
        ));
    }

    if let Some(sources) = result.sources.as_ref().filter(|s| !s.is_empty()) {
        out.push_str(&format!("\n{}\n", "Sources".bold()));
        for source in sources {
            out.push_str(&format!("  {}\n", source.cyan()));
        }
    }

    out
}

/// Table of stored analyses, newest first
pub fn render_history(items: &[AnalysisResult]) -> String {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(row![
        "ID".bold(),
        "Date".bold(),
        "Mode".bold(),
        "Input".bold(),
        "Verdict".bold(),
        "Score".bold()
    ]);

    for item in items {
        let (mode, value) = item
            .input
            .as_ref()
            .map(|input| (input.mode.to_string(), truncate(&input.value, 40)))
            .unwrap_or_else(|| ("-".to_string(), "-".to_string()));
        table.add_row(row![
            short_id(item.id.as_deref()).cyan(),
            format_timestamp(item.timestamp),
            mode,
            value,
            item.verdict.label(),
            colored_score(item)
        ]);
    }

    table.to_string()
}

/// Pretty JSON for one or more analyses
///
/// # Errors
///
/// Returns `LegalisError::Serialization` if serialization fails
pub fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| LegalisError::Serialization(e).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{InputMode, InputRecord, RiskClause, SpecificRisks, Verdict};

    fn sample() -> AnalysisResult {
        AnalysisResult {
            id: Some("0123456789abcdef".to_string()),
            timestamp: Some(1_700_000_000_000),
            summary: "A lease with steep penalties.".to_string(),
            overall_risk_score: 81,
            verdict: Verdict::HighRisk,
            specific_risks: Some(SpecificRisks {
                human: "No significant risk".to_string(),
                financial: "Penalties of three months' rent.".to_string(),
                cyber: "No significant risk".to_string(),
                mental: "No significant risk".to_string(),
            }),
            clauses: vec![RiskClause {
                original_text: "Tenant forfeits the deposit on any breach.".to_string(),
                simplified_explanation: "Any mistake costs your deposit.".to_string(),
                severity: Severity::High,
                category: "Money".to_string(),
                recommendation: "Limit forfeiture to material breaches.".to_string(),
            }],
            sources: Some(vec!["https://acme.test/terms".to_string()]),
            input: Some(InputRecord {
                mode: InputMode::File,
                value: "lease.pdf".to_string(),
                mime_type: Some("application/pdf".to_string()),
            }),
        }
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghijkl", 8), "abcde...");
        assert_eq!(truncate("ééééééééé", 5), "éé...");
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id(Some("0123456789")), "01234567");
        assert_eq!(short_id(Some("abc")), "abc");
        assert_eq!(short_id(None), "-");
    }

    #[test]
    fn test_format_timestamp_missing() {
        assert_eq!(format_timestamp(None), "-");
        assert_ne!(format_timestamp(Some(1_700_000_000_000)), "-");
    }

    #[test]
    fn test_render_result_contains_sections() {
        let report = render_result(&sample());
        assert!(report.contains("High Risk"));
        assert!(report.contains("81/100"));
        assert!(report.contains("lease.pdf"));
        assert!(report.contains("Penalties of three months' rent."));
        assert!(report.contains("Money"));
        assert!(report.contains("https://acme.test/terms"));
    }

    #[test]
    fn test_render_result_without_clauses() {
        let mut result = sample();
        result.clauses.clear();
        result.sources = None;
        let report = render_result(&result);
        assert!(report.contains("No risky clauses flagged."));
        assert!(!report.contains("Sources"));
    }

    #[test]
    fn test_render_history_lists_items() {
        let table = render_history(&[sample()]);
        assert!(table.contains("01234567"));
        assert!(table.contains("lease.pdf"));
        assert!(table.contains("High Risk"));
    }

    #[test]
    fn test_to_json_uses_camel_case() {
        let json = to_json(&sample()).unwrap();
        assert!(json.contains("\"overallRiskScore\": 81"));
        assert!(json.contains("\"verdict\": \"High Risk\""));
    }
}
