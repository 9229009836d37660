//! `legalis analyze`

use crate::analysis::input::{load_document, target_from_deep_link};
use crate::analysis::{AnalysisInput, Analyzer};
use crate::auth::SessionManager;
use crate::cli::InputSource;
use crate::commands::{open_store, report};
use crate::config::Config;
use crate::error::{LegalisError, Result};
use crate::history::HistoryManager;
use crate::providers::create_provider;
use anyhow::Context;
use colored::Colorize;

/// Turn the chosen CLI source into analysis input
///
/// # Errors
///
/// Returns `LegalisError::Validation` when no source is given, the deep link
/// carries no target or the file is unusable
pub async fn resolve_input(source: &InputSource, max_file_bytes: u64) -> Result<AnalysisInput> {
    if let Some(text) = &source.text {
        return Ok(AnalysisInput::Text(text.clone()));
    }
    if let Some(url) = &source.url {
        return Ok(AnalysisInput::Url(url.trim().to_string()));
    }
    if let Some(path) = &source.file {
        return load_document(path, max_file_bytes).await;
    }
    if let Some(link) = &source.link {
        return Ok(AnalysisInput::Url(target_from_deep_link(link)?));
    }
    Err(LegalisError::Validation(
        "Provide one of --text, --url, --file or --link.".to_string(),
    )
    .into())
}

/// Run one analysis for the logged-in user and print the result
///
/// # Arguments
///
/// * `config` - Global configuration
/// * `source` - What to analyze
/// * `model` - Optional model override
/// * `json` - Print JSON instead of the report
///
/// # Errors
///
/// Returns an authentication error when nobody is logged in; every failure
/// of the analysis itself is wrapped in an "Analysis failed" context
pub async fn run_analyze(
    config: Config,
    source: InputSource,
    model: Option<String>,
    json: bool,
) -> Result<()> {
    let store = open_store(&config)?;
    let sessions = SessionManager::from_config(store.clone(), &config.auth);
    let user = sessions.require_user()?;
    tracing::debug!("Analysis requested by user {}", user.id);

    let input = resolve_input(&source, config.analysis.max_file_bytes).await?;
    let provider = create_provider(&config.provider, model.as_deref())?;
    let history = HistoryManager::with_limit(store, config.storage.history_limit);
    let analyzer = Analyzer::new(provider, history);

    if !json {
        eprintln!(
            "{}",
            format!("Analyzing {} input with {}...", input.mode(), analyzer.model()).dimmed()
        );
    }

    let result = analyzer
        .analyze(input)
        .await
        .context("Analysis failed")?;

    if json {
        println!("{}", report::to_json(&result)?);
    } else {
        print!("{}", report::render_result(&result));
        println!();
    }
    Ok(())
}
