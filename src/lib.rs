//! Legalis - plain-language risk audits of legal documents
//!
//! This library provides the core functionality for Legalis: it sends contract
//! text, documents or a company's published terms to a Gemini model with a
//! fixed audit prompt and response schema, validates the structured answer,
//! and keeps local accounts and a bounded analysis history.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `analysis`: Request builder, response interpreter and the `Analyzer`
//! - `prompts`: Audit instructions and mode-specific prompt assembly
//! - `providers`: Model provider abstraction and the Gemini implementation
//! - `auth`: Local user table and session record
//! - `history`: Bounded, newest-first analysis history
//! - `storage`: Key-value store capability (sled on disk, in-memory for tests)
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli` / `commands`: Command-line interface and handlers
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use legalis::analysis::{AnalysisInput, Analyzer};
//! use legalis::history::HistoryManager;
//! use legalis::providers::create_provider;
//! use legalis::storage::SledStore;
//! use legalis::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let store = Arc::new(SledStore::new()?);
//!     let provider = create_provider(&config.provider, None)?;
//!     let analyzer = Analyzer::new(provider, HistoryManager::new(store));
//!
//!     let result = analyzer
//!         .analyze(AnalysisInput::Text("The tenant waives all rights.".into()))
//!         .await?;
//!     println!("{} ({}/100)", result.verdict, result.overall_risk_score);
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod auth;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod history;
pub mod logging;
pub mod prompts;
pub mod providers;
pub mod storage;

// Re-export commonly used types
pub use analysis::{AnalysisInput, AnalysisResult, Analyzer, Verdict};
pub use auth::{SessionManager, User};
pub use config::Config;
pub use error::{LegalisError, Result};
pub use history::HistoryManager;
