/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes three top-level command modules:

- `analyze` — Run a risk audit and print the report
- `history` — List, show and clear stored analyses
- `auth`    — Local account signup, login, logout and whoami

`report` holds the terminal rendering shared by `analyze` and `history`.
*/

pub mod analyze;
pub mod auth;
pub mod history;
pub mod report;

use crate::config::Config;
use crate::error::Result;
use crate::storage::{KeyValueStore, SledStore};
use std::sync::Arc;

/// Open the configured local store
///
/// # Errors
///
/// Returns `LegalisError::Storage` if the database cannot be opened
pub fn open_store(config: &Config) -> Result<Arc<dyn KeyValueStore>> {
    let store = SledStore::open(config.storage.path.as_deref())?;
    tracing::debug!("Using local store at {}", store.path().display());
    Ok(Arc::new(store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_store_uses_configured_path() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.storage.path = Some(dir.path().join("store.db"));

        let store = open_store(&config).unwrap();
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        assert!(dir.path().join("store.db").exists());
    }
}
