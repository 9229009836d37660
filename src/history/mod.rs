//! Analysis history
//!
//! A bounded, newest-first list of past analyses kept under a single key of
//! the local store. Reads and writes never fail: a missing or corrupt list
//! reads as empty and a failed write is logged and otherwise ignored.

use crate::analysis::AnalysisResult;
use crate::storage::{keys, read_json, write_json, KeyValueStore};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Default number of analyses kept
pub const MAX_HISTORY_ITEMS: usize = 20;

/// Shortest id prefix accepted by [`HistoryManager::find`]
pub const MIN_ID_PREFIX: usize = 4;

/// Manager for the stored analysis history
#[derive(Clone)]
pub struct HistoryManager {
    store: Arc<dyn KeyValueStore>,
    limit: usize,
}

impl HistoryManager {
    /// Create a manager with the default bound
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_limit(store, MAX_HISTORY_ITEMS)
    }

    /// Create a manager keeping at most `limit` entries (minimum 1)
    pub fn with_limit(store: Arc<dyn KeyValueStore>, limit: usize) -> Self {
        Self {
            store,
            limit: limit.max(1),
        }
    }

    /// Maximum number of entries kept
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Stored analyses, newest first
    pub fn get_history(&self) -> Vec<AnalysisResult> {
        read_json(self.store.as_ref(), keys::HISTORY).unwrap_or_default()
    }

    /// Prepend an analysis and persist the bounded list
    ///
    /// Missing `id`/`timestamp` are filled in. Returns the updated list even
    /// when the write fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use legalis::analysis::{AnalysisResult, Verdict};
    /// use legalis::history::HistoryManager;
    /// use legalis::storage::MemoryStore;
    ///
    /// let history = HistoryManager::new(Arc::new(MemoryStore::new()));
    /// let result = AnalysisResult {
    ///     id: None,
    ///     timestamp: None,
    ///     summary: "Fine".to_string(),
    ///     overall_risk_score: 5,
    ///     verdict: Verdict::Safe,
    ///     specific_risks: None,
    ///     clauses: vec![],
    ///     sources: None,
    ///     input: None,
    /// };
    /// let saved = history.save_to_history(result);
    /// assert_eq!(saved.len(), 1);
    /// assert!(saved[0].id.is_some());
    /// ```
    pub fn save_to_history(&self, mut result: AnalysisResult) -> Vec<AnalysisResult> {
        if result.id.is_none() {
            result.id = Some(Uuid::new_v4().to_string());
        }
        if result.timestamp.is_none() {
            result.timestamp = Some(Utc::now().timestamp_millis());
        }

        let mut updated = Vec::with_capacity(self.limit);
        updated.push(result);
        updated.extend(self.get_history());
        updated.truncate(self.limit);

        if let Err(e) = write_json(self.store.as_ref(), keys::HISTORY, &updated) {
            tracing::warn!("Failed to save history: {}", e);
        }

        updated
    }

    /// Remove every stored analysis
    pub fn clear_history(&self) {
        if let Err(e) = self.store.remove(keys::HISTORY) {
            tracing::warn!("Failed to clear history: {}", e);
        }
    }

    /// Find an analysis by full id or id prefix
    ///
    /// Prefixes shorter than [`MIN_ID_PREFIX`] never match.
    pub fn find(&self, id: &str) -> Option<AnalysisResult> {
        let id = id.trim();
        if id.len() < MIN_ID_PREFIX {
            return None;
        }
        self.get_history()
            .into_iter()
            .find(|item| item.id.as_deref().is_some_and(|item_id| item_id.starts_with(id)))
    }
}
