//! Keyword storage.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::error::StoreError;
use crate::keywords::KeywordLists;
use crate::stats::RunStats;

/// Keyword storage trait.
#[async_trait]
pub trait KeywordStore: Send + Sync {
    /// Load both keyword lists.
    async fn load_keywords(&self) -> Result<KeywordLists, StoreError>;

    /// Replace both keyword lists. Lists are processed before saving.
    async fn save_keywords(&self, lists: &KeywordLists) -> Result<(), StoreError>;

    /// Load the last-run statistics.
    async fn load_stats(&self) -> Result<RunStats, StoreError>;

    /// Replace the last-run statistics.
    async fn record_run(&self, stats: &RunStats) -> Result<(), StoreError>;
}

/// In-memory keyword store for testing.
pub struct MemoryKeywordStore {
    keywords: RwLock<KeywordLists>,
    stats: RwLock<RunStats>,
}

impl MemoryKeywordStore {
    /// Create a new memory store.
    pub fn new() -> Self {
        Self {
            keywords: RwLock::new(KeywordLists::default()),
            stats: RwLock::new(RunStats::default()),
        }
    }
}

impl Default for MemoryKeywordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeywordStore for MemoryKeywordStore {
    async fn load_keywords(&self) -> Result<KeywordLists, StoreError> {
        Ok(self.keywords.read().await.clone())
    }

    async fn save_keywords(&self, lists: &KeywordLists) -> Result<(), StoreError> {
        *self.keywords.write().await = lists.normalized();
        Ok(())
    }

    async fn load_stats(&self) -> Result<RunStats, StoreError> {
        Ok(self.stats.read().await.clone())
    }

    async fn record_run(&self, stats: &RunStats) -> Result<(), StoreError> {
        *self.stats.write().await = stats.clone();
        Ok(())
    }
}

/// On-disk layout of the store file.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreDocument {
    #[serde(default)]
    packages: Vec<String>,
    #[serde(default)]
    vods: Vec<String>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    last_run: Option<DateTime<Utc>>,
    #[serde(default)]
    checkboxes_found: Option<usize>,
    #[serde(default)]
    matches_selected: Option<usize>,
}

impl StoreDocument {
    fn keywords(&self) -> KeywordLists {
        KeywordLists {
            packages: self.packages.clone(),
            vods: self.vods.clone(),
        }
    }

    fn stats(&self) -> RunStats {
        RunStats {
            last_run: self.last_run,
            checkboxes_found: self.checkboxes_found,
            matches_selected: self.matches_selected,
        }
    }
}

/// Single JSON file holding keyword lists and statistics.
///
/// ```text
/// {
///   "packages": ["..."],
///   "vods": ["..."],
///   "lastRun": 1700000000000,
///   "checkboxesFound": 12,
///   "matchesSelected": 3
/// }
/// ```
///
/// A missing file reads as empty lists and unset statistics. Writes replace
/// the file through a temporary sibling.
pub struct FileKeywordStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileKeywordStore {
    /// Create a store backed by the file at `path`. Nothing is read or
    /// created until first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<StoreDocument, StoreError> {
        if !fs::try_exists(&self.path).await? {
            debug!("Store file {:?} does not exist, using empty store", self.path);
            return Ok(StoreDocument::default());
        }
        let content = fs::read_to_string(&self.path).await?;
        if content.trim().is_empty() {
            return Ok(StoreDocument::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    async fn write_document(&self, document: &StoreDocument) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(document)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content).await?;
        fs::rename(&tmp_path, &self.path).await?;
        debug!("Store written to {:?}", self.path);
        Ok(())
    }

    async fn update<F>(&self, apply: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut StoreDocument) + Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut document = self.read_document().await?;
        apply(&mut document);
        self.write_document(&document).await
    }
}

#[async_trait]
impl KeywordStore for FileKeywordStore {
    async fn load_keywords(&self) -> Result<KeywordLists, StoreError> {
        Ok(self.read_document().await?.keywords())
    }

    async fn save_keywords(&self, lists: &KeywordLists) -> Result<(), StoreError> {
        let lists = lists.normalized();
        self.update(move |document| {
            document.packages = lists.packages;
            document.vods = lists.vods;
        })
        .await
    }

    async fn load_stats(&self) -> Result<RunStats, StoreError> {
        Ok(self.read_document().await?.stats())
    }

    async fn record_run(&self, stats: &RunStats) -> Result<(), StoreError> {
        let stats = stats.clone();
        self.update(move |document| {
            document.last_run = stats.last_run;
            document.checkboxes_found = stats.checkboxes_found;
            document.matches_selected = stats.matches_selected;
        })
        .await
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
