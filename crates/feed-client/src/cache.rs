//! Response cache
//!
//! A string-keyed TTL map. Entries expire `ttl` after they were stored and
//! are evicted when read past that point. With a backing file the whole map
//! is loaded on open and rewritten after every change.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::ClientResult;

/// Default TTL for cached responses (5 minutes)
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    data: serde_json::Value,
    stored_at: DateTime<Utc>,
    ttl_ms: i64,
}

impl CacheEntry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        (now - self.stored_at).num_milliseconds() > self.ttl_ms
    }
}

/// TTL cache for API responses
#[derive(Debug)]
pub struct ResponseCache {
    entries: DashMap<String, CacheEntry>,
    default_ttl: Duration,
    file: Option<PathBuf>,
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseCache {
    /// In-memory cache with the default TTL
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            default_ttl: DEFAULT_TTL,
            file: None,
        }
    }

    /// Open a cache persisted to `path`, loading whatever unexpired entries it holds
    pub fn open(path: impl AsRef<Path>) -> ClientResult<Self> {
        let path = path.as_ref().to_path_buf();
        let cache = Self {
            file: Some(path.clone()),
            ..Self::new()
        };

        if path.exists() {
            let raw = std::fs::read(&path)?;
            if !raw.is_empty() {
                let stored: BTreeMap<String, CacheEntry> = serde_json::from_slice(&raw)?;
                let now = Utc::now();
                for (key, entry) in stored {
                    if !entry.is_expired(now) {
                        cache.entries.insert(key, entry);
                    }
                }
            }
            tracing::debug!(path = %path.display(), entries = cache.entries.len(), "Cache loaded");
        }

        Ok(cache)
    }

    /// Change the TTL used by [`set`](Self::set)
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Cached value for `key`, or `None` if missing, expired or of another shape
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let now = Utc::now();
        if self
            .entries
            .remove_if(key, |_, entry| entry.is_expired(now))
            .is_some()
        {
            tracing::debug!(key, "Cache entry expired");
            self.persist_or_warn();
            return None;
        }

        let data = self.entries.get(key)?.data.clone();
        serde_json::from_value(data).ok()
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> ClientResult<()> {
        self.set_with_ttl(key, value, self.default_ttl)
    }

    pub fn set_with_ttl<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) -> ClientResult<()> {
        let entry = CacheEntry {
            data: serde_json::to_value(value)?,
            stored_at: Utc::now(),
            ttl_ms: i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX),
        };
        self.entries.insert(key.to_string(), entry);
        self.persist()
    }

    pub fn delete(&self, key: &str) -> ClientResult<()> {
        if self.entries.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }

    pub fn clear(&self) -> ClientResult<()> {
        self.entries.clear();
        self.persist()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn persist(&self) -> ClientResult<()> {
        let Some(path) = &self.file else {
            return Ok(());
        };

        let snapshot: BTreeMap<String, CacheEntry> = self
            .entries
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        std::fs::write(path, serde_json::to_vec(&snapshot)?)?;
        Ok(())
    }

    fn persist_or_warn(&self) {
        if let Err(e) = self.persist() {
            tracing::warn!(error = %e, "Failed to write cache file");
        }
    }
}
