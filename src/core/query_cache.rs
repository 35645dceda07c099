//! Remote query cache.
//!
//! Caches JSON results of remote queries under a tag plus parameters, e.g.
//! `users` / `page=2`. The gateway only needs the two invalidation
//! operations of [`QueryCache`]; pages use the typed get/insert helpers.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use leptos::prelude::*;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Cache collaborator used by the auth gateway
pub trait QueryCache {
    /// Mark every cached result under `tag` as stale
    fn invalidate(&self, tag: &str);

    /// Drop every cached result
    fn clear(&self);
}

/// Cache key: a tag plus ordered parameters
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    tag: String,
    params: Vec<(String, String)>,
}

impl QueryKey {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            params: Vec::new(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((name.into(), value.to_string()));
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: serde_json::Value,
    stale: bool,
}

/// In-memory cache; clones share entries
#[derive(Clone)]
pub struct MemoryQueryCache {
    entries: Arc<RwLock<HashMap<QueryKey, CacheEntry>>>,
    generation: ArcRwSignal<u64>,
}

impl MemoryQueryCache {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            generation: ArcRwSignal::new(0),
        }
    }

    /// Fresh cached value under `key`, if any
    pub fn get<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let entry = entries.get(key).filter(|entry| !entry.stale)?;
        serde_json::from_value(entry.value.clone()).ok()
    }

    /// Store a fresh value under `key`
    pub fn insert<T: Serialize>(&self, key: QueryKey, value: &T) {
        match serde_json::to_value(value) {
            Ok(value) => {
                self.entries
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .insert(key, CacheEntry {
                        value,
                        stale: false,
                    });
            }
            Err(err) => tracing::warn!("Not caching {:?}: {}", key, err),
        }
    }

    /// Whether `key` holds a stale entry
    pub fn is_stale(&self, key: &QueryKey) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .is_some_and(|entry| entry.stale)
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bumped on every invalidation (reactive), so resources can refetch
    pub fn generation(&self) -> u64 {
        self.generation.get()
    }
}

impl Default for MemoryQueryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryCache for MemoryQueryCache {
    fn invalidate(&self, tag: &str) {
        let mut count = 0;
        {
            let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
            for (_, entry) in entries.iter_mut().filter(|(key, _)| key.tag == tag) {
                entry.stale = true;
                count += 1;
            }
        }
        tracing::debug!("Invalidated {} cached '{}' queries", count, tag);
        self.generation.update(|g| *g += 1);
    }

    fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        tracing::debug!("Query cache cleared");
        self.generation.update(|g| *g += 1);
    }
}
