// ABOUTME: In-memory state cache with LRU eviction and on-read TTL expiry
// ABOUTME: Default backend for hosts without an external cache, and for tests
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use super::StateCache;
use crate::errors::EngineResult;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// A stored nonce with its expiry instant
#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    expires_at: Instant,
}

impl CacheEntry {
    fn new(value: String, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// In-memory cache with LRU eviction.
///
/// Expired entries are dropped on read rather than by a background task:
/// state nonces are short-lived and low-volume, so the LRU capacity bound
/// keeps the store from growing past stale entries.
#[derive(Clone)]
pub struct InMemoryStateCache {
    store: Arc<RwLock<LruCache<String, CacheEntry>>>,
}

impl InMemoryStateCache {
    /// Capacity used when the requested capacity is zero
    const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(1024) {
        Some(n) => n,
        None => unreachable!(),
    };

    /// Create a cache bounded to `capacity` entries
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(Self::DEFAULT_CAPACITY);
        Self {
            store: Arc::new(RwLock::new(LruCache::new(capacity))),
        }
    }
}

impl Default for InMemoryStateCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY.get())
    }
}

#[async_trait::async_trait]
impl StateCache for InMemoryStateCache {
    async fn get(&self, key: &str) -> EngineResult<Option<String>> {
        let mut store = self.store.write().await;
        match store.get(key) {
            Some(entry) if !entry.is_expired() => return Ok(Some(entry.value.clone())),
            Some(_) => {}
            None => return Ok(None),
        }
        // Expired: drop the stale entry on the way out
        store.pop(key);
        Ok(None)
    }

    async fn put(&self, key: &str, value: &str, ttl: Duration) -> EngineResult<()> {
        let mut store = self.store.write().await;
        store.put(key.to_owned(), CacheEntry::new(value.to_owned(), ttl));
        Ok(())
    }

    async fn delete(&self, key: &str) -> EngineResult<()> {
        let mut store = self.store.write().await;
        store.pop(key);
        Ok(())
    }
}
