// ABOUTME: Cache contract consumed by state validation, with pluggable backends
// ABOUTME: Keyed get/put/delete of opaque strings; TTL enforcement belongs to the backend
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! State cache contract
//!
//! The state cache is the only mutable shared resource the engine touches
//! directly. It is accessed by key with no engine-level locking;
//! correctness under concurrent authorize/callback races for the same
//! client relies on the backend's own atomicity. Last-write-wins on a
//! state key is acceptable because each authorize issues a fresh nonce
//! that overwrites the prior one.

pub mod memory;

pub use memory::InMemoryStateCache;

use crate::errors::EngineResult;
use std::time::Duration;

/// Pluggable key-value cache consumed by the CSRF/state validator.
///
/// Keys follow the `"<namespace><clientId>"` shape from
/// [`crate::constants::cache_keys`]. Expired entries must behave as
/// absent; the engine never inspects TTLs itself.
#[async_trait::async_trait]
pub trait StateCache: Send + Sync {
    /// Fetch the value stored under `key`, `None` when absent or expired
    ///
    /// # Errors
    ///
    /// Returns an error if the backend lookup fails
    async fn get(&self, key: &str) -> EngineResult<Option<String>>;

    /// Store `value` under `key` for at most `ttl`
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails
    async fn put(&self, key: &str, value: &str, ttl: Duration) -> EngineResult<()>;

    /// Remove the entry under `key`, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the backend delete fails
    async fn delete(&self, key: &str) -> EngineResult<()>;
}
