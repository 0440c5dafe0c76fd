// ABOUTME: CSRF state nonce issuing and validation against the shared cache
// ABOUTME: Binds an opaque nonce to a client identity; exact-match comparison only
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! CSRF/state validation
//!
//! An authorize request issues a fresh opaque nonce bound to the client id
//! in the shared cache; the callback must present the identical value.
//! Comparison is exact-match, never prefix or substring, and a matched
//! nonce is deleted so it cannot be replayed.

use crate::cache::StateCache;
use crate::errors::{EngineError, EngineResult};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use ring::rand::{SecureRandom, SystemRandom};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Entropy drawn for a state nonce
const NONCE_BYTES: usize = 32;

/// Issues and checks state nonces against the host-supplied cache
#[derive(Clone)]
pub struct StateManager {
    cache: Arc<dyn StateCache>,
    key_prefix: String,
}

impl StateManager {
    /// Create a manager over `cache`, deriving keys as `key_prefix + clientId`
    #[must_use]
    pub fn new(cache: Arc<dyn StateCache>, key_prefix: impl Into<String>) -> Self {
        Self {
            cache,
            key_prefix: key_prefix.into(),
        }
    }

    fn cache_key(&self, client_id: &str) -> String {
        format!("{}{client_id}", self.key_prefix)
    }

    /// Issue a fresh nonce for `client_id` and bind it in the cache.
    ///
    /// A second authorize for the same client overwrites the previous
    /// nonce; last-write-wins is the intended semantics.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Internal`] if the RNG or the cache write fails.
    pub async fn issue(&self, client_id: &str, ttl: Duration) -> EngineResult<String> {
        let rng = SystemRandom::new();
        let mut bytes = [0u8; NONCE_BYTES];
        rng.fill(&mut bytes)
            .map_err(|_| EngineError::Internal("system rng unavailable".to_owned()))?;
        let state = URL_SAFE_NO_PAD.encode(bytes);

        self.cache
            .put(&self.cache_key(client_id), &state, ttl)
            .await?;
        debug!(client_id, "issued state nonce");
        Ok(state)
    }

    /// Check a callback's state nonce against the cached binding.
    ///
    /// A no-op when `verify_state` is false (flows that do not round-trip
    /// a state value). Otherwise the supplied state must exactly equal
    /// the cached entry for the client; the entry is deleted on a match
    /// so a nonce is single-use.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::IllegalState`] when `state` or `client_id`
    /// is empty, when the cache holds no entry for the client, or when
    /// the cached value differs from the supplied state.
    pub async fn check(&self, state: &str, client_id: &str, verify_state: bool) -> EngineResult<()> {
        if !verify_state {
            return Ok(());
        }
        if state.is_empty() || client_id.is_empty() {
            return Err(EngineError::IllegalState(
                "state and clientId must be present".to_owned(),
            ));
        }

        let key = self.cache_key(client_id);
        let cached = self.cache.get(&key).await?;
        match cached {
            Some(cached) if cached == state => {
                self.cache.delete(&key).await?;
                debug!(client_id, "state nonce verified");
                Ok(())
            }
            Some(_) => {
                warn!(client_id, "state nonce mismatch on callback");
                Err(EngineError::IllegalState(
                    "state does not match the issued nonce".to_owned(),
                ))
            }
            None => {
                warn!(client_id, "no state nonce bound for client");
                Err(EngineError::IllegalState(
                    "no state nonce bound for client".to_owned(),
                ))
            }
        }
    }
}
