// ABOUTME: Explicit engine context constructed once at startup and passed by reference
// ABOUTME: Replaces any global accessor; holds configuration, collaborators, and pipelines
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Engine context
//!
//! One [`EngineContext`] is built at process start and torn down at
//! shutdown. It owns the server-wide configuration, the collaborator
//! handles, and the per-endpoint pipelines; request processing only ever
//! reads it. There is no implicit global state anywhere in the engine.

use crate::cache::{InMemoryStateCache, StateCache};
use crate::constants::oauth::ClientSecretAuthMethod;
use crate::constants::{cache_keys, DEFAULT_STATE_TTL_SECS};
use crate::errors::{EngineError, EngineResult};
use crate::oidc::KeySource;
use crate::pipeline::Pipeline;
use crate::scopes::ScopeRegistry;
use crate::session::{SessionManager, UserInfo};
use crate::state::StateManager;
use crate::upstream::UpstreamClient;
use crate::urls::UrlBuilder;
use std::sync::Arc;
use std::time::Duration;

/// Server-wide engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Client auth methods to advertise; empty or containing `All`
    /// advertises the full set
    pub client_secret_auth_methods: Vec<ClientSecretAuthMethod>,
    /// TTL applied to issued state nonces
    pub state_ttl: Duration,
    /// Namespace prefix for state cache keys
    pub state_cache_prefix: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            client_secret_auth_methods: Vec::new(),
            state_ttl: Duration::from_secs(DEFAULT_STATE_TTL_SECS),
            state_cache_prefix: cache_keys::STATE.to_owned(),
        }
    }
}

/// One pipeline per protocol endpoint kind, composed at configuration time
#[derive(Clone, Default)]
pub struct EndpointPipelines {
    /// Wraps the authorization endpoint
    pub authorize: Pipeline<()>,
    /// Wraps the token endpoint
    pub token: Pipeline<()>,
    /// Wraps the userinfo endpoint
    pub userinfo: Pipeline<()>,
    /// Wraps the JWKS endpoint
    pub jwks: Pipeline<()>,
    /// Wraps the logout endpoint, carrying the user as payload
    pub logout: Pipeline<UserInfo>,
}

/// Shared, read-only context for all protocol endpoints
#[derive(Clone)]
pub struct EngineContext {
    config: EngineConfig,
    state: StateManager,
    urls: Arc<dyn UrlBuilder>,
    keys: Arc<dyn KeySource>,
    upstream: Arc<dyn UpstreamClient>,
    sessions: Arc<dyn SessionManager>,
    scopes: ScopeRegistry,
    pipelines: EndpointPipelines,
}

impl EngineContext {
    /// Start building a context
    #[must_use]
    pub fn builder() -> EngineContextBuilder {
        EngineContextBuilder::default()
    }

    /// Server-wide configuration
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// State nonce manager bound to the configured cache
    #[must_use]
    pub fn state(&self) -> &StateManager {
        &self.state
    }

    /// URL-building collaborator
    #[must_use]
    pub fn urls(&self) -> &dyn UrlBuilder {
        self.urls.as_ref()
    }

    /// Identity key-service collaborator
    #[must_use]
    pub fn keys(&self) -> &dyn KeySource {
        self.keys.as_ref()
    }

    /// Upstream HTTP collaborator
    #[must_use]
    pub fn upstream(&self) -> &dyn UpstreamClient {
        self.upstream.as_ref()
    }

    /// Host session collaborator
    #[must_use]
    pub fn sessions(&self) -> &dyn SessionManager {
        self.sessions.as_ref()
    }

    /// Scope registry
    #[must_use]
    pub fn scopes(&self) -> &ScopeRegistry {
        &self.scopes
    }

    /// Per-endpoint pipelines
    #[must_use]
    pub fn pipelines(&self) -> &EndpointPipelines {
        &self.pipelines
    }
}

/// Builder assembling an [`EngineContext`] at startup
#[derive(Default)]
pub struct EngineContextBuilder {
    config: Option<EngineConfig>,
    cache: Option<Arc<dyn StateCache>>,
    urls: Option<Arc<dyn UrlBuilder>>,
    keys: Option<Arc<dyn KeySource>>,
    upstream: Option<Arc<dyn UpstreamClient>>,
    sessions: Option<Arc<dyn SessionManager>>,
    scopes: Option<ScopeRegistry>,
    pipelines: Option<EndpointPipelines>,
}

impl EngineContextBuilder {
    /// Server-wide configuration; defaults to [`EngineConfig::default`]
    #[must_use]
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// State cache backend; defaults to the in-memory cache
    #[must_use]
    pub fn cache(mut self, cache: Arc<dyn StateCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// URL-building collaborator (required)
    #[must_use]
    pub fn urls(mut self, urls: Arc<dyn UrlBuilder>) -> Self {
        self.urls = Some(urls);
        self
    }

    /// Identity key-service collaborator (required)
    #[must_use]
    pub fn keys(mut self, keys: Arc<dyn KeySource>) -> Self {
        self.keys = Some(keys);
        self
    }

    /// Upstream HTTP collaborator; defaults to the reqwest client when
    /// the `upstream-reqwest` feature is enabled
    #[must_use]
    pub fn upstream(mut self, upstream: Arc<dyn UpstreamClient>) -> Self {
        self.upstream = Some(upstream);
        self
    }

    /// Host session collaborator (required)
    #[must_use]
    pub fn sessions(mut self, sessions: Arc<dyn SessionManager>) -> Self {
        self.sessions = Some(sessions);
        self
    }

    /// Scope registry; defaults to the standard OIDC scopes
    #[must_use]
    pub fn scopes(mut self, scopes: ScopeRegistry) -> Self {
        self.scopes = Some(scopes);
        self
    }

    /// Per-endpoint pipelines; default pipelines are empty
    #[must_use]
    pub fn pipelines(mut self, pipelines: EndpointPipelines) -> Self {
        self.pipelines = Some(pipelines);
        self
    }

    /// Assemble the context.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfiguration`] when a required
    /// collaborator was not supplied.
    pub fn build(self) -> EngineResult<EngineContext> {
        let config = self.config.unwrap_or_default();
        let cache = self
            .cache
            .unwrap_or_else(|| Arc::new(InMemoryStateCache::default()));
        let state = StateManager::new(cache, config.state_cache_prefix.clone());

        let urls = self.urls.ok_or_else(|| missing("a UrlBuilder"))?;
        let keys = self.keys.ok_or_else(|| missing("a KeySource"))?;
        let sessions = self.sessions.ok_or_else(|| missing("a SessionManager"))?;
        let upstream = match self.upstream {
            Some(upstream) => upstream,
            #[cfg(feature = "upstream-reqwest")]
            None => Arc::new(crate::upstream::HttpUpstreamClient::new()),
            #[cfg(not(feature = "upstream-reqwest"))]
            None => return Err(missing("an UpstreamClient")),
        };

        Ok(EngineContext {
            config,
            state,
            urls,
            keys,
            upstream,
            sessions,
            scopes: self.scopes.unwrap_or_default(),
            pipelines: self.pipelines.unwrap_or_default(),
        })
    }
}

fn missing(what: &str) -> EngineError {
    EngineError::InvalidConfiguration(format!("engine context requires {what}"))
}
