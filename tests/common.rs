// ABOUTME: Shared test fixtures: mock collaborators and context builders
// ABOUTME: Used by the integration tests to assemble an engine without a host
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

#![allow(dead_code)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use ids_engine::cache::InMemoryStateCache;
use ids_engine::config::OAuthConfig;
use ids_engine::constants::oauth::{GrantType, ResponseType};
use ids_engine::context::{EndpointPipelines, EngineConfig, EngineContext};
use ids_engine::errors::{EngineError, EngineResult};
use ids_engine::oidc::KeySource;
use ids_engine::pipeline::EndpointRequest;
use ids_engine::response::ProviderResponse;
use ids_engine::session::{SessionManager, UserInfo};
use ids_engine::upstream::{EndpointMethod, UpstreamClient};
use ids_engine::urls::MountedUrls;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub const ISSUER: &str = "https://idp.example.com";

/// Key source returning a fixed JWKS document
pub struct FixedKeySource {
    pub json: String,
}

impl FixedKeySource {
    pub fn rsa_pair() -> Self {
        Self {
            json: r#"{
                "keys": [{
                    "kty": "RSA",
                    "use": "sig",
                    "kid": "test-key",
                    "alg": "RS256",
                    "n": "test-modulus",
                    "e": "AQAB",
                    "d": "test-private-exponent"
                }]
            }"#
            .to_owned(),
        }
    }
}

#[async_trait::async_trait]
impl KeySource for FixedKeySource {
    async fn jwks_json(&self, _identity: &str) -> EngineResult<String> {
        Ok(self.json.clone())
    }
}

/// Session manager recording which lifecycle calls were made
#[derive(Default)]
pub struct RecordingSessions {
    pub user: Mutex<Option<UserInfo>>,
    pub removed: AtomicBool,
    pub invalidated: AtomicBool,
}

impl RecordingSessions {
    pub fn with_user(user: UserInfo) -> Self {
        Self {
            user: Mutex::new(Some(user)),
            ..Self::default()
        }
    }

    pub fn was_invalidated(&self) -> bool {
        self.invalidated.load(Ordering::SeqCst)
    }

    pub fn was_removed(&self) -> bool {
        self.removed.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl SessionManager for RecordingSessions {
    async fn user(&self, _request: &EndpointRequest) -> EngineResult<Option<UserInfo>> {
        Ok(self.user.lock().map_err(poisoned)?.clone())
    }

    async fn remove_user(&self, _request: &EndpointRequest) -> EngineResult<()> {
        self.removed.store(true, Ordering::SeqCst);
        *self.user.lock().map_err(poisoned)? = None;
        Ok(())
    }

    async fn invalidate(&self, _request: &EndpointRequest) -> EngineResult<()> {
        self.invalidated.store(true, Ordering::SeqCst);
        Ok(())
    }
}

fn poisoned<T>(_: T) -> EngineError {
    EngineError::Internal("session mutex poisoned".to_owned())
}

/// Upstream client returning a canned JSON body and recording the call
pub struct CannedUpstream {
    pub body: String,
    pub last_call: Mutex<Option<(EndpointMethod, String, HashMap<String, String>)>>,
}

impl CannedUpstream {
    pub fn returning(body: &str) -> Self {
        Self {
            body: body.to_owned(),
            last_call: Mutex::new(None),
        }
    }
}

#[async_trait::async_trait]
impl UpstreamClient for CannedUpstream {
    async fn request(
        &self,
        method: EndpointMethod,
        url: &str,
        params: &HashMap<String, String>,
        _bearer: Option<&str>,
    ) -> EngineResult<ProviderResponse> {
        *self.last_call.lock().map_err(|_| {
            EngineError::Internal("upstream mutex poisoned".to_owned())
        })? = Some((method, url.to_owned(), params.clone()));
        ProviderResponse::from_json(&self.body)
    }
}

/// A context wired with in-memory collaborators and the given pipelines
pub fn test_context(
    pipelines: EndpointPipelines,
    sessions: Arc<RecordingSessions>,
    upstream: Arc<CannedUpstream>,
) -> Arc<EngineContext> {
    let ctx = EngineContext::builder()
        .config(EngineConfig::default())
        .cache(Arc::new(InMemoryStateCache::new(64)))
        .urls(Arc::new(MountedUrls::new(ISSUER)))
        .keys(Arc::new(FixedKeySource::rsa_pair()))
        .sessions(sessions)
        .upstream(upstream)
        .pipelines(pipelines)
        .build()
        .unwrap();
    Arc::new(ctx)
}

/// A valid authorization-code flow configuration
pub fn code_flow_config() -> OAuthConfig {
    OAuthConfig {
        token_url: format!("{ISSUER}/oauth/token"),
        authorization_url: format!("{ISSUER}/oauth/authorize"),
        userinfo_url: format!("{ISSUER}/oauth/userinfo"),
        client_id: "c1".to_owned(),
        client_secret: "s3cr3t".to_owned(),
        response_type: ResponseType::Code,
        grant_type: GrantType::AuthorizationCode,
        scopes: vec!["openid".to_owned(), "profile".to_owned()],
        ..OAuthConfig::default()
    }
}
