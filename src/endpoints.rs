// ABOUTME: Protocol endpoint surface: authorize, token, userinfo, jwks, discovery, logout
// ABOUTME: Plain struct over shared collaborators; every endpoint runs inside its pipeline
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Protocol endpoints
//!
//! One [`ProtocolEndpoints`] value serves every endpoint kind; behavior
//! varies only by entry point, not by subtype. Each call resolves its
//! pipeline from the context, runs the pre-handle hooks (a veto aborts
//! with [`EngineError::PipelineBlocked`] before anything is committed),
//! executes the body against the engine components, then runs the
//! after-handle hooks in the same order.

use crate::callback::is_callback;
use crate::config::OAuthConfig;
use crate::constants::oauth::{GrantType, PkceCodeChallengeMethod, ResponseType};
use crate::constants::params;
use crate::context::EngineContext;
use crate::errors::{EngineError, EngineResult};
use crate::oidc::{discovery_document, jwks_public_keys, DiscoveryDocument};
use crate::pipeline::EndpointRequest;
use crate::pkce::{generate_code_challenge, generate_code_verifier};
use crate::response::{check_oauth_callback_request, check_oauth_response, ProviderResponse};
use crate::upstream::EndpointMethod;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

/// Response payload returned to the host transport
#[derive(Debug, Clone, Serialize)]
pub struct EndpointResponse<T> {
    /// The endpoint's single data field
    pub data: T,
}

impl<T> EndpointResponse<T> {
    /// Wrap a payload
    #[must_use]
    pub const fn new(data: T) -> Self {
        Self { data }
    }
}

/// Outcome of the authorization endpoint
#[derive(Debug, Clone, Serialize)]
pub enum AuthorizeOutcome {
    /// Initiation leg: send the user agent to the authorization URL
    Redirect {
        /// Fully assembled authorization URL
        url: String,
        /// State nonce bound in the cache for the callback
        state: String,
        /// PKCE verifier the client must hold until token exchange
        code_verifier: Option<String>,
    },
    /// Callback leg: parameters verified and classified
    Callback {
        /// Authorization code, code flow
        code: Option<String>,
        /// Access token, implicit flow
        access_token: Option<String>,
    },
}

/// Shared endpoint surface over the engine context
#[derive(Clone)]
pub struct ProtocolEndpoints {
    ctx: Arc<EngineContext>,
}

impl ProtocolEndpoints {
    /// Create the endpoint surface
    #[must_use]
    pub const fn new(ctx: Arc<EngineContext>) -> Self {
        Self { ctx }
    }

    /// The shared context
    #[must_use]
    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    /// Authorization endpoint.
    ///
    /// Validates the configuration, classifies the request, and either
    /// starts a flow (fresh state nonce, optional PKCE pair, assembled
    /// authorization URL) or verifies a callback (error parameters, then
    /// exact-match state).
    ///
    /// # Errors
    ///
    /// [`EngineError::PipelineBlocked`] on a pre-handle veto,
    /// [`EngineError::InvalidConfiguration`] on an illegal configuration,
    /// [`EngineError::UpstreamProtocol`] when the callback carries an
    /// error parameter, and [`EngineError::IllegalState`] on a state
    /// mismatch.
    pub async fn authorize(
        &self,
        request: &EndpointRequest,
        config: &OAuthConfig,
    ) -> EngineResult<EndpointResponse<AuthorizeOutcome>> {
        let pipeline = &self.ctx.pipelines().authorize;
        if !pipeline.pre_handle(request, &()).await? {
            return Err(blocked("authorize"));
        }

        config.validate()?;

        let outcome = if is_callback(request, config) {
            check_oauth_callback_request(
                request.param(params::ERROR),
                request.param(params::ERROR_DESCRIPTION),
                "authorization callback carried an error: ",
            )?;
            let state = request.param(params::STATE).unwrap_or_default();
            self.ctx
                .state()
                .check(state, &config.client_id, config.verify_state)
                .await?;
            debug!(client_id = %config.client_id, "authorization callback verified");
            AuthorizeOutcome::Callback {
                code: request.param(params::CODE).map(str::to_owned),
                access_token: request.param(params::ACCESS_TOKEN).map(str::to_owned),
            }
        } else {
            let state = self
                .ctx
                .state()
                .issue(&config.client_id, self.ctx.config().state_ttl)
                .await?;
            let code_verifier = if config.enable_pkce && config.response_type == ResponseType::Code
            {
                Some(generate_code_verifier()?)
            } else {
                None
            };
            let url = build_authorize_url(request, config, &state, code_verifier.as_deref())?;
            debug!(client_id = %config.client_id, "authorization flow initiated");
            AuthorizeOutcome::Redirect {
                url,
                state,
                code_verifier,
            }
        };

        pipeline.after_handle(request, &()).await?;
        Ok(EndpointResponse::new(outcome))
    }

    /// Token endpoint.
    ///
    /// Assembles the grant-specific parameter set, calls the upstream
    /// token URL, and normalizes the response.
    ///
    /// # Errors
    ///
    /// [`EngineError::PipelineBlocked`] on a pre-handle veto,
    /// [`EngineError::InvalidConfiguration`] on an illegal configuration
    /// or a grant that does not use the token endpoint, and
    /// [`EngineError::UpstreamProtocol`] on a failed exchange.
    pub async fn token(
        &self,
        request: &EndpointRequest,
        config: &OAuthConfig,
    ) -> EngineResult<EndpointResponse<ProviderResponse>> {
        let pipeline = &self.ctx.pipelines().token;
        if !pipeline.pre_handle(request, &()).await? {
            return Err(blocked("token"));
        }

        config.validate()?;
        let form = token_params(request, config)?;

        let response = self
            .ctx
            .upstream()
            .request(EndpointMethod::Post, &config.token_url, &form, None)
            .await?;
        check_oauth_response(Some(&response), "token request failed: ")?;
        info!(client_id = %config.client_id, grant = %config.grant_type, "token issued");

        pipeline.after_handle(request, &()).await?;
        Ok(EndpointResponse::new(response))
    }

    /// Userinfo endpoint.
    ///
    /// # Errors
    ///
    /// [`EngineError::PipelineBlocked`] on a pre-handle veto,
    /// [`EngineError::IllegalState`] when no access token accompanies the
    /// request, and [`EngineError::UpstreamProtocol`] on a failed or
    /// error-carrying response.
    pub async fn userinfo(
        &self,
        request: &EndpointRequest,
        config: &OAuthConfig,
    ) -> EngineResult<EndpointResponse<ProviderResponse>> {
        let pipeline = &self.ctx.pipelines().userinfo;
        if !pipeline.pre_handle(request, &()).await? {
            return Err(blocked("userinfo"));
        }

        let token = request
            .param(params::ACCESS_TOKEN)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                EngineError::IllegalState("userinfo request requires an access token".to_owned())
            })?;

        let response = self
            .ctx
            .upstream()
            .request(
                EndpointMethod::Get,
                &config.userinfo_url,
                &HashMap::new(),
                Some(token),
            )
            .await?;
        check_oauth_response(Some(&response), "userinfo request failed: ")?;

        pipeline.after_handle(request, &()).await?;
        Ok(EndpointResponse::new(response))
    }

    /// JWKS endpoint: the public key set for `identity`.
    ///
    /// # Errors
    ///
    /// [`EngineError::PipelineBlocked`] on a pre-handle veto and
    /// [`EngineError::InvalidJwks`] on malformed key material.
    pub async fn jwks(
        &self,
        request: &EndpointRequest,
        identity: &str,
    ) -> EngineResult<EndpointResponse<String>> {
        let pipeline = &self.ctx.pipelines().jwks;
        if !pipeline.pre_handle(request, &()).await? {
            return Err(blocked("jwks"));
        }

        let keys = jwks_public_keys(identity, self.ctx.keys()).await?;

        pipeline.after_handle(request, &()).await?;
        Ok(EndpointResponse::new(keys))
    }

    /// Discovery endpoint: the metadata document, rebuilt per request.
    #[must_use]
    pub fn discovery(&self, request: &EndpointRequest) -> DiscoveryDocument {
        discovery_document(request, &self.ctx)
    }

    /// Logout endpoint.
    ///
    /// Runs the logout pipeline with the current user as payload. A veto
    /// aborts before the session is touched; on success the user binding
    /// is removed, the session invalidated, and the post-logout redirect
    /// target returned.
    ///
    /// # Errors
    ///
    /// [`EngineError::PipelineBlocked`] on a pre-handle veto; session
    /// collaborator failures propagate unchanged.
    pub async fn logout(
        &self,
        request: &EndpointRequest,
    ) -> EngineResult<EndpointResponse<String>> {
        let pipeline = &self.ctx.pipelines().logout;
        let user = self
            .ctx
            .sessions()
            .user(request)
            .await?
            .unwrap_or_default();

        if !pipeline.pre_handle(request, &user).await? {
            return Err(EngineError::PipelineBlocked(
                "logout pipeline pre-handle returned false, the process is blocked".to_owned(),
            ));
        }

        self.ctx.sessions().remove_user(request).await?;
        self.ctx.sessions().invalidate(request).await?;
        info!(username = %user.username, "user session terminated");

        pipeline.after_handle(request, &user).await?;
        Ok(EndpointResponse::new(
            self.ctx.urls().logout_redirect_url(request),
        ))
    }
}

fn blocked(endpoint: &str) -> EngineError {
    EngineError::PipelineBlocked(format!(
        "{endpoint} pipeline pre-handle returned false, the process is blocked"
    ))
}

/// Assemble the front-channel authorization URL for an initiation request
fn build_authorize_url(
    request: &EndpointRequest,
    config: &OAuthConfig,
    state: &str,
    code_verifier: Option<&str>,
) -> EngineResult<String> {
    let mut url = Url::parse(&config.authorization_url).map_err(|e| {
        EngineError::InvalidConfiguration(format!(
            "authorizationUrl `{}` is not a valid URL: {e}",
            config.authorization_url
        ))
    })?;

    {
        let mut query = url.query_pairs_mut();
        query.append_pair(params::RESPONSE_TYPE, config.response_type.as_str());
        query.append_pair(params::CLIENT_ID, &config.client_id);
        query.append_pair(params::STATE, state);
        if let Some(redirect_uri) = request.param(params::REDIRECT_URI) {
            query.append_pair(params::REDIRECT_URI, redirect_uri);
        }
        if let Some(scope) = config.scope_param() {
            query.append_pair(params::SCOPE, &scope);
        }
        if let Some(verifier) = code_verifier {
            let method = PkceCodeChallengeMethod::S256;
            query.append_pair(
                params::CODE_CHALLENGE,
                &generate_code_challenge(method, verifier),
            );
            query.append_pair(params::CODE_CHALLENGE_METHOD, method.as_str());
        }
    }
    Ok(url.into())
}

/// Grant-specific parameter set for the token endpoint
fn token_params(
    request: &EndpointRequest,
    config: &OAuthConfig,
) -> EngineResult<HashMap<String, String>> {
    let mut form = HashMap::new();
    form.insert(
        params::GRANT_TYPE.to_owned(),
        config.grant_type.as_str().to_owned(),
    );
    form.insert(params::CLIENT_ID.to_owned(), config.client_id.clone());
    if !config.client_secret.is_empty() {
        form.insert(
            params::CLIENT_SECRET.to_owned(),
            config.client_secret.clone(),
        );
    }

    match config.grant_type {
        GrantType::AuthorizationCode => {
            let code = request
                .param(params::CODE)
                .filter(|c| !c.is_empty())
                .ok_or_else(|| {
                    EngineError::IllegalState(
                        "token exchange requires the authorization code from the callback"
                            .to_owned(),
                    )
                })?;
            form.insert(params::CODE.to_owned(), code.to_owned());
            if let Some(redirect_uri) = request.param(params::REDIRECT_URI) {
                form.insert(params::REDIRECT_URI.to_owned(), redirect_uri.to_owned());
            }
            if let Some(verifier) = request.param(params::CODE_VERIFIER) {
                form.insert(params::CODE_VERIFIER.to_owned(), verifier.to_owned());
            }
        }
        GrantType::Password => {
            form.insert(
                params::USERNAME.to_owned(),
                config.username.clone().unwrap_or_default(),
            );
            form.insert(
                params::PASSWORD.to_owned(),
                config.password.clone().unwrap_or_default(),
            );
            if let Some(scope) = config.scope_param() {
                form.insert(params::SCOPE.to_owned(), scope);
            }
        }
        GrantType::ClientCredentials => {
            if let Some(scope) = config.scope_param() {
                form.insert(params::SCOPE.to_owned(), scope);
            }
        }
        GrantType::Implicit => {
            return Err(EngineError::InvalidConfiguration(
                "the implicit flow does not use the token endpoint".to_owned(),
            ));
        }
    }
    Ok(form)
}
