// ABOUTME: OIDC discovery metadata generator over live configuration
// ABOUTME: Wire field names are the contract external clients depend on; do not rename
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Discovery document
//!
//! Assembled from the URL builder, the protocol constants, the scope
//! registry, and the engine configuration on every request, so
//! configuration changes are reflected immediately. Caching, if desired,
//! is a host concern.

use crate::constants::claims;
use crate::constants::oauth::{
    ClientSecretAuthMethod, GrantType, PkceCodeChallengeMethod, ResponseType,
};
use crate::context::EngineContext;
use crate::pipeline::EndpointRequest;
use serde::Serialize;

/// The `.well-known/openid-configuration` metadata document
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryDocument {
    /// Issuer identifier
    pub issuer: String,
    /// Authorization endpoint URL
    pub authorization_endpoint: String,
    /// Token endpoint URL
    pub token_endpoint: String,
    /// Userinfo endpoint URL
    pub userinfo_endpoint: String,
    /// Dynamic client registration endpoint URL
    pub registration_endpoint: String,
    /// RP-initiated logout endpoint URL
    pub end_session_endpoint: String,
    /// Session-management check iframe URL
    pub check_session_iframe: String,
    /// Public key-set URL
    pub jwks_uri: String,
    /// Supported grant-type wire names
    pub grant_types_supported: Vec<&'static str>,
    /// Supported response modes
    pub response_modes_supported: Vec<&'static str>,
    /// Supported response-type wire names
    pub response_types_supported: Vec<&'static str>,
    /// Advertised scope codes
    pub scopes_supported: Vec<String>,
    /// Client authentication methods at the token endpoint
    pub token_endpoint_auth_methods_supported: Vec<&'static str>,
    /// Request-object signing algorithms
    pub request_object_signing_alg_values_supported: Vec<&'static str>,
    /// Userinfo signing algorithms
    pub userinfo_signing_alg_values_supported: Vec<&'static str>,
    /// Whether the `request` parameter is accepted
    pub request_parameter_supported: bool,
    /// Whether the `request_uri` parameter is accepted
    pub request_uri_parameter_supported: bool,
    /// Whether `request_uri` values must be pre-registered
    pub require_request_uri_registration: bool,
    /// Whether the `claims` parameter is accepted
    pub claims_parameter_supported: bool,
    /// ID-token signing algorithms
    pub id_token_signing_alg_values_supported: Vec<&'static str>,
    /// Supported subject identifier types
    pub subject_types_supported: Vec<&'static str>,
    /// Claims the provider can supply
    pub claims_supported: Vec<&'static str>,
    /// PKCE challenge methods
    pub code_challenge_methods_supported: Vec<&'static str>,
}

/// Build the discovery document for a request.
///
/// `token_endpoint_auth_methods_supported` advertises the full method set
/// when the configured list is empty or contains the `All` sentinel, and
/// the configured subset mapped to wire names otherwise.
#[must_use]
pub fn discovery_document(request: &EndpointRequest, ctx: &EngineContext) -> DiscoveryDocument {
    let urls = ctx.urls();

    let configured = &ctx.config().client_secret_auth_methods;
    let auth_methods = if configured.is_empty() || configured.contains(&ClientSecretAuthMethod::All)
    {
        ClientSecretAuthMethod::all_methods()
    } else {
        configured.iter().map(|m| m.as_str()).collect()
    };

    DiscoveryDocument {
        issuer: urls.issuer(request),
        authorization_endpoint: urls.authorize_url(request),
        token_endpoint: urls.token_url(request),
        userinfo_endpoint: urls.userinfo_url(request),
        registration_endpoint: urls.registration_url(request),
        end_session_endpoint: urls.end_session_url(request),
        check_session_iframe: urls.check_session_url(request),
        jwks_uri: urls.jwks_url(request),
        grant_types_supported: GrantType::all(),
        response_modes_supported: vec!["fragment", "query"],
        response_types_supported: ResponseType::all(),
        scopes_supported: ctx.scopes().codes(),
        token_endpoint_auth_methods_supported: auth_methods,
        request_object_signing_alg_values_supported: vec!["none", "RS256", "ES256"],
        userinfo_signing_alg_values_supported: vec!["RS256", "ES256"],
        request_parameter_supported: true,
        request_uri_parameter_supported: true,
        require_request_uri_registration: false,
        claims_parameter_supported: true,
        id_token_signing_alg_values_supported: vec!["RS256", "ES256"],
        subject_types_supported: vec!["public"],
        claims_supported: vec![
            claims::ISSUER,
            claims::SUBJECT,
            claims::AUDIENCE,
            claims::EXPIRATION,
            claims::ISSUED_AT,
            claims::NONCE,
            claims::AUTH_TIME,
            claims::USERNAME,
        ],
        code_challenge_methods_supported: PkceCodeChallengeMethod::all(),
    }
}
