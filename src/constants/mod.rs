// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Protocol vocabulary, parameter names, claim names, and cache namespaces
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Constants module
//!
//! Fixed, versionless protocol vocabulary consumed by every other
//! component. Pure data; no side effects.

pub mod oauth;

pub use oauth::*;

/// Request parameter names defined by RFC 6749
pub mod params {
    /// Authorization code callback parameter
    pub const CODE: &str = "code";
    /// Implicit-flow callback parameter
    pub const ACCESS_TOKEN: &str = "access_token";
    /// CSRF state parameter
    pub const STATE: &str = "state";
    /// Error code carried on a failed callback
    pub const ERROR: &str = "error";
    /// Human-readable error detail on a failed callback
    pub const ERROR_DESCRIPTION: &str = "error_description";
    /// PKCE challenge sent with the authorization request
    pub const CODE_CHALLENGE: &str = "code_challenge";
    /// PKCE challenge method sent with the authorization request
    pub const CODE_CHALLENGE_METHOD: &str = "code_challenge_method";
    /// PKCE verifier presented at the token endpoint
    pub const CODE_VERIFIER: &str = "code_verifier";
    /// Client identifier
    pub const CLIENT_ID: &str = "client_id";
    /// Client secret
    pub const CLIENT_SECRET: &str = "client_secret";
    /// Grant type selector at the token endpoint
    pub const GRANT_TYPE: &str = "grant_type";
    /// Response type selector at the authorization endpoint
    pub const RESPONSE_TYPE: &str = "response_type";
    /// Redirect target registered by the client
    pub const REDIRECT_URI: &str = "redirect_uri";
    /// Requested scope list, space-delimited
    pub const SCOPE: &str = "scope";
    /// Resource-owner username for the password grant
    pub const USERNAME: &str = "username";
    /// Resource-owner password for the password grant
    pub const PASSWORD: &str = "password";
}

/// Claim names advertised in discovery metadata
pub mod claims {
    /// Reserved claim: token issuer
    pub const ISSUER: &str = "iss";
    /// Reserved claim: subject identifier
    pub const SUBJECT: &str = "sub";
    /// Reserved claim: audience
    pub const AUDIENCE: &str = "aud";
    /// Reserved claim: expiration time
    pub const EXPIRATION: &str = "exp";
    /// Reserved claim: issued-at time
    pub const ISSUED_AT: &str = "iat";
    /// Replay-protection nonce bound into the ID token
    pub const NONCE: &str = "nonce";
    /// Time the end-user authentication occurred
    pub const AUTH_TIME: &str = "auth_time";
    /// End-user username claim
    pub const USERNAME: &str = "username";
}

/// Cache key namespaces for engine-owned entries
pub mod cache_keys {
    /// Prefix for CSRF state entries, completed by the client id
    pub const STATE: &str = "ids:oauth2:state:";
}

/// Default TTL in seconds for a stored state nonce
pub const DEFAULT_STATE_TTL_SECS: u64 = 180;
