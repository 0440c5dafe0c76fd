// ABOUTME: Main library entry point for the ids-engine OAuth2/OIDC protocol engine
// ABOUTME: Exposes the protocol components, collaborator traits, and endpoint surface
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

#![deny(unsafe_code)]

//! # ids-engine
//!
//! An embeddable OAuth2/OIDC identity-provider protocol engine. The crate
//! implements the authorization-server side of OAuth2 (authorization-code,
//! implicit, password and client-credentials grants) and the OpenID Connect
//! surface around it (discovery metadata, JWKS exposure, session logout),
//! designed to be mounted inside a host web application.
//!
//! The engine owns protocol correctness: configuration legality checks per
//! RFC 6749/7636, PKCE generation and verification, CSRF state binding
//! through a shared cache, callback classification, and normalization of
//! provider responses into typed errors. Everything environmental stays
//! pluggable — HTTP transport, session storage, key material and upstream
//! calls are collaborator traits supplied by the host.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use ids_engine::config::OAuthConfig;
//! use ids_engine::constants::oauth::{GrantType, ResponseType};
//! use ids_engine::errors::EngineResult;
//!
//! fn main() -> EngineResult<()> {
//!     let config = OAuthConfig {
//!         client_id: "c1".to_owned(),
//!         client_secret: "secret".to_owned(),
//!         token_url: "https://idp.example.com/oauth/token".to_owned(),
//!         authorization_url: "https://idp.example.com/oauth/authorize".to_owned(),
//!         userinfo_url: "https://idp.example.com/oauth/userinfo".to_owned(),
//!         response_type: ResponseType::Code,
//!         grant_type: GrantType::AuthorizationCode,
//!         ..OAuthConfig::default()
//!     };
//!
//!     // Reject illegal grant/response combinations before any flow starts
//!     config.validate()?;
//!     Ok(())
//! }
//! ```

/// State cache contract and the default in-memory implementation
pub mod cache;

/// Callback classification for inbound protocol requests
pub mod callback;

/// Per-flow OAuth configuration and the legality validator
pub mod config;

/// Protocol constants: grant types, response types, PKCE methods, claim names
pub mod constants;

/// Explicit engine context holding configuration and collaborators
pub mod context;

/// Protocol endpoint surface wrapped by the interception pipeline
pub mod endpoints;

/// Typed error taxonomy with HTTP status mapping
pub mod errors;

/// Structured logging setup built on tracing
pub mod logging;

/// OIDC discovery metadata and JWKS exposure
pub mod oidc;

/// Pre/post interception pipeline wrapping each endpoint
pub mod pipeline;

/// PKCE verifier and challenge generation (RFC 7636)
pub mod pkce;

/// Provider response normalization into typed outcomes
pub mod response;

/// Scope registry feeding discovery advertisement
pub mod scopes;

/// Host session collaborator and the user payload carried through logout
pub mod session;

/// CSRF state nonce issuing and validation
pub mod state;

/// Upstream HTTP collaborator contract and default reqwest client
pub mod upstream;

/// URL-building collaborator for issuer and endpoint addresses
pub mod urls;

pub use config::OAuthConfig;
pub use context::{EngineConfig, EngineContext};
pub use endpoints::ProtocolEndpoints;
pub use errors::{EngineError, EngineResult};
