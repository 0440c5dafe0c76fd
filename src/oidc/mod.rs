// ABOUTME: OpenID Connect surface: discovery metadata and JWKS exposure
// ABOUTME: Read-only over live configuration; recomputed per request, never cached
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! OIDC discovery and key-set exposure

/// Discovery metadata document and its generator
pub mod discovery;

/// JSON Web Key Set parsing and public-only filtering
pub mod jwks;

pub use discovery::{discovery_document, DiscoveryDocument};
pub use jwks::{jwks_public_keys, JsonWebKey, JsonWebKeySet, KeySource};
