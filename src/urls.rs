// ABOUTME: URL-building collaborator resolving issuer and endpoint addresses
// ABOUTME: Default implementation derives every endpoint from a mounted base URL
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! URL building
//!
//! The engine never hardcodes where the host mounted it. Every absolute
//! URL surfaced to clients — discovery metadata endpoints and the
//! post-logout redirect — comes from this collaborator.

use crate::pipeline::EndpointRequest;

/// Host collaborator resolving absolute endpoint URLs for a request
pub trait UrlBuilder: Send + Sync {
    /// Issuer identifier
    fn issuer(&self, request: &EndpointRequest) -> String;
    /// Authorization endpoint
    fn authorize_url(&self, request: &EndpointRequest) -> String;
    /// Token endpoint
    fn token_url(&self, request: &EndpointRequest) -> String;
    /// Userinfo endpoint
    fn userinfo_url(&self, request: &EndpointRequest) -> String;
    /// Dynamic client registration endpoint
    fn registration_url(&self, request: &EndpointRequest) -> String;
    /// RP-initiated logout endpoint
    fn end_session_url(&self, request: &EndpointRequest) -> String;
    /// Session-management check iframe
    fn check_session_url(&self, request: &EndpointRequest) -> String;
    /// Public key-set endpoint
    fn jwks_url(&self, request: &EndpointRequest) -> String;
    /// Target the browser is sent to after logout completes
    fn logout_redirect_url(&self, request: &EndpointRequest) -> String;
}

/// Endpoint URLs derived from a fixed base the engine is mounted under
#[derive(Debug, Clone)]
pub struct MountedUrls {
    base: String,
}

impl MountedUrls {
    /// Create a builder rooted at `base`, trailing slash tolerated
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }

    fn join(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }
}

impl UrlBuilder for MountedUrls {
    fn issuer(&self, _request: &EndpointRequest) -> String {
        self.base.clone()
    }

    fn authorize_url(&self, _request: &EndpointRequest) -> String {
        self.join("/oauth/authorize")
    }

    fn token_url(&self, _request: &EndpointRequest) -> String {
        self.join("/oauth/token")
    }

    fn userinfo_url(&self, _request: &EndpointRequest) -> String {
        self.join("/oauth/userinfo")
    }

    fn registration_url(&self, _request: &EndpointRequest) -> String {
        self.join("/oauth/register")
    }

    fn end_session_url(&self, _request: &EndpointRequest) -> String {
        self.join("/oauth/logout")
    }

    fn check_session_url(&self, _request: &EndpointRequest) -> String {
        self.join("/oauth/check_session")
    }

    fn jwks_url(&self, _request: &EndpointRequest) -> String {
        self.join("/.well-known/jwks.json")
    }

    fn logout_redirect_url(&self, _request: &EndpointRequest) -> String {
        self.base.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_tolerated() {
        let urls = MountedUrls::new("https://idp.example.com/");
        let request = EndpointRequest::new();
        assert_eq!(urls.issuer(&request), "https://idp.example.com");
        assert_eq!(
            urls.authorize_url(&request),
            "https://idp.example.com/oauth/authorize"
        );
        assert_eq!(
            urls.jwks_url(&request),
            "https://idp.example.com/.well-known/jwks.json"
        );
    }
}
