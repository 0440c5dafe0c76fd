// ABOUTME: Upstream HTTP collaborator contract with a default reqwest-backed client
// ABOUTME: GET/POST with a parameter map, bodies parsed into ProviderResponse mappings
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Upstream HTTP collaborator
//!
//! Providers differ in which request method their endpoints accept, so
//! the method is threaded per call with GET as the default. Transport
//! stays behind the [`UpstreamClient`] trait; the reqwest-backed
//! [`HttpUpstreamClient`] is the stock implementation.

use crate::errors::EngineResult;
use crate::response::ProviderResponse;
use std::collections::HashMap;

/// Request method accepted by an upstream endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EndpointMethod {
    /// HTTP GET with query parameters
    #[default]
    Get,
    /// HTTP POST with a form body
    Post,
}

/// Host-pluggable HTTP transport for upstream endpoint calls
#[async_trait::async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Call `url` with `params`, optionally under `bearer`, and decode
    /// the response body into a key/value mapping
    ///
    /// # Errors
    ///
    /// Returns [`crate::errors::EngineError::UpstreamProtocol`] when the
    /// transport fails or the body cannot be decoded
    async fn request(
        &self,
        method: EndpointMethod,
        url: &str,
        params: &HashMap<String, String>,
        bearer: Option<&str>,
    ) -> EngineResult<ProviderResponse>;
}

#[cfg(feature = "upstream-reqwest")]
pub use http_client::HttpUpstreamClient;

#[cfg(feature = "upstream-reqwest")]
mod http_client {
    use super::{EndpointMethod, HashMap, ProviderResponse, UpstreamClient};
    use crate::errors::{EngineError, EngineResult};
    use reqwest::Client;

    /// Reqwest-backed upstream client
    #[derive(Debug, Clone, Default)]
    pub struct HttpUpstreamClient {
        client: Client,
    }

    impl HttpUpstreamClient {
        /// Create a client with reqwest defaults
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Wrap an existing reqwest client (shared pools, proxies)
        #[must_use]
        pub const fn with_client(client: Client) -> Self {
            Self { client }
        }
    }

    #[async_trait::async_trait]
    impl UpstreamClient for HttpUpstreamClient {
        async fn request(
            &self,
            method: EndpointMethod,
            url: &str,
            params: &HashMap<String, String>,
            bearer: Option<&str>,
        ) -> EngineResult<ProviderResponse> {
            let request = match method {
                EndpointMethod::Get => self.client.get(url).query(params),
                EndpointMethod::Post => self.client.post(url).form(params),
            };
            let request = match bearer {
                Some(token) => request.bearer_auth(token),
                None => request,
            };

            let body = request
                .send()
                .await
                .map_err(|e| EngineError::UpstreamProtocol(format!("request to {url} failed: {e}")))?
                .text()
                .await
                .map_err(|e| {
                    EngineError::UpstreamProtocol(format!("reading response from {url} failed: {e}"))
                })?;

            ProviderResponse::from_json(&body)
        }
    }
}
