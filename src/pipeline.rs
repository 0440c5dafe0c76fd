// ABOUTME: Typed pre/post interception pipeline wrapping each protocol endpoint
// ABOUTME: Ordered handler chain; any pre-handle veto aborts the request before the body runs
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Endpoint interception pipeline
//!
//! A pipeline is an ordered sequence of handlers composed at host
//! configuration time and immutable afterwards. Pre-handle hooks run
//! strictly in configured order and all must pass before the endpoint
//! body executes; after-handle hooks run in the same order once the body
//! has succeeded and must not short-circuit the response already
//! produced. Handlers see only the request view and the typed payload —
//! never engine internals.

use crate::errors::EngineResult;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Request-scoped view handed to pipeline handlers and endpoint bodies.
///
/// Carries the merged query/form parameters and the host session id; the
/// host transport builds one per request.
#[derive(Debug, Clone, Default)]
pub struct EndpointRequest {
    params: HashMap<String, String>,
    session_id: Option<String>,
}

impl EndpointRequest {
    /// Empty request view
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a request view from parameter pairs
    #[must_use]
    pub fn from_params<I, K, V>(params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            params: params
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            session_id: None,
        }
    }

    /// Attach the host session identifier
    #[must_use]
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Look up a query/form parameter
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Whether `name` is present with a non-empty value
    #[must_use]
    pub fn has_param(&self, name: &str) -> bool {
        self.param(name).is_some_and(|v| !v.is_empty())
    }

    /// The host session identifier, when the transport attached one
    #[must_use]
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }
}

/// A single interception step, parameterized by the endpoint payload type
#[async_trait::async_trait]
pub trait PipelineHandler<T: Send + Sync>: Send + Sync {
    /// Runs before the endpoint body; returning `false` aborts the request
    ///
    /// # Errors
    ///
    /// Returns an error when the handler itself fails; failure aborts the
    /// request the same way a veto does
    async fn pre_handle(&self, _request: &EndpointRequest, _payload: &T) -> EngineResult<bool> {
        Ok(true)
    }

    /// Runs after a successful endpoint body, for side effects only
    ///
    /// # Errors
    ///
    /// Returns an error when the side effect fails; the response already
    /// produced is not withdrawn
    async fn after_handle(&self, _request: &EndpointRequest, _payload: &T) -> EngineResult<()> {
        Ok(())
    }
}

/// Ordered handler chain for one endpoint kind.
///
/// Composed once at configuration time; cloning shares the handler list.
#[derive(Clone)]
pub struct Pipeline<T: Send + Sync> {
    handlers: Vec<Arc<dyn PipelineHandler<T>>>,
}

impl<T: Send + Sync> Default for Pipeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + Sync> Pipeline<T> {
    /// Empty pipeline; every request passes
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Append a handler, preserving configured order
    #[must_use]
    pub fn with(mut self, handler: Arc<dyn PipelineHandler<T>>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Number of composed handlers
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether the pipeline has no handlers
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Run every pre-handle hook in order; `false` as soon as one vetoes
    ///
    /// # Errors
    ///
    /// Propagates the first handler error
    pub async fn pre_handle(&self, request: &EndpointRequest, payload: &T) -> EngineResult<bool> {
        for (index, handler) in self.handlers.iter().enumerate() {
            if !handler.pre_handle(request, payload).await? {
                debug!(handler = index, "pipeline pre-handle vetoed the request");
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Run every after-handle hook in the same order as pre-handle
    ///
    /// # Errors
    ///
    /// Propagates the first handler error
    pub async fn after_handle(&self, request: &EndpointRequest, payload: &T) -> EngineResult<()> {
        for handler in &self.handlers {
            handler.after_handle(request, payload).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Recording {
        calls: Arc<AtomicUsize>,
        pass: bool,
    }

    #[async_trait::async_trait]
    impl PipelineHandler<()> for Recording {
        async fn pre_handle(&self, _request: &EndpointRequest, _payload: &()) -> EngineResult<bool> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.pass)
        }
    }

    #[tokio::test]
    async fn test_veto_stops_remaining_handlers() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let pipeline = Pipeline::new()
            .with(Arc::new(Recording {
                calls: first.clone(),
                pass: false,
            }))
            .with(Arc::new(Recording {
                calls: second.clone(),
                pass: true,
            }));

        let passed = pipeline
            .pre_handle(&EndpointRequest::new(), &())
            .await
            .unwrap();
        assert!(!passed);
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_pipeline_passes() {
        let pipeline: Pipeline<()> = Pipeline::new();
        assert!(pipeline
            .pre_handle(&EndpointRequest::new(), &())
            .await
            .unwrap());
    }
}
