// ABOUTME: Provider response normalization into typed success/error outcomes
// ABOUTME: The single chokepoint through which all provider error signaling passes
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Response normalization
//!
//! Upstream and callback error signaling is interpreted here and nowhere
//! else: no endpoint reads raw `error` fields directly. Failures preserve
//! the caller's context, the upstream `error_description`, and the raw
//! response for diagnosability.

use crate::constants::params;
use crate::errors::{EngineError, EngineResult};
use serde_json::{Map, Value};
use std::fmt;

/// An ordered key/value mapping decoded from an endpoint response body.
///
/// Ephemeral: produced per call and never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderResponse(Map<String, Value>);

impl ProviderResponse {
    /// Decode a JSON object body
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UpstreamProtocol`] when the body is not a
    /// JSON object
    pub fn from_json(body: &str) -> EngineResult<Self> {
        let value: Value = serde_json::from_str(body).map_err(|e| {
            EngineError::UpstreamProtocol(format!("response body is not valid JSON: {e}"))
        })?;
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(EngineError::UpstreamProtocol(format!(
                "response body is not a JSON object: {other}"
            ))),
        }
    }

    /// Wrap an already-decoded JSON object
    #[must_use]
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Whether the response carries no fields at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A field rendered as a string, `None` when absent or null
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<String> {
        match self.0.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        }
    }

    /// The raw field value, when present
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The upstream `error` field, when present and non-empty
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.get_str(params::ERROR).filter(|e| !e.is_empty())
    }

    /// The upstream `error_description` field, when present
    #[must_use]
    pub fn error_description(&self) -> Option<String> {
        self.get_str(params::ERROR_DESCRIPTION)
    }
}

impl fmt::Display for ProviderResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::Object(self.0.clone()))
    }
}

impl From<Map<String, Value>> for ProviderResponse {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Fail when an upstream response is absent, empty, or carries an error.
///
/// The error message concatenates `context`, the upstream
/// `error_description`, and the raw response.
///
/// # Errors
///
/// Returns [`EngineError::UpstreamProtocol`] on an absent/empty response
/// or a non-empty `error` field.
pub fn check_oauth_response(
    response: Option<&ProviderResponse>,
    context: &str,
) -> EngineResult<()> {
    let Some(response) = response.filter(|r| !r.is_empty()) else {
        return Err(EngineError::UpstreamProtocol(context.to_owned()));
    };
    if response.error().is_some() {
        let description = response.error_description().unwrap_or_default();
        return Err(EngineError::UpstreamProtocol(format!(
            "{context}{description} {response}"
        )));
    }
    Ok(())
}

/// Fail when the callback request itself carries a non-empty error
/// parameter, independent of any upstream call.
///
/// # Errors
///
/// Returns [`EngineError::UpstreamProtocol`] carrying `context` and the
/// callback's `error_description`.
pub fn check_oauth_callback_request(
    error: Option<&str>,
    error_description: Option<&str>,
    context: &str,
) -> EngineResult<()> {
    if error.is_some_and(|e| !e.is_empty()) {
        let description = error_description.unwrap_or_default();
        return Err(EngineError::UpstreamProtocol(format!(
            "{context}{description}"
        )));
    }
    Ok(())
}
