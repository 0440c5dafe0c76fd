// ABOUTME: Typed error taxonomy for the protocol engine with HTTP status mapping
// ABOUTME: Every failure propagates synchronously as one of these variants, no retries
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! # Engine error taxonomy
//!
//! Five failure kinds cover the protocol surface:
//!
//! - [`EngineError::InvalidConfiguration`] — the grant/response legality
//!   matrix was violated; fatal at setup, the flow never starts.
//! - [`EngineError::IllegalState`] — CSRF state mismatch on a callback;
//!   fatal for the request, possible attack or expired session.
//! - [`EngineError::UpstreamProtocol`] — a provider returned an error or an
//!   empty response; surfaced with the provider context preserved.
//! - [`EngineError::PipelineBlocked`] — a pre-handle hook vetoed the
//!   request before the endpoint body ran.
//! - [`EngineError::InvalidJwks`] — malformed key-set material.
//!
//! The host transport translates a variant into an HTTP status and body via
//! [`EngineError::http_status`]. The engine itself never catches and
//! retries: no partial state is committed on failure.

use thiserror::Error;

/// Unified error type for the protocol engine
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration legality violated; the flow must not start
    #[error("invalid oauth configuration: {0}")]
    InvalidConfiguration(String),

    /// CSRF state mismatch or missing state binding
    #[error("illegal state: {0}")]
    IllegalState(String),

    /// Provider returned an error or an empty/invalid response
    #[error("upstream protocol error: {0}")]
    UpstreamProtocol(String),

    /// A pipeline pre-handle hook vetoed the request
    #[error("pipeline blocked the request: {0}")]
    PipelineBlocked(String),

    /// Key-set material is malformed or missing required fields
    #[error("invalid jwks material: {0}")]
    InvalidJwks(String),

    /// Collaborator failure that is none of the protocol kinds
    #[error("internal engine error: {0}")]
    Internal(String),
}

impl EngineError {
    /// HTTP status the host transport should translate this error into
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::IllegalState(_) => 400,
            Self::PipelineBlocked(_) => 403,
            Self::UpstreamProtocol(_) => 502,
            Self::InvalidConfiguration(_) | Self::InvalidJwks(_) | Self::Internal(_) => 500,
        }
    }

    /// Short machine-readable code for structured logging and error bodies
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfiguration(_) => "INVALID_CONFIGURATION",
            Self::IllegalState(_) => "ILLEGAL_STATE",
            Self::UpstreamProtocol(_) => "UPSTREAM_PROTOCOL_ERROR",
            Self::PipelineBlocked(_) => "PIPELINE_BLOCKED",
            Self::InvalidJwks(_) => "INVALID_JWKS",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(error: serde_json::Error) -> Self {
        Self::Internal(error.to_string())
    }
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
