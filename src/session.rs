// ABOUTME: Host session collaborator and the user payload carried through logout
// ABOUTME: The engine clears and invalidates sessions only through this contract
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use crate::errors::EngineResult;
use crate::pipeline::EndpointRequest;
use serde::{Deserialize, Serialize};

/// Authenticated end-user snapshot carried as the logout pipeline payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    /// Stable subject identifier
    pub id: String,
    /// Login name
    pub username: String,
}

impl UserInfo {
    /// Create a user snapshot
    #[must_use]
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
        }
    }
}

/// Host collaborator owning session storage and lifecycle.
///
/// The engine never touches session internals: logout resolves the
/// current user, removes the engine's user binding, and invalidates the
/// underlying session strictly through these three calls, in that order.
#[async_trait::async_trait]
pub trait SessionManager: Send + Sync {
    /// The user bound to the request's session, if any
    ///
    /// # Errors
    ///
    /// Returns an error if session storage cannot be read
    async fn user(&self, request: &EndpointRequest) -> EngineResult<Option<UserInfo>>;

    /// Remove the user binding from the request's session
    ///
    /// # Errors
    ///
    /// Returns an error if session storage cannot be written
    async fn remove_user(&self, request: &EndpointRequest) -> EngineResult<()>;

    /// Invalidate the underlying session itself
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be invalidated
    async fn invalidate(&self, request: &EndpointRequest) -> EngineResult<()>;
}
