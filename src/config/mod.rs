// ABOUTME: Per-flow OAuth configuration and the grant/response legality validator
// ABOUTME: Enforces the RFC 6749/7636 configuration matrix before any flow starts
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Per-client flow configuration
//!
//! An [`OAuthConfig`] is created once at client registration or
//! configuration load and is immutable afterwards; the engine only reads
//! it. [`OAuthConfig::validate`] is the legality gate: it runs once per
//! configuration and again whenever the host mutates its configuration
//! store, rejecting illegal grant/response combinations before any
//! network call is made.

use crate::constants::oauth::{GrantType, ResponseType};
use crate::errors::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};

/// Configuration for a single client / flow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthConfig {
    /// Token endpoint URL; required for every mode
    pub token_url: String,
    /// Authorization endpoint URL; required for front-channel flows
    pub authorization_url: String,
    /// Userinfo endpoint URL; required for front-channel flows
    pub userinfo_url: String,
    /// Client identifier
    pub client_id: String,
    /// Client secret; requirement depends on flow and PKCE
    pub client_secret: String,
    /// Front-channel response type
    pub response_type: ResponseType,
    /// Grant type presented at the token endpoint
    pub grant_type: GrantType,
    /// Whether PKCE (RFC 7636) is enabled for the code flow
    pub enable_pkce: bool,
    /// Whether callbacks must present a state nonce bound in the cache
    pub verify_state: bool,
    /// Resource-owner username, password grant only
    pub username: Option<String>,
    /// Resource-owner password, password grant only
    pub password: Option<String>,
    /// Ordered scope codes requested for this flow
    pub scopes: Vec<String>,
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            token_url: String::new(),
            authorization_url: String::new(),
            userinfo_url: String::new(),
            client_id: String::new(),
            client_secret: String::new(),
            response_type: ResponseType::None,
            grant_type: GrantType::ClientCredentials,
            enable_pkce: false,
            verify_state: true,
            username: None,
            password: None,
            scopes: Vec::new(),
        }
    }
}

impl OAuthConfig {
    /// Space-delimited scope string for wire parameters, `None` when empty
    #[must_use]
    pub fn scope_param(&self) -> Option<String> {
        if self.scopes.is_empty() {
            None
        } else {
            Some(self.scopes.join(" "))
        }
    }

    /// Enforce the configuration legality matrix, failing fast on the
    /// first violation.
    ///
    /// Checked in order:
    /// 1. `tokenUrl` is required unconditionally.
    /// 2. For the `code` and `token` response types:
    ///    - `code` requires the `authorization_code` grant, and a
    ///      `clientSecret` when PKCE is disabled;
    ///    - `token` requires a `clientSecret` unconditionally;
    ///    - `clientId`, `authorizationUrl` and `userinfoUrl` are required
    ///      in both sub-cases.
    /// 3. With no front channel, the grant must be `password` or
    ///    `client_credentials`; the password grant requires both
    ///    `username` and `password`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfiguration`] naming the missing
    /// field or the illegal grant/response pair.
    pub fn validate(&self) -> EngineResult<()> {
        if self.token_url.is_empty() {
            return Err(invalid("oauth strategy requires a tokenUrl"));
        }

        // Authorization code and implicit modes, RFC 6749 §4.1 / §4.2
        if self.response_type == ResponseType::Code || self.response_type == ResponseType::Token {
            if self.response_type == ResponseType::Code {
                if self.grant_type != GrantType::AuthorizationCode {
                    return Err(invalid(format!(
                        "invalid grantType `{}`: the code response type requires the `authorization_code` grant",
                        self.grant_type
                    )));
                }
                if !self.enable_pkce && self.client_secret.is_empty() {
                    return Err(invalid(
                        "oauth strategy requires a clientSecret when PKCE is not enabled",
                    ));
                }
            } else if self.client_secret.is_empty() {
                return Err(invalid("oauth strategy requires a clientSecret"));
            }

            if self.client_id.is_empty() {
                return Err(invalid("oauth strategy requires a clientId"));
            }
            if self.authorization_url.is_empty() {
                return Err(invalid("oauth strategy requires an authorizationUrl"));
            }
            if self.userinfo_url.is_empty() {
                return Err(invalid("oauth strategy requires a userinfoUrl"));
            }
            return Ok(());
        }

        // No front channel: password or client-credentials grant, RFC 6749 §4.3 / §4.4
        if self.grant_type != GrantType::Password && self.grant_type != GrantType::ClientCredentials
        {
            return Err(invalid(format!(
                "with the `none` response type a grant other than the authorization code must be used: `{}`",
                self.grant_type
            )));
        }
        if self.grant_type == GrantType::Password {
            let has_username = self.username.as_deref().is_some_and(|u| !u.is_empty());
            let has_password = self.password.as_deref().is_some_and(|p| !p.is_empty());
            if !(has_username && has_password) {
                return Err(invalid(
                    "oauth strategy requires username and password for the password grant",
                ));
            }
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> EngineError {
    EngineError::InvalidConfiguration(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code_flow_config() -> OAuthConfig {
        OAuthConfig {
            token_url: "https://idp.example.com/oauth/token".to_owned(),
            authorization_url: "https://idp.example.com/oauth/authorize".to_owned(),
            userinfo_url: "https://idp.example.com/oauth/userinfo".to_owned(),
            client_id: "c1".to_owned(),
            client_secret: "s3cr3t".to_owned(),
            response_type: ResponseType::Code,
            grant_type: GrantType::AuthorizationCode,
            ..OAuthConfig::default()
        }
    }

    #[test]
    fn test_token_url_required_for_every_mode() {
        let config = OAuthConfig {
            token_url: String::new(),
            ..code_flow_config()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("tokenUrl"));
    }

    #[test]
    fn test_code_flow_requires_authorization_code_grant() {
        let config = OAuthConfig {
            grant_type: GrantType::Implicit,
            ..code_flow_config()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("authorization_code"));
    }

    #[test]
    fn test_pkce_lifts_client_secret_requirement() {
        let mut config = OAuthConfig {
            client_secret: String::new(),
            ..code_flow_config()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("clientSecret"));

        config.enable_pkce = true;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_implicit_flow_requires_client_secret_unconditionally() {
        let config = OAuthConfig {
            response_type: ResponseType::Token,
            grant_type: GrantType::Implicit,
            client_secret: String::new(),
            enable_pkce: true,
            ..code_flow_config()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("clientSecret"));
    }
}
