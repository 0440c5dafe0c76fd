// ABOUTME: Enumerated OAuth2/OIDC protocol vocabulary with RFC wire names
// ABOUTME: Grant types, response types, PKCE methods, and client-secret auth methods
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use serde::{Deserialize, Serialize};
use std::fmt;

/// OAuth2 grant types (RFC 6749 §4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
    /// Authorization code grant (§4.1)
    AuthorizationCode,
    /// Implicit grant (§4.2)
    Implicit,
    /// Resource owner password credentials grant (§4.3)
    Password,
    /// Client credentials grant (§4.4)
    ClientCredentials,
}

impl GrantType {
    /// Wire name used in requests and discovery metadata
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AuthorizationCode => "authorization_code",
            Self::Implicit => "implicit",
            Self::Password => "password",
            Self::ClientCredentials => "client_credentials",
        }
    }

    /// Ordered list of supported grant-type wire names for advertisement
    #[must_use]
    pub fn all() -> Vec<&'static str> {
        vec![
            Self::AuthorizationCode.as_str(),
            Self::Implicit.as_str(),
            Self::Password.as_str(),
            Self::ClientCredentials.as_str(),
        ]
    }
}

impl fmt::Display for GrantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// OAuth2 response types selecting the front-channel flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    /// Authorization code flow
    Code,
    /// Implicit flow
    Token,
    /// No front channel; password or client-credentials grant
    None,
}

impl ResponseType {
    /// Wire name used in requests and discovery metadata
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Token => "token",
            Self::None => "none",
        }
    }

    /// Ordered list of supported response-type wire names for advertisement
    #[must_use]
    pub fn all() -> Vec<&'static str> {
        vec![
            Self::Code.as_str(),
            Self::Token.as_str(),
            Self::None.as_str(),
        ]
    }
}

impl fmt::Display for ResponseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// PKCE code challenge methods (RFC 7636 §4.2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PkceCodeChallengeMethod {
    /// Challenge equals the verifier
    #[serde(rename = "PLAIN")]
    Plain,
    /// Challenge is the base64url-encoded SHA-256 of the verifier
    #[serde(rename = "S256")]
    S256,
}

impl PkceCodeChallengeMethod {
    /// Wire name used in authorization requests and discovery metadata
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "PLAIN",
            Self::S256 => "S256",
        }
    }

    /// Ordered list of supported challenge-method wire names
    #[must_use]
    pub fn all() -> Vec<&'static str> {
        vec![Self::Plain.as_str(), Self::S256.as_str()]
    }
}

impl fmt::Display for PkceCodeChallengeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client authentication methods at the token endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientSecretAuthMethod {
    /// HTTP Basic authentication with client id and secret
    ClientSecretBasic,
    /// Credentials carried in the request body
    ClientSecretPost,
    /// Public client, no secret
    None,
    /// Sentinel meaning "advertise every concrete method"
    All,
}

impl ClientSecretAuthMethod {
    /// Wire name; the `All` sentinel has no wire representation and maps
    /// to the full concrete set instead
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ClientSecretBasic => "client_secret_basic",
            Self::ClientSecretPost => "client_secret_post",
            Self::None => "none",
            Self::All => "all",
        }
    }

    /// Every concrete method wire name, sentinel excluded
    #[must_use]
    pub fn all_methods() -> Vec<&'static str> {
        vec![
            Self::ClientSecretBasic.as_str(),
            Self::ClientSecretPost.as_str(),
            Self::None.as_str(),
        ]
    }
}

impl fmt::Display for ClientSecretAuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
