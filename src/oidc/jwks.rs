// ABOUTME: JSON Web Key Set parsing and public-only filtering for the JWKS endpoint
// ABOUTME: Private key members never leave the engine; malformed material is rejected
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! JWKS exposure
//!
//! The engine does not generate or hold keys; a [`KeySource`]
//! collaborator supplies raw key-set JSON per identity. The engine
//! parses it, strips every private member, and re-serializes only the
//! public material for the JWKS endpoint.

use crate::errors::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};

/// Host collaborator supplying raw key-set JSON for an identity
#[async_trait::async_trait]
pub trait KeySource: Send + Sync {
    /// Raw JWKS JSON for `identity`
    ///
    /// # Errors
    ///
    /// Returns an error if the key material cannot be obtained
    async fn jwks_json(&self, identity: &str) -> EngineResult<String>;
}

/// A JSON Web Key, public and private members
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonWebKey {
    /// Key type: `RSA`, `EC`, `oct`, ...
    pub kty: String,
    /// Public key use, `sig` or `enc`
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub key_use: Option<String>,
    /// Key identifier for rotation tracking
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
    /// Intended algorithm
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,
    /// RSA modulus
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<String>,
    /// RSA public exponent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub e: Option<String>,
    /// EC curve name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crv: Option<String>,
    /// EC x coordinate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    /// EC y coordinate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
    /// Private exponent (RSA) or private scalar (EC)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,
    /// RSA prime factor p
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p: Option<String>,
    /// RSA prime factor q
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// RSA CRT exponent dp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dp: Option<String>,
    /// RSA CRT exponent dq
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dq: Option<String>,
    /// RSA CRT coefficient qi
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qi: Option<String>,
    /// Symmetric key value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub k: Option<String>,
}

impl JsonWebKey {
    /// Whether the key carries publishable public material for its type
    #[must_use]
    pub fn has_public_material(&self) -> bool {
        match self.kty.as_str() {
            "RSA" => self.n.is_some() && self.e.is_some(),
            "EC" => self.crv.is_some() && self.x.is_some() && self.y.is_some(),
            _ => false,
        }
    }

    /// Copy of the key with every private member removed
    #[must_use]
    pub fn public_only(&self) -> Self {
        Self {
            d: None,
            p: None,
            q: None,
            dp: None,
            dq: None,
            qi: None,
            k: None,
            ..self.clone()
        }
    }
}

/// A set of JSON Web Keys
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonWebKeySet {
    /// The keys in publication order
    pub keys: Vec<JsonWebKey>,
}

impl JsonWebKeySet {
    /// Parse a raw JWKS JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidJwks`] when the JSON is malformed,
    /// is missing the `keys` array, or any key lacks its required public
    /// members for its `kty`.
    pub fn parse(json: &str) -> EngineResult<Self> {
        let set: Self = serde_json::from_str(json)
            .map_err(|e| EngineError::InvalidJwks(format!("malformed key set: {e}")))?;
        for key in &set.keys {
            if !key.has_public_material() {
                return Err(EngineError::InvalidJwks(format!(
                    "key of type `{}` is missing its public members",
                    key.kty
                )));
            }
        }
        Ok(set)
    }

    /// The set with every private member stripped from every key
    #[must_use]
    pub fn public_only(&self) -> Self {
        Self {
            keys: self.keys.iter().map(JsonWebKey::public_only).collect(),
        }
    }
}

/// Resolve the public key set for `identity` as serialized JSON.
///
/// Delegates to the [`KeySource`] collaborator for the raw material,
/// validates it, and re-serializes with only public members retained.
///
/// # Errors
///
/// Returns [`EngineError::InvalidJwks`] when the source JSON is
/// malformed or missing required key fields.
pub async fn jwks_public_keys(identity: &str, source: &dyn KeySource) -> EngineResult<String> {
    let raw = source.jwks_json(identity).await?;
    let set = JsonWebKeySet::parse(&raw)?;
    Ok(serde_json::to_string(&set.public_only())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSA_KEY_PAIR_SET: &str = r#"{
        "keys": [{
            "kty": "RSA",
            "use": "sig",
            "kid": "k1",
            "alg": "RS256",
            "n": "modulus",
            "e": "AQAB",
            "d": "private-exponent",
            "p": "prime-p",
            "q": "prime-q"
        }]
    }"#;

    #[test]
    fn test_private_members_are_stripped() {
        let set = JsonWebKeySet::parse(RSA_KEY_PAIR_SET).unwrap();
        let json = serde_json::to_string(&set.public_only()).unwrap();
        assert!(json.contains("\"n\":\"modulus\""));
        assert!(json.contains("\"e\":\"AQAB\""));
        assert!(!json.contains("private-exponent"));
        assert!(!json.contains("prime-p"));
    }

    #[test]
    fn test_malformed_json_is_invalid_jwks() {
        let err = JsonWebKeySet::parse("{not json").unwrap_err();
        assert!(matches!(err, EngineError::InvalidJwks(_)));
    }

    #[test]
    fn test_missing_public_members_rejected() {
        let err = JsonWebKeySet::parse(r#"{"keys":[{"kty":"RSA","d":"secret"}]}"#).unwrap_err();
        assert!(matches!(err, EngineError::InvalidJwks(_)));
    }

    #[test]
    fn test_missing_kty_rejected() {
        let err = JsonWebKeySet::parse(r#"{"keys":[{"n":"m","e":"AQAB"}]}"#).unwrap_err();
        assert!(matches!(err, EngineError::InvalidJwks(_)));
    }
}
