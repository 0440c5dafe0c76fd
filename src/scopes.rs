// ABOUTME: Scope registry feeding discovery advertisement
// ABOUTME: Ships the standard OIDC scopes; hosts may register their own
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use serde::{Deserialize, Serialize};

/// A named scope with its human-readable description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    /// Wire code requested by clients
    pub code: String,
    /// Description shown on consent screens
    pub description: String,
}

impl Scope {
    /// Create a scope
    #[must_use]
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
        }
    }
}

/// Registry of scopes the provider advertises and accepts
#[derive(Debug, Clone)]
pub struct ScopeRegistry {
    scopes: Vec<Scope>,
}

impl Default for ScopeRegistry {
    /// The standard OIDC scope set
    fn default() -> Self {
        Self {
            scopes: vec![
                Scope::new("openid", "OpenID Connect authentication"),
                Scope::new("profile", "Basic profile claims"),
                Scope::new("email", "Email address and verification status"),
                Scope::new("phone", "Phone number and verification status"),
                Scope::new("address", "Postal address"),
            ],
        }
    }
}

impl ScopeRegistry {
    /// Empty registry for hosts that define every scope themselves
    #[must_use]
    pub fn empty() -> Self {
        Self { scopes: Vec::new() }
    }

    /// Register a scope; a duplicate code replaces the earlier entry
    pub fn register(&mut self, scope: Scope) {
        if let Some(existing) = self.scopes.iter_mut().find(|s| s.code == scope.code) {
            *existing = scope;
        } else {
            self.scopes.push(scope);
        }
    }

    /// Ordered scope codes for `scopes_supported`
    #[must_use]
    pub fn codes(&self) -> Vec<String> {
        self.scopes.iter().map(|s| s.code.clone()).collect()
    }

    /// All registered scopes
    #[must_use]
    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_leads_with_openid() {
        let codes = ScopeRegistry::default().codes();
        assert_eq!(codes[0], "openid");
        assert!(codes.contains(&"profile".to_owned()));
    }

    #[test]
    fn test_register_replaces_duplicate_code() {
        let mut registry = ScopeRegistry::default();
        let before = registry.codes().len();
        registry.register(Scope::new("email", "Primary email"));
        assert_eq!(registry.codes().len(), before);

        registry.register(Scope::new("fitness:read", "Read fitness data"));
        assert_eq!(registry.codes().len(), before + 1);
    }
}
