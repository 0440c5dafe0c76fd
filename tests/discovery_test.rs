// ABOUTME: Discovery metadata and JWKS endpoint tests over the wire-format contract
// ABOUTME: Field names and fixed enumerated values are bit-exact; public keys only
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{test_context, CannedUpstream, RecordingSessions};
use ids_engine::constants::oauth::ClientSecretAuthMethod;
use ids_engine::context::{EndpointPipelines, EngineConfig, EngineContext};
use ids_engine::endpoints::ProtocolEndpoints;
use ids_engine::pipeline::EndpointRequest;
use serde_json::{json, Value};
use std::sync::Arc;

fn endpoints() -> ProtocolEndpoints {
    let sessions = Arc::new(RecordingSessions::default());
    let upstream = Arc::new(CannedUpstream::returning("{}"));
    ProtocolEndpoints::new(test_context(
        EndpointPipelines::default(),
        sessions,
        upstream,
    ))
}

fn document() -> Value {
    let doc = endpoints().discovery(&EndpointRequest::new());
    serde_json::to_value(doc).unwrap()
}

#[test]
fn test_endpoint_urls_derive_from_the_mount() {
    let doc = document();
    assert_eq!(doc["issuer"], "https://idp.example.com");
    assert_eq!(
        doc["authorization_endpoint"],
        "https://idp.example.com/oauth/authorize"
    );
    assert_eq!(doc["token_endpoint"], "https://idp.example.com/oauth/token");
    assert_eq!(
        doc["userinfo_endpoint"],
        "https://idp.example.com/oauth/userinfo"
    );
    assert_eq!(
        doc["registration_endpoint"],
        "https://idp.example.com/oauth/register"
    );
    assert_eq!(
        doc["end_session_endpoint"],
        "https://idp.example.com/oauth/logout"
    );
    assert_eq!(
        doc["check_session_iframe"],
        "https://idp.example.com/oauth/check_session"
    );
    assert_eq!(
        doc["jwks_uri"],
        "https://idp.example.com/.well-known/jwks.json"
    );
}

#[test]
fn test_fixed_enumerations_are_verbatim() {
    let doc = document();
    assert_eq!(
        doc["code_challenge_methods_supported"],
        json!(["PLAIN", "S256"])
    );
    assert_eq!(doc["subject_types_supported"], json!(["public"]));
    assert_eq!(
        doc["grant_types_supported"],
        json!(["authorization_code", "implicit", "password", "client_credentials"])
    );
    assert_eq!(
        doc["response_types_supported"],
        json!(["code", "token", "none"])
    );
    assert_eq!(doc["response_modes_supported"], json!(["fragment", "query"]));
    assert_eq!(
        doc["id_token_signing_alg_values_supported"],
        json!(["RS256", "ES256"])
    );
    assert_eq!(
        doc["request_object_signing_alg_values_supported"],
        json!(["none", "RS256", "ES256"])
    );
}

#[test]
fn test_capability_flags_and_claims() {
    let doc = document();
    assert_eq!(doc["request_parameter_supported"], json!(true));
    assert_eq!(doc["request_uri_parameter_supported"], json!(true));
    assert_eq!(doc["require_request_uri_registration"], json!(false));
    assert_eq!(doc["claims_parameter_supported"], json!(true));
    assert_eq!(
        doc["claims_supported"],
        json!(["iss", "sub", "aud", "exp", "iat", "nonce", "auth_time", "username"])
    );
}

#[test]
fn test_scopes_supported_come_from_the_registry() {
    let doc = document();
    let scopes = doc["scopes_supported"].as_array().unwrap();
    assert_eq!(scopes[0], "openid");
    assert!(scopes.iter().any(|s| s == "email"));
}

#[test]
fn test_empty_auth_method_config_advertises_everything() {
    let doc = document();
    assert_eq!(
        doc["token_endpoint_auth_methods_supported"],
        json!(["client_secret_basic", "client_secret_post", "none"])
    );
}

fn endpoints_with_auth_methods(methods: Vec<ClientSecretAuthMethod>) -> ProtocolEndpoints {
    let ctx = EngineContext::builder()
        .config(EngineConfig {
            client_secret_auth_methods: methods,
            ..EngineConfig::default()
        })
        .urls(Arc::new(ids_engine::urls::MountedUrls::new(common::ISSUER)))
        .keys(Arc::new(common::FixedKeySource::rsa_pair()))
        .sessions(Arc::new(RecordingSessions::default()))
        .upstream(Arc::new(CannedUpstream::returning("{}")))
        .build()
        .unwrap();
    ProtocolEndpoints::new(Arc::new(ctx))
}

#[test]
fn test_all_sentinel_advertises_everything() {
    let endpoints = endpoints_with_auth_methods(vec![ClientSecretAuthMethod::All]);
    let doc = serde_json::to_value(endpoints.discovery(&EndpointRequest::new())).unwrap();
    assert_eq!(
        doc["token_endpoint_auth_methods_supported"],
        json!(["client_secret_basic", "client_secret_post", "none"])
    );
}

#[test]
fn test_configured_subset_is_advertised_as_wire_names() {
    let endpoints = endpoints_with_auth_methods(vec![ClientSecretAuthMethod::ClientSecretBasic]);
    let doc = serde_json::to_value(endpoints.discovery(&EndpointRequest::new())).unwrap();
    assert_eq!(
        doc["token_endpoint_auth_methods_supported"],
        json!(["client_secret_basic"])
    );
}

#[tokio::test]
async fn test_jwks_endpoint_strips_private_members() {
    let response = endpoints()
        .jwks(&EndpointRequest::new(), "default")
        .await
        .unwrap();
    let set: Value = serde_json::from_str(&response.data).unwrap();
    let key = &set["keys"][0];
    assert_eq!(key["kty"], "RSA");
    assert_eq!(key["n"], "test-modulus");
    assert_eq!(key["e"], "AQAB");
    assert!(key.get("d").is_none());
}
