// ABOUTME: Classifies inbound requests as protocol callbacks vs. initiation requests
// ABOUTME: Keyed off the configured response type and the presence of its marker parameter
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Callback classification
//!
//! Evaluated before any flow-specific processing so initiation and
//! callback requests never share a code path.

use crate::config::OAuthConfig;
use crate::constants::oauth::ResponseType;
use crate::constants::params;
use crate::pipeline::EndpointRequest;

/// Whether `request` is the callback leg of the configured flow.
///
/// For the `code` response type the marker is a non-empty `code`
/// parameter; for `token` it is a non-empty `access_token` parameter; any
/// other response type never has a callback leg.
#[must_use]
pub fn is_callback(request: &EndpointRequest, config: &OAuthConfig) -> bool {
    match config.response_type {
        ResponseType::Code => request.has_param(params::CODE),
        ResponseType::Token => request.has_param(params::ACCESS_TOKEN),
        ResponseType::None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::oauth::GrantType;

    fn config(response_type: ResponseType) -> OAuthConfig {
        OAuthConfig {
            response_type,
            grant_type: GrantType::AuthorizationCode,
            ..OAuthConfig::default()
        }
    }

    #[test]
    fn test_code_flow_requires_code_param() {
        let request = EndpointRequest::from_params([("code", "abc")]);
        assert!(is_callback(&request, &config(ResponseType::Code)));

        let empty = EndpointRequest::from_params([("code", "")]);
        assert!(!is_callback(&empty, &config(ResponseType::Code)));
    }

    #[test]
    fn test_token_flow_requires_access_token_param() {
        let request = EndpointRequest::from_params([("access_token", "tok")]);
        assert!(is_callback(&request, &config(ResponseType::Token)));
        assert!(!is_callback(
            &EndpointRequest::new(),
            &config(ResponseType::Token)
        ));
    }

    #[test]
    fn test_mismatched_marker_is_not_a_callback() {
        // Both markers present, but neither matches the configured type
        let request = EndpointRequest::from_params([("access_token", "tok")]);
        assert!(!is_callback(&request, &config(ResponseType::Code)));

        let request = EndpointRequest::from_params([("code", "abc")]);
        assert!(!is_callback(&request, &config(ResponseType::Token)));
    }

    #[test]
    fn test_none_response_type_never_a_callback() {
        let request = EndpointRequest::from_params([("code", "abc"), ("access_token", "tok")]);
        assert!(!is_callback(&request, &config(ResponseType::None)));
    }
}
