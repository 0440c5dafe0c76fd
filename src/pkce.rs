// ABOUTME: PKCE verifier and challenge generation per RFC 7636
// ABOUTME: Verifier entropy from the system RNG, S256 challenge via SHA-256 + base64url
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Proof Key for Code Exchange (RFC 7636)
//!
//! Both halves of the computation live here so challenge derivation at
//! authorize time and re-derivation at token time are byte-identical. The
//! engine does not persist the verifier; holding it between the two
//! requests is the client's responsibility.

use crate::constants::oauth::PkceCodeChallengeMethod;
use crate::errors::{EngineError, EngineResult};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use ring::rand::{SecureRandom, SystemRandom};
use sha2::{Digest, Sha256};

/// Raw entropy drawn for a verifier; 50 bytes encode to 67 base64url
/// characters, inside the RFC 7636 §4.1 bounds of 43..=128
const VERIFIER_ENTROPY_BYTES: usize = 50;

/// Minimum verifier length after encoding (RFC 7636 §4.1)
pub const VERIFIER_MIN_LEN: usize = 43;

/// Maximum verifier length after encoding (RFC 7636 §4.1)
pub const VERIFIER_MAX_LEN: usize = 128;

/// Generate a high-entropy code verifier.
///
/// The result is drawn from the system RNG and base64url-encoded without
/// padding, so it uses only the unreserved character set
/// `[A-Za-z0-9-._~]` and lands inside the 43..=128 length bound. The
/// bound is asserted on the encoded output rather than assumed from the
/// encoding's expansion ratio.
///
/// # Errors
///
/// Returns [`EngineError::Internal`] if the system RNG fails, or if the
/// encoded verifier ever falls outside the RFC 7636 length bounds.
pub fn generate_code_verifier() -> EngineResult<String> {
    let rng = SystemRandom::new();
    let mut bytes = [0u8; VERIFIER_ENTROPY_BYTES];
    rng.fill(&mut bytes)
        .map_err(|_| EngineError::Internal("system rng unavailable".to_owned()))?;

    let verifier = URL_SAFE_NO_PAD.encode(bytes);
    if verifier.len() < VERIFIER_MIN_LEN || verifier.len() > VERIFIER_MAX_LEN {
        return Err(EngineError::Internal(format!(
            "code verifier length {} outside the 43..=128 bound",
            verifier.len()
        )));
    }
    Ok(verifier)
}

/// Derive the code challenge for a verifier.
///
/// `S256` computes `base64url(sha256(ascii(verifier)))` with no padding
/// (RFC 7636 §4.2); `PLAIN` returns the verifier unchanged. Pure and
/// deterministic, so the token-endpoint side re-derives exactly.
#[must_use]
pub fn generate_code_challenge(method: PkceCodeChallengeMethod, verifier: &str) -> String {
    match method {
        PkceCodeChallengeMethod::S256 => {
            let digest = Sha256::digest(verifier.as_bytes());
            URL_SAFE_NO_PAD.encode(digest)
        }
        PkceCodeChallengeMethod::Plain => verifier.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_unreserved(c: char) -> bool {
        c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~')
    }

    #[test]
    fn test_verifier_length_and_charset() {
        for _ in 0..64 {
            let verifier = generate_code_verifier().unwrap();
            assert!(verifier.len() >= VERIFIER_MIN_LEN);
            assert!(verifier.len() <= VERIFIER_MAX_LEN);
            assert!(verifier.chars().all(is_unreserved));
        }
    }

    #[test]
    fn test_verifiers_are_unique() {
        let a = generate_code_verifier().unwrap();
        let b = generate_code_verifier().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_plain_challenge_is_identity() {
        let verifier = "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk";
        assert_eq!(
            generate_code_challenge(PkceCodeChallengeMethod::Plain, verifier),
            verifier
        );
    }

    #[test]
    fn test_s256_challenge_is_deterministic() {
        let verifier = "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk";
        let first = generate_code_challenge(PkceCodeChallengeMethod::S256, verifier);
        let second = generate_code_challenge(PkceCodeChallengeMethod::S256, verifier);
        assert_eq!(first, second);
        assert_ne!(first, verifier);
    }

    #[test]
    fn test_s256_matches_rfc7636_appendix_b() {
        // Verifier and challenge from RFC 7636 appendix B
        let verifier = "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk";
        assert_eq!(
            generate_code_challenge(PkceCodeChallengeMethod::S256, verifier),
            "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM"
        );
    }
}
