//! Stateless Signed Tokens
//!
//! Compact signed tokens of the form `b64url(claims).b64url(signature)`
//! where the signature is HMAC-SHA256 over the encoded claims. The
//! claims payload is caller-defined JSON; this layer only guarantees
//! integrity and authenticity, never confidentiality. Expiry is a
//! claims-level concern checked by the caller after verification.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use serde::Serialize;
use serde::de::DeserializeOwned;
use sha2::Sha256;
use thiserror::Error;

/// Token signing/verification errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Token does not have the `payload.signature` shape
    #[error("Malformed token")]
    Malformed,

    /// Signature does not match the payload
    #[error("Invalid token signature")]
    BadSignature,

    /// Claims could not be serialized or deserialized
    #[error("Invalid token claims: {0}")]
    InvalidClaims(String),
}

/// Sign a claims value into a token string
pub fn sign<T: Serialize>(secret: &[u8; 32], claims: &T) -> Result<String, TokenError> {
    let payload = serde_json::to_vec(claims).map_err(|e| TokenError::InvalidClaims(e.to_string()))?;
    let payload_b64 = URL_SAFE_NO_PAD.encode(&payload);

    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload_b64.as_bytes());
    let signature = mac.finalize().into_bytes();

    Ok(format!(
        "{}.{}",
        payload_b64,
        URL_SAFE_NO_PAD.encode(signature)
    ))
}

/// Verify a token and deserialize its claims
///
/// The signature is checked (constant-time, via the HMAC verifier)
/// before the payload is parsed, so unauthenticated input never reaches
/// the deserializer.
pub fn verify<T: DeserializeOwned>(secret: &[u8; 32], token: &str) -> Result<T, TokenError> {
    let (payload_b64, signature_b64) = token.split_once('.').ok_or(TokenError::Malformed)?;
    if payload_b64.is_empty() || signature_b64.contains('.') {
        return Err(TokenError::Malformed);
    }

    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload_b64.as_bytes());

    let signature = URL_SAFE_NO_PAD
        .decode(signature_b64)
        .map_err(|_| TokenError::Malformed)?;

    mac.verify_slice(&signature)
        .map_err(|_| TokenError::BadSignature)?;

    let payload = URL_SAFE_NO_PAD
        .decode(payload_b64)
        .map_err(|_| TokenError::Malformed)?;

    serde_json::from_slice(&payload).map_err(|e| TokenError::InvalidClaims(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct TestClaims {
        sub: String,
        exp_ms: i64,
    }

    fn claims() -> TestClaims {
        TestClaims {
            sub: "user-1".to_string(),
            exp_ms: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_sign_verify_roundtrip() {
        let secret = [7u8; 32];
        let token = sign(&secret, &claims()).unwrap();
        let decoded: TestClaims = verify(&secret, &token).unwrap();
        assert_eq!(decoded, claims());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = sign(&[7u8; 32], &claims()).unwrap();
        let result: Result<TestClaims, _> = verify(&[8u8; 32], &token);
        assert_eq!(result.unwrap_err(), TokenError::BadSignature);
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let secret = [7u8; 32];
        let token = sign(&secret, &claims()).unwrap();

        let (_, signature) = token.split_once('.').unwrap();
        let forged_payload = URL_SAFE_NO_PAD.encode(br#"{"sub":"user-2","exp_ms":0}"#);
        let forged = format!("{}.{}", forged_payload, signature);

        let result: Result<TestClaims, _> = verify(&secret, &forged);
        assert_eq!(result.unwrap_err(), TokenError::BadSignature);
    }

    #[test]
    fn test_malformed_rejected() {
        let secret = [7u8; 32];
        for bad in ["", "no-dot", ".", "a.b.c", "!!.@@"] {
            let result: Result<TestClaims, _> = verify(&secret, bad);
            assert!(result.is_err(), "accepted malformed token {:?}", bad);
        }
    }
}
