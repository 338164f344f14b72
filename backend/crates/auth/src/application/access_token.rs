//! Access Token
//!
//! Stateless signed bearer token carrying the caller identity.
//! Claims are `{userId, userName, role, expiresAtMs}`, signed with
//! HMAC-SHA256 (see `platform::token`). Expiry is fixed at issue time
//! from `AuthConfig::token_ttl`; there is no refresh mechanism.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::error::{AuthError, AuthResult};
use kernel::id::UserId;
use kernel::identity::{Identity, UserRole};
use platform::token;

/// Token claims, serialized into the signed payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessClaims {
    pub user_id: Uuid,
    pub user_name: String,
    pub role: String,
    pub expires_at_ms: i64,
}

impl AccessClaims {
    /// Whether the claims are past their expiry
    pub fn is_expired(&self, now_ms: i64) -> bool {
        now_ms >= self.expires_at_ms
    }
}

/// Issue a signed access token for a user
pub fn issue(config: &AuthConfig, user: &User) -> AuthResult<String> {
    let claims = AccessClaims {
        user_id: *user.user_id.as_uuid(),
        user_name: user.user_name.as_str().to_string(),
        role: user.role.code().to_string(),
        expires_at_ms: Utc::now().timestamp_millis() + config.token_ttl_ms(),
    };

    token::sign(&config.token_secret, &claims)
        .map_err(|e| AuthError::Internal(format!("Token signing failed: {e}")))
}

/// Verify a bearer token and return the asserted identity
///
/// Rejects tampered, malformed, and expired tokens before the caller
/// identity reaches any gated operation.
pub fn verify(config: &AuthConfig, bearer: &str) -> AuthResult<Identity> {
    let claims: AccessClaims =
        token::verify(&config.token_secret, bearer).map_err(|_| AuthError::TokenInvalid)?;

    if claims.is_expired(Utc::now().timestamp_millis()) {
        return Err(AuthError::TokenExpired);
    }

    let role = UserRole::parse(&claims.role).map_err(|_| AuthError::TokenInvalid)?;

    Ok(Identity::new(
        UserId::from_uuid(claims.user_id),
        claims.user_name,
        role,
    ))
}
