//! Auth Middleware
//!
//! Middleware for requiring a verified bearer token on protected routes.
//! Verification is stateless and happens before the gated operation
//! touches any store; the asserted identity is placed in request
//! extensions for downstream handlers.

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::access_token;
use crate::application::config::AuthConfig;
use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct BearerAuthState {
    pub config: Arc<AuthConfig>,
}

/// Middleware that requires a valid `Authorization: Bearer <token>` header
pub async fn require_bearer_auth(
    State(state): State<BearerAuthState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let token = match extract_bearer_token(req.headers()) {
        Some(token) => token,
        None => return Err(AuthError::TokenMissing.into_response()),
    };

    let identity = match access_token::verify(&state.config, &token) {
        Ok(identity) => identity,
        Err(e) => return Err(e.into_response()),
    };

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

/// Pull the token out of the Authorization header
fn extract_bearer_token(headers: &axum::http::HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
