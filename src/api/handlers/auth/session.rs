//! Session endpoints and the cookie gateway.
//!
//! The cookie carries the signed token itself; there is no server-side
//! session row. Reading a session is therefore a pure decode, shared between
//! these handlers, the page guards, and the edge middleware.

use axum::{
    extract::Extension,
    http::{
        header::{InvalidHeaderValue, COOKIE, SET_COOKIE},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::error;

use super::{state::AuthState, types::SessionResponse};
use crate::token::SessionClaims;

pub(crate) const SESSION_COOKIE_NAME: &str = "session";

#[utoipa::path(
    get,
    path = "/session",
    responses(
        (status = 200, description = "Session is active", body = SessionResponse),
        (status = 204, description = "No active session")
    ),
    tag = "auth"
)]
pub async fn session(
    headers: HeaderMap,
    auth_state: Extension<Arc<AuthState>>,
) -> impl IntoResponse {
    // Absent, expired, tampered, and malformed cookies are indistinguishable
    // here: all of them read as "no session".
    match decode_session(&headers, &auth_state) {
        Some(claims) => (StatusCode::OK, Json(SessionResponse::from(claims))).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/logout",
    responses(
        (status = 204, description = "Session cleared")
    ),
    tag = "auth"
)]
pub async fn logout(auth_state: Extension<Arc<AuthState>>) -> impl IntoResponse {
    // Clear unconditionally; logging out while logged out is not an error.
    let mut response_headers = HeaderMap::new();
    match clear_session_cookie(auth_state.config().session_cookie_secure()) {
        Ok(cookie) => {
            response_headers.insert(SET_COOKIE, cookie);
        }
        Err(err) => error!("Failed to build clearing cookie: {err}"),
    }
    (StatusCode::NO_CONTENT, response_headers).into_response()
}

/// Decode the session cookie on a request, if any.
///
/// Single decode path for handlers, guards, and the edge middleware; every
/// failure mode collapses to `None`.
pub(crate) fn decode_session(headers: &HeaderMap, auth_state: &AuthState) -> Option<SessionClaims> {
    let token = extract_session_token(headers)?;
    auth_state.decode_token(&token).ok()
}

/// Build the `Set-Cookie` value for a freshly minted session token.
pub(super) fn session_cookie(
    token: &str,
    ttl_seconds: i64,
    secure: bool,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie = format!(
        "{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={ttl_seconds}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

/// Build the `Set-Cookie` value that removes the session cookie.
fn clear_session_cookie(secure: bool) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie = format!("{SESSION_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

/// Return the raw session cookie value from the request, if present.
pub(crate) fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    let header = headers.get(COOKIE)?;
    let value = header.to_str().ok()?;
    for pair in value.split(';') {
        let trimmed = pair.trim();
        let mut parts = trimmed.splitn(2, '=');
        let key = parts.next()?.trim();
        let val = parts.next()?.trim();
        if key == SESSION_COOKIE_NAME {
            return Some(val.to_string());
        }
    }
    None
}
