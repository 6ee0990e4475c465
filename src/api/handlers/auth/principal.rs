//! Authenticated principal extraction for page-level guards.
//!
//! Guards and the edge middleware both resolve sessions through
//! `session::decode_session`; this wrapper only adds the 401 mapping that
//! handler code wants.

use axum::http::{HeaderMap, StatusCode};

use super::{session::decode_session, state::AuthState};
use crate::token::SessionClaims;

/// Resolve the session cookie into claims, or 401 when absent or invalid.
pub(crate) fn require_session(
    headers: &HeaderMap,
    auth_state: &AuthState,
) -> Result<SessionClaims, StatusCode> {
    decode_session(headers, auth_state).ok_or(StatusCode::UNAUTHORIZED)
}
