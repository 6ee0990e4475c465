//! Edge access-control middleware.
//!
//! Runs before any route body executes. The decision is a pure function of
//! the request path class and a stateless decode of the session cookie; the
//! database is never consulted on this path, and a decode failure is simply
//! "unauthenticated", never an error.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;

use crate::api::handlers::auth::{session::decode_session, AuthState};

pub(crate) const LOGIN_PATH: &str = "/login";
pub(crate) const DASHBOARD_PATH: &str = "/dashboard";

/// Paths that require an authenticated session.
const PROTECTED_PREFIXES: &[&str] = &["/dashboard"];
/// Paths for signing in or up; authenticated users are sent away from them.
const AUTH_ONLY_PREFIXES: &[&str] = &["/login", "/register"];
/// Paths the middleware never classifies: static assets and the public API.
const EXCLUDED_PREFIXES: &[&str] = &["/health", "/static", "/assets", "/v1"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RouteClass {
    Protected,
    AuthOnly,
    Public,
}

pub(crate) async fn access_control(
    State(auth_state): State<Arc<AuthState>>,
    request: Request,
    next: Next,
) -> Response {
    let Some(class) = classify(request.uri().path()) else {
        return next.run(request).await;
    };

    let authenticated = decode_session(request.headers(), &auth_state).is_some();
    match redirect_target(class, authenticated) {
        Some(target) => Redirect::to(target).into_response(),
        None => next.run(request).await,
    }
}

/// The decision table: where to send a request, if anywhere.
const fn redirect_target(class: RouteClass, authenticated: bool) -> Option<&'static str> {
    match (class, authenticated) {
        (RouteClass::Protected, false) => Some(LOGIN_PATH),
        (RouteClass::AuthOnly, true) => Some(DASHBOARD_PATH),
        _ => None,
    }
}

/// Classify a path, or `None` when it belongs to the excluded set.
fn classify(path: &str) -> Option<RouteClass> {
    if matches_prefix(EXCLUDED_PREFIXES, path) {
        return None;
    }
    if matches_prefix(PROTECTED_PREFIXES, path) {
        return Some(RouteClass::Protected);
    }
    if matches_prefix(AUTH_ONLY_PREFIXES, path) {
        return Some(RouteClass::AuthOnly);
    }
    Some(RouteClass::Public)
}

fn matches_prefix(prefixes: &[&str], path: &str) -> bool {
    prefixes.iter().any(|prefix| {
        path.strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}
