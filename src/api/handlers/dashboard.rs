//! Authenticated landing page data.
//!
//! The edge middleware already turns unauthenticated requests away, but the
//! guard here re-checks through the same decode path so the handler stays
//! safe if routing ever changes underneath it.

use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Redirect, Response},
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::auth::{principal::require_session, AuthState};
use crate::api::middleware::LOGIN_PATH;

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub message: String,
    pub username: String,
    pub role: String,
}

#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Personalized landing data", body = DashboardResponse),
        (status = 303, description = "Not authenticated, redirect to login")
    ),
    tag = "dashboard"
)]
pub async fn dashboard(headers: HeaderMap, auth_state: Extension<Arc<AuthState>>) -> Response {
    let claims = match require_session(&headers, &auth_state) {
        Ok(claims) => claims,
        Err(_) => return Redirect::to(LOGIN_PATH).into_response(),
    };

    let response = DashboardResponse {
        message: format!("Welcome back, {}", claims.name),
        username: claims.username,
        role: claims.role.as_str().to_string(),
    };
    (StatusCode::OK, Json(response)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::auth::AuthConfig;
    use crate::token::Role;
    use axum::http::{header::COOKIE, HeaderValue};
    use secrecy::SecretString;
    use uuid::Uuid;

    fn auth_state() -> Arc<AuthState> {
        Arc::new(AuthState::new(AuthConfig::new(
            "http://localhost:3000".to_string(),
            SecretString::from("0123456789abcdef0123456789abcdef".to_string()),
        )))
    }

    #[tokio::test]
    async fn unauthenticated_request_redirects_to_login() {
        let response = dashboard(HeaderMap::new(), Extension(auth_state())).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response
                .headers()
                .get("location")
                .and_then(|value| value.to_str().ok()),
            Some(LOGIN_PATH)
        );
    }

    #[tokio::test]
    async fn authenticated_request_is_personalized() {
        let state = auth_state();
        let token = state
            .issue_token(Uuid::from_u128(4), "alice", "Alice Vendisto", Role::Admin)
            .expect("token should sign");
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!("session={token}")).expect("valid header"),
        );

        let response = dashboard(headers, Extension(state)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
