//! Login endpoint.
//!
//! All credential failures (unknown username, deactivated account, wrong
//! password) collapse into one `InvalidCredentials` answer so responses never
//! reveal whether an account exists.

use axum::{
    extract::{Extension, Form},
    http::{header::SET_COOKIE, HeaderMap},
    response::{IntoResponse, Json, Redirect, Response},
};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::debug;

use super::{
    error::AuthError,
    password,
    session::session_cookie,
    state::AuthState,
    storage::{lookup_active_user, touch_last_login},
    types::LoginRequest,
};
use crate::api::middleware::DASHBOARD_PATH;

#[utoipa::path(
    post,
    path = "/login",
    request_body(content = LoginRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Login successful, session cookie set"),
        (status = 400, description = "Missing required fields"),
        (status = 401, description = "Invalid username or password")
    ),
    tag = "auth"
)]
pub async fn login(
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Form<LoginRequest>>,
) -> Response {
    let Some(Form(request)) = payload else {
        return AuthError::MissingFields.into_response();
    };

    match handle_login(&pool, &auth_state, &request).await {
        Ok(headers) => (headers, Redirect::to(DASHBOARD_PATH)).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn handle_login(
    pool: &PgPool,
    auth_state: &AuthState,
    request: &LoginRequest,
) -> Result<HeaderMap, AuthError> {
    if request.username.is_empty() || request.password.is_empty() {
        return Err(AuthError::MissingFields);
    }

    let Some(user) = lookup_active_user(pool, &request.username).await? else {
        // Hash anyway so unknown usernames cost the same as wrong passwords.
        let _ = password::hash_password(
            &request.password,
            auth_state.config().password_hash_cost(),
        );
        return Err(AuthError::InvalidCredentials);
    };

    if !password::verify_password(&request.password, &user.password_hash) {
        debug!("password mismatch");
        return Err(AuthError::InvalidCredentials);
    }

    touch_last_login(pool, user.id).await?;

    let token = auth_state
        .issue_token(user.id, &user.username, &user.name, user.role)
        .map_err(|err| AuthError::Internal(err.into()))?;
    let cookie = session_cookie(
        &token,
        auth_state.config().session_ttl_seconds(),
        auth_state.config().session_cookie_secure(),
    )
    .map_err(|err| AuthError::Internal(err.into()))?;

    debug!("login successful");

    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);
    Ok(headers)
}

/// Login form placeholder rendered by the panel frontend; also the redirect
/// target for unauthenticated requests to protected paths.
pub async fn login_form() -> impl IntoResponse {
    Json(json!({ "form": "login", "fields": ["username", "password"] }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::auth::state::AuthConfig;
    use axum::http::StatusCode;
    use secrecy::SecretString;
    use sqlx::postgres::PgPoolOptions;

    fn auth_state() -> Arc<AuthState> {
        Arc::new(AuthState::new(AuthConfig::new(
            "http://localhost:3000".to_string(),
            SecretString::from("0123456789abcdef0123456789abcdef".to_string()),
        )))
    }

    // Lazy pools let the no-database-touched paths run without Postgres.
    fn lazy_pool() -> anyhow::Result<PgPool> {
        Ok(PgPoolOptions::new().connect_lazy("postgres://postgres@localhost/postgres")?)
    }

    #[tokio::test]
    async fn login_missing_payload() -> anyhow::Result<()> {
        let response = login(Extension(lazy_pool()?), Extension(auth_state()), None)
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn login_empty_fields_are_missing_fields() -> anyhow::Result<()> {
        for (username, password) in [("", "password123"), ("alice", ""), ("", "")] {
            let request = LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            };
            let response = login(
                Extension(lazy_pool()?),
                Extension(auth_state()),
                Some(Form(request)),
            )
            .await
            .into_response();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
        Ok(())
    }

    #[tokio::test]
    async fn login_form_is_public() {
        let response = login_form().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
