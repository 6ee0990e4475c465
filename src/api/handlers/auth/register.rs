//! Registration endpoint.
//!
//! Single canonical contract: username 3-32 characters, password 8-64
//! characters, non-empty display name. New accounts always start as active
//! `user` role; the response never echoes the password hash.

use axum::{
    extract::{Extension, Form},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use regex::Regex;
use serde_json::json;
use sqlx::PgPool;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

use super::{
    error::AuthError,
    password,
    state::AuthState,
    storage::{insert_user, RegisterOutcome},
    types::{RegisterRequest, RegisterResponse},
};

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 32;
const PASSWORD_MIN: usize = 8;
const PASSWORD_MAX: usize = 64;

#[utoipa::path(
    post,
    path = "/register",
    request_body(content = RegisterRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Account created", body = RegisterResponse),
        (status = 409, description = "Username already taken"),
        (status = 422, description = "Validation failed")
    ),
    tag = "auth"
)]
pub async fn register(
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Form<RegisterRequest>>,
) -> Response {
    let Some(Form(request)) = payload else {
        return AuthError::MissingFields.into_response();
    };

    match handle_register(&pool, &auth_state, request).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn handle_register(
    pool: &PgPool,
    auth_state: &AuthState,
    request: RegisterRequest,
) -> Result<RegisterResponse, AuthError> {
    let errors = validate(&request);
    if !errors.is_empty() {
        return Err(AuthError::Validation(errors));
    }

    let password_hash = password::hash_password(
        &request.password,
        auth_state.config().password_hash_cost(),
    )?;

    // No pre-insert existence check: the unique constraint decides the race.
    match insert_user(pool, &request.username, request.name.trim(), &password_hash).await? {
        RegisterOutcome::Created(id) => {
            debug!("user created");
            Ok(RegisterResponse {
                id: id.to_string(),
                username: request.username,
            })
        }
        RegisterOutcome::Conflict => Err(AuthError::UsernameTaken),
    }
}

fn valid_username_charset(username: &str) -> bool {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").is_ok_and(|regex| regex.is_match(username))
}

fn validate(request: &RegisterRequest) -> BTreeMap<&'static str, String> {
    let mut errors = BTreeMap::new();

    let username_len = request.username.chars().count();
    if !(USERNAME_MIN..=USERNAME_MAX).contains(&username_len) {
        errors.insert(
            "username",
            format!("must be between {USERNAME_MIN} and {USERNAME_MAX} characters"),
        );
    } else if !valid_username_charset(&request.username) {
        errors.insert(
            "username",
            "may only contain letters, digits, '.', '_' and '-'".to_string(),
        );
    }

    let password_len = request.password.chars().count();
    if !(PASSWORD_MIN..=PASSWORD_MAX).contains(&password_len) {
        errors.insert(
            "password",
            format!("must be between {PASSWORD_MIN} and {PASSWORD_MAX} characters"),
        );
    }

    if request.name.trim().is_empty() {
        errors.insert("name", "must not be empty".to_string());
    }

    errors
}

/// Registration form placeholder rendered by the panel frontend.
pub async fn register_form() -> impl IntoResponse {
    Json(json!({ "form": "register", "fields": ["username", "password", "name"] }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::auth::state::AuthConfig;
    use secrecy::SecretString;
    use sqlx::postgres::PgPoolOptions;

    fn auth_state() -> Arc<AuthState> {
        Arc::new(AuthState::new(AuthConfig::new(
            "http://localhost:3000".to_string(),
            SecretString::from("0123456789abcdef0123456789abcdef".to_string()),
        )))
    }

    fn lazy_pool() -> anyhow::Result<PgPool> {
        Ok(PgPoolOptions::new().connect_lazy("postgres://postgres@localhost/postgres")?)
    }

    fn request(username: &str, password: &str, name: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn validate_accepts_canonical_input() {
        let errors = validate(&request("newuser", "longenough1", "New User"));
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn validate_rejects_short_and_long_usernames() {
        let errors = validate(&request("ab", "longenough1", "New User"));
        assert!(errors.contains_key("username"));

        let errors = validate(&request(&"a".repeat(33), "longenough1", "New User"));
        assert!(errors.contains_key("username"));
    }

    #[test]
    fn validate_rejects_bad_username_charset() {
        let errors = validate(&request("new user", "longenough1", "New User"));
        assert!(errors.contains_key("username"));

        let errors = validate(&request(".dotfirst", "longenough1", "New User"));
        assert!(errors.contains_key("username"));
    }

    #[test]
    fn validate_enforces_password_bounds() {
        let errors = validate(&request("newuser", "short07", "New User"));
        assert!(errors.contains_key("password"));

        let errors = validate(&request("newuser", &"p".repeat(65), "New User"));
        assert!(errors.contains_key("password"));

        let errors = validate(&request("newuser", &"p".repeat(64), "New User"));
        assert!(!errors.contains_key("password"));
    }

    #[test]
    fn validate_requires_display_name() {
        let errors = validate(&request("newuser", "longenough1", "   "));
        assert!(errors.contains_key("name"));
    }

    #[test]
    fn validate_reports_all_fields_at_once() {
        let errors = validate(&request("x", "short", ""));
        assert_eq!(errors.len(), 3);
    }

    #[tokio::test]
    async fn register_missing_payload() -> anyhow::Result<()> {
        let response = register(Extension(lazy_pool()?), Extension(auth_state()), None)
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn register_invalid_input_never_reaches_the_database() -> anyhow::Result<()> {
        // The lazy pool has no live server behind it; reaching the insert
        // would fail with a connection error instead of 422.
        let response = register(
            Extension(lazy_pool()?),
            Extension(auth_state()),
            Some(Form(request("ab", "short", ""))),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        Ok(())
    }

    #[tokio::test]
    async fn register_form_is_public() {
        let response = register_form().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
