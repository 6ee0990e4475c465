//! Error taxonomy for the auth endpoints.
//!
//! Every public auth operation resolves to one of these variants at the HTTP
//! boundary. Lower-layer failures (store, hashing, codec) are wrapped into
//! `Internal` and logged; their detail never reaches the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing required fields")]
    MissingFields,
    // Unknown username, inactive user, and wrong password share this variant
    // so no response distinguishes them.
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("username already taken")]
    UsernameTaken,
    #[error("validation failed")]
    Validation(BTreeMap<&'static str, String>),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::MissingFields => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Missing required fields" })),
            )
                .into_response(),
            Self::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid username or password" })),
            )
                .into_response(),
            Self::UsernameTaken => (
                StatusCode::CONFLICT,
                Json(json!({ "error": "Username already taken" })),
            )
                .into_response(),
            Self::Validation(fields) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": "Validation failed", "fields": fields })),
            )
                .into_response(),
            Self::Internal(err) => {
                tracing::error!("auth internal error: {err:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal error" })),
                )
                    .into_response()
            }
        }
    }
}
