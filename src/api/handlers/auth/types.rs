//! Request/response types for auth endpoints.
//!
//! Credential-bearing request types intentionally do not derive `Debug`, so
//! a stray log statement cannot print a password.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::token::SessionClaims;

#[derive(ToSchema, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(ToSchema, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
}

#[derive(ToSchema, Serialize, Debug)]
pub struct RegisterResponse {
    pub id: String,
    pub username: String,
}

#[derive(ToSchema, Serialize, Debug)]
pub struct SessionResponse {
    pub user_id: String,
    pub username: String,
    pub name: String,
    pub role: String,
    pub expires_at: i64,
}

impl From<SessionClaims> for SessionResponse {
    fn from(claims: SessionClaims) -> Self {
        Self {
            user_id: claims.sub.to_string(),
            username: claims.username,
            name: claims.name,
            role: claims.role.as_str().to_string(),
            expires_at: claims.exp,
        }
    }
}
