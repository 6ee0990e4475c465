//! Database helpers for the credential store.
//!
//! Usernames are case-sensitive and unique across all rows regardless of
//! `is_active`; the unique constraint on `users.username` is the authority
//! for that invariant, not the handlers.

use anyhow::{anyhow, Context, Result};
use sqlx::{PgPool, Row};
use tracing::Instrument;
use uuid::Uuid;

use crate::token::Role;

/// Fields needed to authenticate a user and mint session claims.
pub(crate) struct UserRecord {
    pub(crate) id: Uuid,
    pub(crate) username: String,
    pub(crate) name: String,
    pub(crate) role: Role,
    pub(crate) password_hash: String,
}

/// Outcome when attempting to create a new user row.
#[derive(Debug)]
pub(super) enum RegisterOutcome {
    Created(Uuid),
    Conflict,
}

/// Look up a user by exact username, active rows only.
///
/// Deactivated users are invisible here so login treats them exactly like
/// unknown usernames.
pub(super) async fn lookup_active_user(pool: &PgPool, username: &str) -> Result<Option<UserRecord>> {
    let query = r"
        SELECT id, username, name, role, password_hash
        FROM users
        WHERE username = $1
          AND is_active
        LIMIT 1
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(username)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to lookup user")?;

    row.map(|row| {
        let role: String = row.get("role");
        let role = Role::parse(&role).ok_or_else(|| anyhow!("unknown role value: {role}"))?;
        Ok(UserRecord {
            id: row.get("id"),
            username: row.get("username"),
            name: row.get("name"),
            role,
            password_hash: row.get("password_hash"),
        })
    })
    .transpose()
}

/// Insert a new user with the default role, translating a unique-constraint
/// violation into `Conflict`. The pre-insert existence check is skipped on
/// purpose: two concurrent registrations race, and only the constraint is
/// atomic.
pub(super) async fn insert_user(
    pool: &PgPool,
    username: &str,
    name: &str,
    password_hash: &str,
) -> Result<RegisterOutcome> {
    let query = r"
        INSERT INTO users (username, name, password_hash)
        VALUES ($1, $2, $3)
        RETURNING id
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(username)
        .bind(name)
        .bind(password_hash)
        .fetch_one(pool)
        .instrument(span)
        .await;

    match row {
        Ok(row) => Ok(RegisterOutcome::Created(row.get("id"))),
        Err(err) if is_unique_violation(&err) => Ok(RegisterOutcome::Conflict),
        Err(err) => Err(err).context("failed to insert user"),
    }
}

/// Record a successful login without touching anything else on the row.
pub(super) async fn touch_last_login(pool: &PgPool, user_id: Uuid) -> Result<()> {
    let query = r"
        UPDATE users
        SET last_login_at = NOW()
        WHERE id = $1
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "UPDATE",
        db.statement = query
    );
    sqlx::query(query)
        .bind(user_id)
        .execute(pool)
        .instrument(span)
        .await
        .context("failed to update last_login_at")?;
    Ok(())
}

pub(super) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}
