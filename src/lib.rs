//! # Vendejo (inventory and sales administration panel)
//!
//! `vendejo` is the administration service for a small phone-case and
//! accessory retail business. This crate carries the authenticated session
//! core: login, signed-session issuance, stateless session verification, and
//! edge access-control gating.
//!
//! ## Sessions
//!
//! There is no server-side session store. A login mints an HS256-signed
//! compact token embedding the user's claims, delivered in an `HttpOnly`
//! cookie with a fixed 24-hour lifetime. Every later request is authenticated
//! by re-verifying that signature; expired, tampered, and absent cookies are
//! all treated identically as "not authenticated".
//!
//! ## Access control
//!
//! An edge middleware classifies each request path as protected, auth-only,
//! or public and redirects before any route body runs. It shares the decode
//! path with the page-level guards so the two layers cannot drift.
//!
//! ## Accounts
//!
//! Registration hashes passwords with Argon2id and relies on the database
//! unique constraint to settle concurrent signups for the same username.
//! Deactivating a user (`is_active = false`) is a soft operation; the row and
//! its username stay reserved.

pub mod api;
pub mod cli;
pub mod token;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        // Should be a hex string (full SHA-1 is 40 chars, but could be short)
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }
}
