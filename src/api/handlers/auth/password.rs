//! Password hashing and verification.
//!
//! Argon2id with a fixed memory/parallelism profile; only the time cost is
//! operator-tunable. Verification reads the parameters embedded in the stored
//! hash, so old hashes keep verifying after a cost change.

use anyhow::{anyhow, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

const MEMORY_COST_KIB: u32 = 19 * 1024;
const PARALLELISM: u32 = 1;

fn hasher(time_cost: u32) -> Result<Argon2<'static>> {
    let params = Params::new(MEMORY_COST_KIB, time_cost, PARALLELISM, None)
        .map_err(|err| anyhow!("invalid argon2 params: {err}"))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash a password with a fresh random salt.
///
/// # Errors
/// Returns an error if the parameters are rejected or hashing fails.
pub(crate) fn hash_password(password: &str, time_cost: u32) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = hasher(time_cost)?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| anyhow!("failed to hash password: {err}"))?;
    Ok(hash.to_string())
}

/// Check a password against a stored hash.
///
/// Returns `false` for a wrong password or a malformed stored hash, never an
/// error: callers must not be able to tell the two apart.
pub(crate) fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Lowest valid time cost keeps these tests fast.
    const TEST_COST: u32 = 1;

    #[test]
    fn hash_then_verify_round_trip() -> Result<()> {
        let hash = hash_password("correct horse battery staple", TEST_COST)?;
        assert!(verify_password("correct horse battery staple", &hash));
        assert!(!verify_password("correct horse battery stable", &hash));
        Ok(())
    }

    #[test]
    fn hashes_are_salted() -> Result<()> {
        let first = hash_password("same-password", TEST_COST)?;
        let second = hash_password("same-password", TEST_COST)?;
        assert_ne!(first, second);
        assert!(verify_password("same-password", &first));
        assert!(verify_password("same-password", &second));
        Ok(())
    }

    #[test]
    fn malformed_stored_hash_is_just_false() {
        assert!(!verify_password("whatever", ""));
        assert!(!verify_password("whatever", "not-a-phc-string"));
        assert!(!verify_password("whatever", "$argon2id$v=19$truncated"));
    }

    #[test]
    fn empty_password_is_allowed_by_this_layer() -> Result<()> {
        // Minimum-length policy belongs to the registration validator.
        let hash = hash_password("", TEST_COST)?;
        assert!(verify_password("", &hash));
        assert!(!verify_password("x", &hash));
        Ok(())
    }

    #[test]
    fn zero_time_cost_is_rejected() {
        assert!(hash_password("password", 0).is_err());
    }
}
