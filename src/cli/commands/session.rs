//! Session and credential-hashing arguments.

use anyhow::{bail, Context, Result};
use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;

/// Minimum accepted signing secret length, in bytes.
///
/// A short HMAC key makes offline brute force practical; refuse to start
/// rather than sign sessions with one.
pub const MIN_SECRET_BYTES: usize = 32;

#[derive(Debug)]
pub struct Options {
    pub secret: SecretString,
    pub ttl_seconds: i64,
    pub frontend_base_url: String,
    pub password_hash_cost: u32,
}

impl Options {
    /// Extract and validate session options from parsed CLI matches.
    ///
    /// # Errors
    /// Returns an error if the signing secret is missing or shorter than
    /// [`MIN_SECRET_BYTES`].
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let secret = matches
            .get_one::<String>("session-secret")
            .cloned()
            .context("missing required argument: --session-secret")?;

        if secret.len() < MIN_SECRET_BYTES {
            bail!("session secret must be at least {MIN_SECRET_BYTES} bytes");
        }

        Ok(Self {
            secret: SecretString::from(secret),
            ttl_seconds: matches
                .get_one::<i64>("session-ttl-seconds")
                .copied()
                .unwrap_or(86_400),
            frontend_base_url: matches
                .get_one::<String>("frontend-base-url")
                .cloned()
                .unwrap_or_else(|| "http://localhost:3000".to_string()),
            password_hash_cost: matches
                .get_one::<u32>("password-hash-cost")
                .copied()
                .unwrap_or(2),
        })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("session-secret")
                .long("session-secret")
                .help("Secret used to sign session tokens (min 32 bytes, no default)")
                .env("VENDEJO_SESSION_SECRET")
                .hide_env_values(true)
                .required(true),
        )
        .arg(
            Arg::new("session-ttl-seconds")
                .long("session-ttl-seconds")
                .help("Session cookie TTL in seconds")
                .env("VENDEJO_SESSION_TTL_SECONDS")
                .default_value("86400")
                .value_parser(clap::value_parser!(i64)),
        )
        .arg(
            Arg::new("frontend-base-url")
                .long("frontend-base-url")
                .help("Frontend base URL; drives CORS origin and the cookie Secure attribute")
                .env("VENDEJO_FRONTEND_BASE_URL")
                .default_value("http://localhost:3000"),
        )
        .arg(
            Arg::new("password-hash-cost")
                .long("password-hash-cost")
                .help("Argon2 time cost used when hashing new passwords")
                .env("VENDEJO_PASSWORD_HASH_COST")
                .default_value("2")
                .value_parser(clap::value_parser!(u32)),
        )
}
