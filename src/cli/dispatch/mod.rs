//! Command-line argument dispatch and server initialization.
//!
//! This module maps validated CLI arguments to the appropriate action, such
//! as starting the API server with its full configuration state.

use crate::cli::actions::{server::Args, Action};
use crate::cli::commands::session;
use anyhow::{Context, Result};

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);
    let dsn = matches
        .get_one::<String>("dsn")
        .cloned()
        .context("missing required argument: --dsn")?;

    let session_opts = session::Options::parse(matches)?;

    Ok(Action::Server(Args {
        port,
        dsn,
        session_secret: session_opts.secret,
        session_ttl_seconds: session_opts.ttl_seconds,
        frontend_base_url: session_opts.frontend_base_url,
        password_hash_cost: session_opts.password_hash_cost,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::actions::Action;

    #[test]
    fn short_session_secret_rejected() {
        temp_env::with_vars(
            [
                ("VENDEJO_DSN", Some("postgres://user@localhost:5432/vendejo")),
                ("VENDEJO_SESSION_SECRET", Some("too-short")),
            ],
            || {
                let command = crate::cli::commands::new();
                let matches = command.get_matches_from(vec!["vendejo"]);
                let result = handler(&matches);
                assert!(result.is_err());
                if let Err(err) = result {
                    assert!(err.to_string().contains("at least 32 bytes"));
                }
            },
        );
    }

    #[test]
    fn server_action_carries_options() {
        temp_env::with_vars(
            [
                ("VENDEJO_DSN", Some("postgres://user@localhost:5432/vendejo")),
                (
                    "VENDEJO_SESSION_SECRET",
                    Some("0123456789abcdef0123456789abcdef"),
                ),
                ("VENDEJO_SESSION_TTL_SECONDS", Some("7200")),
                ("VENDEJO_PORT", Some("9090")),
            ],
            || {
                let command = crate::cli::commands::new();
                let matches = command.get_matches_from(vec!["vendejo"]);
                let action = handler(&matches).expect("dispatch should succeed");
                let Action::Server(args) = action;
                assert_eq!(args.port, 9090);
                assert_eq!(args.dsn, "postgres://user@localhost:5432/vendejo");
                assert_eq!(args.session_ttl_seconds, 7200);
                assert_eq!(args.frontend_base_url, "http://localhost:3000");
                assert_eq!(args.password_hash_cost, 2);
            },
        );
    }
}
