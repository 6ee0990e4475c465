use crate::api;
use crate::api::handlers::auth::AuthConfig;
use anyhow::Result;
use secrecy::SecretString;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dsn: String,
    pub session_secret: SecretString,
    pub session_ttl_seconds: i64,
    pub frontend_base_url: String,
    pub password_hash_cost: u32,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the configuration is invalid or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    let auth_config = AuthConfig::new(args.frontend_base_url, args.session_secret)
        .with_session_ttl_seconds(args.session_ttl_seconds)
        .with_password_hash_cost(args.password_hash_cost);

    api::new(args.port, args.dsn, auth_config).await
}
