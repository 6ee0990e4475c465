//! Session and account endpoints.
//!
//! Flow Overview:
//! 1) `register` creates an active `user` account with an Argon2id hash.
//! 2) `login` verifies credentials and sets a signed, stateless session cookie.
//! 3) `session` / `logout` and the page guards resolve or clear that cookie.
//!
//! There is no server-side session table: a session lives exactly as long as
//! its token verifies. Rotating the signing secret invalidates every session
//! at once.

pub mod error;
pub mod login;
pub mod password;
pub mod principal;
pub mod register;
pub mod session;
pub mod state;
pub mod storage;
pub mod types;

pub use error::AuthError;
pub use state::{AuthConfig, AuthState};
