//! Signed session token codec.
//!
//! Sessions are stateless: every claim lives inside an HS256-signed compact
//! token held by the browser's cookie jar. Only the server, holding the
//! symmetric secret, can mint or validate tokens. The codec performs no I/O;
//! callers supply the current time so verification stays deterministic.

mod hs256;

pub use hs256::{Error, Role, SessionClaims, SessionTokenHeader, TOKEN_VERSION, sign_hs256, verify_hs256};
