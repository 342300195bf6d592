//! HTTP Basic Authentication Header Parsing
//!
//! Extracts the username/password pair from an
//! `Authorization: Basic <base64(user:pass)>` request header
//! (RFC 7617). Credential verification is the caller's concern.

use std::fmt;

use axum::http::{HeaderMap, header};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

/// Errors from parsing the `Authorization` header
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BasicAuthError {
    /// No `Authorization` header on the request
    #[error("Missing Authorization header")]
    Missing,

    /// Header present but not a well-formed Basic credential
    #[error("Malformed Basic Authorization header")]
    Malformed,
}

/// Username/password pair decoded from a Basic credential.
///
/// Debug output redacts the password.
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Parse Basic credentials out of the request headers.
///
/// The scheme name is matched case-insensitively per RFC 7617. The
/// password may be empty; the username may not contain a colon (the
/// first colon always separates the pair).
pub fn extract_basic_credentials(headers: &HeaderMap) -> Result<BasicCredentials, BasicAuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(BasicAuthError::Missing)?
        .to_str()
        .map_err(|_| BasicAuthError::Malformed)?;

    let encoded = strip_basic_scheme(value).ok_or(BasicAuthError::Malformed)?;

    let decoded = STANDARD
        .decode(encoded.trim())
        .map_err(|_| BasicAuthError::Malformed)?;
    let decoded = String::from_utf8(decoded).map_err(|_| BasicAuthError::Malformed)?;

    let (username, password) = decoded.split_once(':').ok_or(BasicAuthError::Malformed)?;

    Ok(BasicCredentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

fn strip_basic_scheme(value: &str) -> Option<&str> {
    let (scheme, rest) = value.split_once(' ')?;
    if scheme.eq_ignore_ascii_case("Basic") {
        Some(rest)
    } else {
        None
    }
}
