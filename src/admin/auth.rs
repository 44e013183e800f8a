//! HTTP Basic authentication for the admin surface.
//!
//! Credentials come from the current settings snapshot, so a reload that
//! rotates the password applies to the next request. A password configured
//! without a username still guards the surface; clients then send
//! `:<password>`.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::Engine;
use subtle::ConstantTimeEq;

use crate::admin::AdminState;
use crate::config::ConfigSource;

pub async fn admin_auth_middleware(
    State(state): State<AdminState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let settings = state.settings.load();

    // Basic auth disabled upstream: admin surface is open.
    if !settings.basic_auth_enabled() {
        return next.run(request).await;
    }

    let credentials = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(decode_basic);

    match credentials {
        Some((user, pass))
            if credentials_match(&user, settings.basic_auth_username())
                & credentials_match(&pass, settings.basic_auth_password()) =>
        {
            next.run(request).await
        }
        _ => {
            tracing::warn!(path = %request.uri().path(), "Rejected admin request");
            (
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, "Basic realm=\"gateway\"")],
                "Unauthorized",
            )
                .into_response()
        }
    }
}

/// Constant-time string comparison.
///
/// Both sides are padded to the longer length with different fill bytes, so
/// the position of the first mismatch does not show in timing.
pub fn credentials_match(given: &str, expected: &str) -> bool {
    let len = given.len().max(expected.len());

    let mut given_padded = vec![0u8; len];
    let mut expected_padded = vec![0xFFu8; len];
    given_padded[..given.len()].copy_from_slice(given.as_bytes());
    expected_padded[..expected.len()].copy_from_slice(expected.as_bytes());

    let lengths_equal = given.len().ct_eq(&expected.len());
    let contents_equal = given_padded.ct_eq(&expected_padded);
    (lengths_equal & contents_equal).into()
}

/// Decode an `Authorization: Basic ...` value into `(username, password)`.
pub fn decode_basic(value: &str) -> Option<(String, String)> {
    let encoded = value.strip_prefix("Basic ")?;
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, pass) = decoded.split_once(':')?;
    Some((user.to_string(), pass.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(raw: &str) -> String {
        format!("Basic {}", base64::engine::general_purpose::STANDARD.encode(raw))
    }

    #[test]
    fn test_decode_basic() {
        assert_eq!(
            decode_basic(&encode("admin:secret")),
            Some(("admin".to_string(), "secret".to_string()))
        );
    }

    #[test]
    fn test_password_may_contain_colon() {
        assert_eq!(
            decode_basic(&encode("admin:se:cret")),
            Some(("admin".to_string(), "se:cret".to_string()))
        );
    }

    #[test]
    fn test_credentials_match() {
        assert!(credentials_match("secret", "secret"));
        assert!(credentials_match("", ""));
        assert!(!credentials_match("secret", "secreT"));
        assert!(!credentials_match("secret", "secret2"));
        assert!(!credentials_match("", "secret"));
        assert!(!credentials_match("secret", ""));
    }

    #[test]
    fn test_rejects_malformed() {
        assert_eq!(decode_basic("Bearer abc"), None);
        assert_eq!(decode_basic("Basic !!!not-base64"), None);
        assert_eq!(decode_basic(&encode("no-colon")), None);
    }
}
