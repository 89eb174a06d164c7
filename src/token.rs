//! Compact-token decoding.
//!
//! A session token is an opaque three-segment signed string
//! (`header.payload.signature`, each segment base64url). This codec only
//! extracts the claims from the payload segment for display and session
//! purposes — signature verification is the backend's job, and the token
//! is always sent back to the backend verbatim.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;
use serde_json::Value;

use crate::error::AuthError;

/// Claims decoded from a token's payload segment.
///
/// `user` is the embedded application user record, treated as an opaque
/// pass-through value. Claims are derived data — never mutated, always
/// replaced wholesale by re-parsing a fresh token.
#[derive(Debug, Clone, Deserialize)]
pub struct Claims {
    /// Issued-at, seconds since the epoch.
    #[serde(default)]
    pub iat: Option<i64>,
    /// Expiry, seconds since the epoch.
    #[serde(default)]
    pub exp: Option<i64>,
    /// Opaque application user record. Required — a payload without a
    /// `user` claim is considered malformed.
    pub user: Value,
}

/// Decode a compact token into its [`Claims`].
///
/// Fails with [`AuthError::MalformedToken`] when the input does not split
/// into exactly three non-empty dot-separated segments, when the middle
/// segment is not valid base64url, or when the decoded payload is not
/// claims JSON carrying a `user` record. Pure — no session state is read
/// or written here.
pub fn parse(token: &str) -> Result<Claims, AuthError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
        return Err(AuthError::MalformedToken(
            "expected three dot-separated segments".into(),
        ));
    }

    // tolerate padded emitters; the engine itself is no-pad
    let payload = parts[1].trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| AuthError::MalformedToken(format!("payload segment is not base64url: {e}")))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| AuthError::MalformedToken(format!("payload is not claims JSON: {e}")))
}
