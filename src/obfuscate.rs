//! Credential obfuscation helpers for the legacy proxy-mode login.
//!
//! These are deterministic, stateless encoders used only to build the
//! obfuscated `Authorization` payload. This is an obfuscation scheme, not
//! transport encryption — TLS is still required, and the plain-JSON login
//! path is the default. Do not "strengthen" these into real cryptography;
//! the backend expects exactly this legacy wire shape.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sha2::{Digest, Sha512};
use std::fmt::Write;

// ── Hex escaping ─────────────────────────────────────────────────

/// Escape a string as a run of `\u`-prefixed UTF-16 code units, each
/// zero-padded to 4 lowercase hex digits.
///
/// The output opens with the `\u` marker even for the empty string, so
/// `to_hex_escaped("")` is exactly `"\u"`. Characters outside the BMP
/// contribute two code units (their surrogate pair) and therefore two
/// escapes. Pure and total over any input.
pub fn to_hex_escaped(text: &str) -> String {
    if text.is_empty() {
        return "\\u".to_string();
    }
    let mut out = String::with_capacity(6 * text.len());
    for unit in text.encode_utf16() {
        // write! to a String cannot fail
        let _ = write!(out, "\\u{unit:04x}");
    }
    out
}

// ── SHA-512 digest ───────────────────────────────────────────────

/// Digest backend strategy, selected at call time by platform capability.
///
/// Both backends implement the same contract — SHA-512 over the UTF-8
/// encoding of the message, lowercase hex output — and must produce
/// byte-identical results. That equivalence is a tested correctness
/// property: the obfuscated login payload must hash the same no matter
/// which backend a given target ends up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestBackend {
    /// `ring`'s digest, with its own runtime CPU-feature dispatch.
    Native,
    /// Pure-Rust `sha2`, available on every target.
    PureRust,
}

impl DigestBackend {
    /// Pick the backend for the current target.
    pub fn select() -> Self {
        // ring ships hand-tuned assembly for the mainstream targets;
        // everything else takes the pure-Rust path
        if cfg!(any(target_arch = "x86_64", target_arch = "aarch64")) {
            Self::Native
        } else {
            Self::PureRust
        }
    }

    /// SHA-512 of the UTF-8 encoding of `message`, as lowercase hex.
    pub fn digest_hex(self, message: &str) -> String {
        match self {
            Self::Native => {
                let digest = ring::digest::digest(&ring::digest::SHA512, message.as_bytes());
                hex::encode(digest.as_ref())
            }
            Self::PureRust => hex::encode(Sha512::digest(message.as_bytes())),
        }
    }
}

/// SHA-512 hex digest using the backend selected for this target.
pub fn sha512_hex(message: &str) -> String {
    DigestBackend::select().digest_hex(message)
}

// ── Obfuscated login payload ─────────────────────────────────────

/// Build the proxy-mode `Authorization` payload: the hex-escaped username,
/// the SHA-512 hex digest of the password, and the hex-escaped captcha
/// response, comma-joined and base64-encoded as one opaque string.
pub fn obfuscated_credentials(username: &str, password: &str, captcha: &str) -> String {
    let triple = format!(
        "{},{},{}",
        to_hex_escaped(username),
        sha512_hex(password),
        to_hex_escaped(captcha),
    );
    BASE64.encode(triple)
}
