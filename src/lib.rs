//! Latchkey — client-side authentication-session management.
//!
//! Turns a username/password/captcha triple into a validated, renewable
//! session token and keeps that token synchronized across three surfaces:
//! the host's cookie jar (`auth` cookie), a persistent key-value store
//! (`jwt` key), and in-memory session state. Tears the session down on
//! logout and surfaces invalid-token detection to the caller.
//!
//! Provides:
//! - Login with two wire encodings: plain JSON (default) or the legacy
//!   base64/hex/SHA-512 obfuscated `Authorization` payload
//! - Compact-token (header.payload.signature) decoding into claims
//! - Token renewal and startup validation of a persisted session
//! - A single session-store write path so the three surfaces never diverge
//! - Signup (account creation only — never logs the user in)
//!
//! ## Design Decisions
//! - The storage surfaces are traits ([`CookieJar`], [`PersistentStore`],
//!   [`Navigator`]) so embedders bind their own backing; in-memory
//!   implementations ship for in-process hosts and tests.
//! - No client-side signature verification — the token is opaque and the
//!   backend is the read authority; this crate only extracts claims.
//! - No retries, timeouts, or cancellation at this layer; transport
//!   failures propagate unchanged.
//! - Callers should not issue concurrent login/renew calls: overlapping
//!   commits degrade to last-commit-wins rather than being serialized.

pub mod config;
pub mod error;
pub mod flow;
pub mod obfuscate;
pub mod session;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use flow::AuthClient;
pub use session::{
    CookieJar, MemoryCookieJar, MemoryStore, NavEvent, Navigator, PersistentStore,
    RecordingNavigator, SessionStore, SetCookie,
};
pub use token::Claims;
