//! The single write path to the three synchronized session surfaces.
//!
//! Every session mutation in this crate goes through [`SessionStore`]:
//! the `auth` cookie, the persistent `jwt` key, and the in-memory
//! token/user pair must always reflect the same token, and funneling all
//! writes through one adapter is what keeps them from diverging.

use std::sync::Arc;

use anyhow::Result;
use parking_lot::Mutex;
use serde_json::Value;

use super::{CookieJar, PersistentStore, SetCookie};

/// Cookie carrying the session token. Written and cleared here, never
/// read back — read authority belongs to the backend.
pub const AUTH_COOKIE: &str = "auth";

/// Cookie flagging the legacy proxy deployment. External input, read-only.
pub const PROXY_COOKIE: &str = "pyproxy";

/// Persistent-store key holding the session token.
pub const TOKEN_KEY: &str = "jwt";

/// In-memory half of the session: token and user move as one pair.
#[derive(Debug, Default)]
struct SessionState {
    token: String,
    user: Option<Value>,
}

/// Adapter owning the synchronized session surfaces.
///
/// Overlapping commits are not serialized beyond the in-memory guard:
/// the guarantee is last-commit-wins, and callers should not issue
/// concurrent login/renew calls (cross-tab mutual exclusion is out of
/// scope here).
pub struct SessionStore {
    cookies: Arc<dyn CookieJar>,
    persistent: Arc<dyn PersistentStore>,
    state: Mutex<SessionState>,
}

impl SessionStore {
    pub fn new(cookies: Arc<dyn CookieJar>, persistent: Arc<dyn PersistentStore>) -> Self {
        Self {
            cookies,
            persistent,
            state: Mutex::new(SessionState::default()),
        }
    }

    /// Write a freshly parsed token and its user to all three surfaces.
    ///
    /// Order: cookie, persistent store, then the in-memory pair under one
    /// guard. If any underlying write fails the whole operation fails and
    /// the caller must not assume any surface was updated.
    pub fn commit(&self, token: &str, user: Value) -> Result<()> {
        self.cookies.set(SetCookie::session(AUTH_COOKIE, token))?;
        self.persistent.set(TOKEN_KEY, token)?;

        let mut state = self.state.lock();
        state.token = token.to_string();
        state.user = Some(user);
        Ok(())
    }

    /// Tear the session down on all three surfaces.
    ///
    /// The persistent `jwt` key is set to the empty string rather than
    /// removed: a present-but-empty key means "logged out", an absent key
    /// means "never logged in", and callers elsewhere rely on telling the
    /// two apart.
    pub fn clear(&self) -> Result<()> {
        self.cookies.set(SetCookie::expired(AUTH_COOKIE))?;
        self.persistent.set(TOKEN_KEY, "")?;

        let mut state = self.state.lock();
        state.token.clear();
        state.user = None;
        Ok(())
    }

    /// Token last persisted to the store, if the key exists at all.
    pub fn read_persisted_token(&self) -> Result<Option<String>> {
        self.persistent.get(TOKEN_KEY)
    }

    /// Whether the deployment's proxy flag cookie is set to `"on"`.
    /// Re-read from the jar on every call — absent or malformed means off.
    pub fn proxy_mode(&self) -> bool {
        self.cookies.get(PROXY_COOKIE).as_deref() == Some("on")
    }

    /// Snapshot of the current in-memory token. `None` when logged out.
    pub fn token(&self) -> Option<String> {
        let state = self.state.lock();
        if state.token.is_empty() {
            None
        } else {
            Some(state.token.clone())
        }
    }

    /// Snapshot of the current in-memory user. `None` when logged out.
    pub fn user(&self) -> Option<Value> {
        self.state.lock().user.clone()
    }
}
