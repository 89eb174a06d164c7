//! Storage and navigation seams for the session surfaces.
//!
//! The original deployment keeps the session on three browser surfaces: a
//! cookie, a persistent key-value store, and in-memory application state.
//! Here each external surface is a trait so embedders can bind their own
//! backing (a real cookie jar, a file, a keychain); the in-memory
//! implementations below double as the test doubles and as the default
//! for hosts that keep everything in-process.

pub mod store;

pub use store::SessionStore;

use anyhow::Result;
use parking_lot::Mutex;
use std::collections::HashMap;

// ── Cookie jar ───────────────────────────────────────────────────

/// A single cookie write with the attributes this crate cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCookie {
    pub name: String,
    pub value: String,
    pub path: String,
    pub secure: bool,
    /// `Some(0)` expires the cookie immediately; `None` leaves it with
    /// session expiry (gone when the agent session ends).
    pub max_age: Option<u32>,
}

impl SetCookie {
    /// A secure, root-path session cookie.
    pub fn session(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            path: "/".to_string(),
            secure: true,
            max_age: None,
        }
    }

    /// An immediate-expiry write that removes the named cookie.
    pub fn expired(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: String::new(),
            path: "/".to_string(),
            secure: true,
            max_age: Some(0),
        }
    }
}

/// Read/write access to the host's cookie jar.
pub trait CookieJar: Send + Sync {
    /// Value of the named cookie, if present and not expired.
    fn get(&self, name: &str) -> Option<String>;
    /// Apply a cookie write.
    fn set(&self, cookie: SetCookie) -> Result<()>;
}

/// Key-value store that outlives the process session (the original
/// deployment's `localStorage`).
pub trait PersistentStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Post-logout navigation collaborator.
pub trait Navigator: Send + Sync {
    /// Navigate to the login route.
    fn to_login(&self);
    /// Full reload of the current view (used when auth is disabled
    /// deployment-wide and there is no login route to go to).
    fn reload(&self);
}

// ── In-memory implementations ────────────────────────────────────

/// In-memory cookie jar.
#[derive(Default)]
pub struct MemoryCookieJar {
    cookies: Mutex<HashMap<String, SetCookie>>,
}

impl MemoryCookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored cookie, including expired ones. Lets tests distinguish
    /// "expired by logout" from "never written".
    pub fn cookie(&self, name: &str) -> Option<SetCookie> {
        self.cookies.lock().get(name).cloned()
    }
}

impl CookieJar for MemoryCookieJar {
    fn get(&self, name: &str) -> Option<String> {
        self.cookies
            .lock()
            .get(name)
            .filter(|c| c.max_age != Some(0))
            .map(|c| c.value.clone())
    }

    fn set(&self, cookie: SetCookie) -> Result<()> {
        self.cookies.lock().insert(cookie.name.clone(), cookie);
        Ok(())
    }
}

/// In-memory persistent store.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the key exists at all (a present-but-empty value is
    /// distinct from an absent key — see [`SessionStore::clear`]).
    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().contains_key(key)
    }
}

impl PersistentStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Navigation event recorded by [`RecordingNavigator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    ToLogin,
    Reload,
}

/// Navigator that records what it was asked to do.
#[derive(Default)]
pub struct RecordingNavigator {
    events: Mutex<Vec<NavEvent>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<NavEvent> {
        self.events.lock().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn to_login(&self) {
        self.events.lock().push(NavEvent::ToLogin);
    }

    fn reload(&self) {
        self.events.lock().push(NavEvent::Reload);
    }
}
