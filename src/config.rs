//! Authentication client configuration.

/// Configuration for the auth flows.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// API base URL (e.g., `https://files.example.com`). Endpoint paths
    /// (`/api/login` etc.) are appended to this.
    pub base_url: String,
    /// Deployment runs with authentication disabled entirely: logout
    /// reloads the current view instead of navigating to a login route.
    pub auth_disabled: bool,
    /// Honor the legacy `pyproxy` cookie and send obfuscated credentials
    /// when it is `"on"`. Off by default — plain JSON over TLS is the
    /// default login path, and the obfuscation scheme exists only for
    /// legacy proxy deployments that still expect it.
    pub legacy_obfuscation: bool,
}

impl AuthConfig {
    /// Config with defaults: auth enabled, legacy obfuscation off.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth_disabled: false,
            legacy_obfuscation: false,
        }
    }

    /// Load from environment variables. Returns `None` when
    /// `LATCHKEY_BASE_URL` is unset or empty.
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var("LATCHKEY_BASE_URL").ok()?;
        if base_url.is_empty() {
            return None;
        }

        Some(Self {
            base_url,
            auth_disabled: env_flag("LATCHKEY_NO_AUTH"),
            legacy_obfuscation: env_flag("LATCHKEY_LEGACY_OBFUSCATION"),
        })
    }

    /// Absolute URL for one of the `/api/*` auth endpoints.
    pub(crate) fn endpoint(&self, name: &str) -> String {
        format!("{}/api/{}", self.base_url.trim_end_matches('/'), name)
    }
}

fn env_flag(name: &str) -> bool {
    matches!(
        std::env::var(name).as_deref(),
        Ok("1") | Ok("true") | Ok("on") | Ok("yes")
    )
}
