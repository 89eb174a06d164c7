//! Login, renewal, signup, startup validation, and logout orchestration.
//!
//! The controller walks a small state machine — Anonymous →
//! Authenticating → Authenticated → Anonymous — where renewal reuses the
//! Authenticating transition and is never separately observable. It is
//! the only caller of the transport, and the only component that pairs
//! the token codec with the session store.
//!
//! No retries, no timeouts, no cancellation live at this layer: every
//! network operation runs to completion or failure and every failure is
//! surfaced to the caller immediately.

use std::sync::Arc;

use reqwest::StatusCode;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::obfuscate;
use crate::session::{Navigator, SessionStore};
use crate::token;

/// Client-side authentication-session controller.
pub struct AuthClient {
    config: AuthConfig,
    http: reqwest::Client,
    store: SessionStore,
    navigator: Arc<dyn Navigator>,
}

impl AuthClient {
    pub fn new(
        config: AuthConfig,
        store: SessionStore,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            config,
            http,
            store,
            navigator,
        })
    }

    /// The session store backing this client, for readers that want
    /// current token/user snapshots.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    // ── Login ────────────────────────────────────────────────────

    /// Exchange credentials for a session token and commit it.
    ///
    /// When legacy obfuscation is configured on AND the deployment's
    /// `pyproxy` cookie reads `"on"` (re-checked on every attempt), the
    /// credentials travel base64-obfuscated in the `Authorization` header.
    /// Otherwise they go as a plain JSON body — the default — with a
    /// logged warning that they are unobfuscated on the wire.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        captcha: &str,
    ) -> Result<(), AuthError> {
        // the cookie alone never turns obfuscation on; deployments opt in
        let proxy = self.config.legacy_obfuscation && self.store.proxy_mode();

        let url = self.config.endpoint("login");
        let request = if proxy {
            self.http
                .post(&url)
                .header("Content-Type", "application/json")
                .header(
                    "Authorization",
                    obfuscate::obfuscated_credentials(username, password, captcha),
                )
        } else {
            tracing::warn!("proxy obfuscation is off; credentials travel as plain JSON");
            self.http.post(&url).json(&serde_json::json!({
                "username": username,
                "password": password,
                "recaptcha": captcha,
            }))
        };

        let resp = request.send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if status == StatusCode::OK {
            self.accept_token(&body)
        } else {
            Err(AuthError::Login {
                status: status.as_u16(),
                message: status_message(status, body),
            })
        }
    }

    // ── Renewal ──────────────────────────────────────────────────

    /// Trade an existing token for a fresh one and commit it.
    ///
    /// On failure the previously committed session is left untouched:
    /// a failed renewal is not a logout, and the stale session stands
    /// until an explicit logout or a later successful renew.
    pub async fn renew(&self, token: &str) -> Result<(), AuthError> {
        let resp = self
            .http
            .post(self.config.endpoint("renew"))
            .header("X-Auth", token)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if status == StatusCode::OK {
            self.accept_token(&body)
        } else {
            Err(AuthError::Renew {
                status: status.as_u16(),
                message: status_message(status, body),
            })
        }
    }

    // ── Signup ───────────────────────────────────────────────────

    /// Create an account. Never logs the user in and never touches
    /// session state, success or failure.
    pub async fn signup(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let resp = self
            .http
            .post(self.config.endpoint("signup"))
            .json(&serde_json::json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await?;

        let status = resp.status();
        if status == StatusCode::OK {
            Ok(())
        } else {
            Err(AuthError::Signup {
                status: status.as_u16(),
            })
        }
    }

    // ── Startup validation ───────────────────────────────────────

    /// Renew the persisted token, if there is one.
    ///
    /// A missing or empty persisted token is not an error — there is
    /// simply no session to validate. A failed renewal is logged as a
    /// warning and then re-raised: whether that forces a logout is the
    /// caller's decision, not this controller's.
    pub async fn validate_on_startup(&self) -> Result<(), AuthError> {
        let Some(persisted) = self.store.read_persisted_token()? else {
            return Ok(());
        };
        if persisted.is_empty() {
            return Ok(());
        }

        if let Err(err) = self.renew(&persisted).await {
            tracing::warn!(error = %err, "stored session token failed renewal");
            return Err(err);
        }
        Ok(())
    }

    // ── Logout ───────────────────────────────────────────────────

    /// Tear the session down and hand off to the navigation collaborator.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.store.clear()?;

        if self.config.auth_disabled {
            self.navigator.reload();
        } else {
            self.navigator.to_login();
        }
        Ok(())
    }

    // ── Internal ─────────────────────────────────────────────────

    /// Shared success path for login and renew: parse the bare token from
    /// the response body, then commit token + user atomically.
    fn accept_token(&self, body: &str) -> Result<(), AuthError> {
        let claims = token::parse(body)?;
        self.store.commit(body, claims.user)?;
        Ok(())
    }
}

/// Error message for a rejected response: the body verbatim when
/// non-empty, else the status line.
fn status_message(status: StatusCode, body: String) -> String {
    if body.is_empty() {
        format!(
            "{} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("")
        )
        .trim_end()
        .to_string()
    } else {
        body
    }
}
