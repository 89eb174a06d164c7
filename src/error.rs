//! Error taxonomy for the authentication flows.
//!
//! Every failure is surfaced to the caller immediately — nothing in this
//! crate retries, and nothing downgrades a failure into a silent
//! "logged out" state. The single place that logs before re-raising is
//! startup validation in [`crate::flow::AuthClient::validate_on_startup`].

use thiserror::Error;

/// Errors produced by the login, renew, signup, and token-parsing paths.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token failed structural parsing. Session state is left exactly
    /// as it was before the parse attempt.
    #[error("malformed token: {0}")]
    MalformedToken(String),

    /// The login endpoint answered with a non-200 status. The message is
    /// the response body verbatim when non-empty, else the status line.
    #[error("login rejected ({status}): {message}")]
    Login { status: u16, message: String },

    /// The renew endpoint answered with a non-200 status. Same shape as
    /// [`AuthError::Login`]; the previously committed session survives.
    #[error("renew rejected ({status}): {message}")]
    Renew { status: u16, message: String },

    /// The signup endpoint answered with a non-200 status. Signup never
    /// touches session state, success or failure.
    #[error("signup rejected ({status})")]
    Signup { status: u16 },

    /// Transport-level failure (connection refused, TLS, DNS). Propagated
    /// as-is; this layer has no special handling for it.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// A cookie-jar or persistent-store write failed mid-operation. The
    /// caller must not assume any of the three surfaces were updated.
    #[error("session storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl AuthError {
    /// HTTP status carried by the error, when there is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Login { status, .. }
            | Self::Renew { status, .. }
            | Self::Signup { status } => Some(*status),
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
