//! Errors surfaced by calls against the auth API.

use serde::Deserialize;

/// Why an API call did not produce its success payload.
///
/// Pages never show these variants directly; they call
/// [`ApiError::user_message`] with the operation's fallback text.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// No response arrived (connection refused, DNS, CORS, aborted).
    #[error("request failed: {0}")]
    Transport(String),
    /// The server answered with a non-success status.
    #[error("server responded with status {status}")]
    Server { status: u16, detail: Option<String> },
    /// A success status whose body did not have the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
    /// Login succeeded but the access token carries no readable claims.
    #[error("access token could not be decoded")]
    InvalidToken,
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

impl ApiError {
    /// Build a `Server` error from a failed response, keeping `detail` only
    /// when it is a plain string.
    pub(crate) fn from_status(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.detail)
            .and_then(|d| match d {
                serde_json::Value::String(s) if !s.is_empty() => Some(s),
                _ => None,
            });
        Self::Server { status, detail }
    }

    /// The text shown to the user: the server's `detail` when present,
    /// otherwise the operation's fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Server {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => fallback.to_string(),
        }
    }

    /// HTTP status when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Transport(e.to_string())
        }
    }
}

/// Fallback texts shown when the server gives no usable `detail`.
pub mod fallback {
    pub const SIGNUP: &str = "Signup failed";
    pub const LOGIN: &str = "Login failed";
    pub const FORGOT_PASSWORD: &str = "Failed to send reset link";
    pub const RESET_PASSWORD: &str = "Password reset failed";
    pub const VERIFY_EMAIL: &str = "Verification failed";
    pub const FETCH_DASHBOARD: &str = "Failed to fetch data";
    pub const APPROVE: &str = "Approval failed";
    pub const ASSIGN_ROLE: &str = "Role assignment failed";
    pub const ASSIGN_GROUP: &str = "Group assignment failed";
    pub const REVOKE_SESSIONS: &str = "Session revocation failed";
}
