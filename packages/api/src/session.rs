//! # Session model
//!
//! A [`User`] is the in-memory view of whoever the stored access token says
//! is logged in. It is never persisted; it is rebuilt from the token on start
//! ([`restore`]) and after login ([`establish`]), and dropped on logout
//! ([`end`]).
//!
//! Roles and groups come from unverified claims. They decide what the console
//! shows, not what the API allows.

use store::{TokenPair, TokenStore};

use crate::claims::{decode_claims, inspect_token, Claims, TokenStatus};
use crate::error::ApiError;

/// Role that unlocks the admin dashboard.
pub const ADMIN_ROLE: &str = "Admin";

/// The authenticated user as far as the client can tell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub roles: Vec<String>,
    pub groups: Vec<i64>,
}

impl User {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(ADMIN_ROLE)
    }
}

impl From<Claims> for User {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            roles: claims.roles,
            groups: claims.groups,
        }
    }
}

/// What the token store yields at application start.
#[derive(Clone, Debug, PartialEq)]
pub enum Restored {
    Active(User),
    /// A readable token whose `exp` has passed. Both tokens were cleared.
    Expired,
    /// No token, or one that does not decode.
    Anonymous,
}

/// Rebuild the session from the stored access token.
pub fn restore(tokens: &TokenStore, now: i64) -> Restored {
    let Some(access) = tokens.access() else {
        return Restored::Anonymous;
    };

    match inspect_token(&access, now) {
        TokenStatus::Valid(claims) => {
            let user = User::from(claims);
            tracing::info!("Restored session for user {}", user.id);
            Restored::Active(user)
        }
        TokenStatus::Expired(claims) => {
            tracing::info!("Stored token for user {} has expired", claims.sub);
            tokens.clear();
            Restored::Expired
        }
        TokenStatus::Invalid => {
            tracing::debug!("Stored access token does not decode; starting anonymous");
            Restored::Anonymous
        }
    }
}

/// Persist a freshly issued pair and derive the session from it.
///
/// The pair is only written when the access token decodes, so a broken login
/// response never leaves unusable tokens behind.
pub fn establish(tokens: &TokenStore, pair: &TokenPair) -> Result<User, ApiError> {
    let claims = decode_claims(&pair.access).ok_or(ApiError::InvalidToken)?;
    tokens.set(pair);
    let user = User::from(claims);
    tracing::info!("Logged in as user {}", user.id);
    Ok(user)
}

/// Forget both tokens.
pub fn end(tokens: &TokenStore) {
    tokens.clear();
    tracing::info!("Session cleared");
}
