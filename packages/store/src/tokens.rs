//! The access/refresh token pair and the store that owns it.

use std::fmt;
use std::sync::Arc;

use crate::kv::KeyValueStore;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Opaque compact tokens issued by the auth API on login.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

impl TokenPair {
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: access.into(),
            refresh: refresh.into(),
        }
    }
}

// Tokens are credentials; keep them out of logs.
impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access", &"<redacted>")
            .field("refresh", &"<redacted>")
            .finish()
    }
}

/// Persists the token pair through a platform [`KeyValueStore`].
///
/// Cloning is cheap and every clone writes to the same backend. Both tokens
/// are written and cleared together. There is no expiry tracking here; an
/// expired access token is only detected when it is decoded.
#[derive(Clone)]
pub struct TokenStore {
    backend: Arc<dyn KeyValueStore>,
}

impl TokenStore {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Overwrite any stored pair.
    pub fn set(&self, pair: &TokenPair) {
        self.backend.set(ACCESS_TOKEN_KEY, &pair.access);
        self.backend.set(REFRESH_TOKEN_KEY, &pair.refresh);
    }

    /// The stored access token. Empty strings count as absent.
    pub fn access(&self) -> Option<String> {
        self.read(ACCESS_TOKEN_KEY)
    }

    /// The stored refresh token. Empty strings count as absent.
    pub fn refresh(&self) -> Option<String> {
        self.read(REFRESH_TOKEN_KEY)
    }

    pub fn clear(&self) {
        self.backend.remove(ACCESS_TOKEN_KEY);
        self.backend.remove(REFRESH_TOKEN_KEY);
    }

    fn read(&self, key: &str) -> Option<String> {
        self.backend.get(key).filter(|value| !value.is_empty())
    }
}

impl fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenStore")
            .field("has_access", &self.access().is_some())
            .finish()
    }
}
