//! # Console configuration: `console.toml`
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8000/api/auth"
//!
//! [ui]
//! redirect_delay_ms = 2000
//! ```
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`ConsoleConfig`] | Top-level config with TOML (de)serialisation and the canonical filename. |
//! | [`ApiConfig`] | Base URL of the auth API every request is issued against. |
//! | [`UiConfig`] | Delay before the reset-password and verify-email pages send the user to login. |
//!
//! Every field has a default, so a missing or partial file is equivalent to the
//! default configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/auth";

/// Top-level configuration stored in `console.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Milliseconds between a successful reset/verification and the redirect
    /// to the login page.
    #[serde(default = "default_redirect_delay")]
    pub redirect_delay_ms: u64,
}

fn default_redirect_delay() -> u64 {
    2000
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            redirect_delay_ms: default_redirect_delay(),
        }
    }
}

impl ConsoleConfig {
    /// Builder method to point the console at another API.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "console.toml"
    }

    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Read `path`, falling back to defaults when the file is missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("Failed to read {}: {}", path.display(), e);
                }
                return Self::default();
            }
        };
        Self::from_toml(&content).unwrap_or_else(|e| {
            tracing::warn!("Invalid config {}, using defaults: {}", path.display(), e);
            Self::default()
        })
    }

    /// `<config_dir>/lims-console/console.toml` on platforms that have one.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<std::path::PathBuf> {
        Some(dirs::config_dir()?.join("lims-console").join(Self::filename()))
    }
}
