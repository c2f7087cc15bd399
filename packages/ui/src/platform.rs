//! Platform plumbing shared by the web and desktop shells.
//!
//! - **Web** (WASM + `web` feature): tokens in `localStorage` via
//!   [`store::LocalStore`], API base URL from `LIMS_API_BASE_URL` at build time.
//! - **Desktop** (native): tokens in a JSON file via [`store::FileStore`],
//!   config read from `<config_dir>/lims-console/console.toml`.

use std::time::Duration;

use store::{ConsoleConfig, TokenStore};

/// Create the platform-appropriate token store.
pub fn make_token_store() -> TokenStore {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        TokenStore::new(store::LocalStore::new())
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        TokenStore::new(store::MemoryStore::new())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        TokenStore::new(store::FileStore::in_data_dir())
    }
}

/// Load the console configuration for this platform.
pub fn load_config() -> ConsoleConfig {
    #[cfg(target_arch = "wasm32")]
    {
        match option_env!("LIMS_API_BASE_URL") {
            Some(url) if !url.is_empty() => ConsoleConfig::default().with_base_url(url),
            _ => ConsoleConfig::default(),
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        match ConsoleConfig::default_path() {
            Some(path) => ConsoleConfig::load_or_default(&path),
            None => ConsoleConfig::default(),
        }
    }
}

/// Wait `ms` milliseconds on the renderer's executor.
pub async fn sleep_ms(ms: u64) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(Duration::from_millis(ms)).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(Duration::from_millis(ms)).await;
}
