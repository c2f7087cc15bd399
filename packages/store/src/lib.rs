//! Client-side persistence for the identity console.
//!
//! The console keeps exactly two strings between page loads: the access token
//! and the refresh token returned by the auth API. [`TokenStore`] owns them and
//! writes through a [`KeyValueStore`] backend picked per platform. The same
//! crate also carries the console's [`ConsoleConfig`].

pub mod config;
mod kv;
pub mod tokens;

mod memory;
pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
mod file_store;
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStore;

pub use config::ConsoleConfig;
pub use kv::KeyValueStore;
pub use tokens::{TokenPair, TokenStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
