//! This crate contains all shared UI for the console: the session context,
//! the notice banner, the route gate and every page.

mod platform;
pub use platform::{load_config, make_token_store, sleep_ms};

mod navbar;
pub use navbar::Navbar;

mod auth;
pub use auth::{use_auth, AuthProvider, AuthState, LogoutButton, SESSION_EXPIRED};

pub mod notice;
pub use notice::{use_notice, Notice, NoticeBanner};

pub mod gate;
pub use gate::{gate, landing, Gate, Gated, Page};

mod theme;
pub use theme::ConsoleStyles;

pub mod views;
