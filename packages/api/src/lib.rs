//! # API crate: client side of the LIMS identity API
//!
//! Everything the console knows about authentication lives here: how to talk
//! to the remote auth API, how to read the claims out of an access token, how
//! a session is derived from the token store, and how the admin dashboard
//! keeps its lists in step with the server. No UI code; the `ui` crate drives
//! these types from Dioxus components.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`ApiClient`] for the public endpoints and [`AdminClient`] for the bearer-authenticated ones |
//! | [`claims`] | Unverified token payload decoding and expiry classification |
//! | [`session`] | [`User`] derived from claims; restore / establish / end against the token store |
//! | [`admin`] | [`AdminApi`] seam, the dashboard [`WorkingSet`] and [`AdminAction`]s |
//! | [`models`] | Request and response bodies |
//! | [`error`] | [`ApiError`] and the per-operation fallback messages |
//!
//! The client never verifies token signatures and never refreshes tokens.
//! Whatever it decides from claims is advisory; the API enforces access on
//! every request.

pub mod admin;
pub mod claims;
pub mod client;
pub mod error;
pub mod models;
pub mod session;
mod time;

pub use admin::{parse_user_id, AdminAction, AdminApi, Cached, Lists, Snapshot, WorkingSet};
pub use claims::{decode_claims, inspect_token, Claims, TokenStatus};
pub use client::{AdminClient, ApiClient};
pub use error::{fallback, ApiError};
pub use models::{AuditLog, Group, LoginRequest, PendingUser, SignupRequest, DEFAULT_LOGIN_ROLE};
pub use session::{Restored, User, ADMIN_ROLE};
pub use time::now_unix;
