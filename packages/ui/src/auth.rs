//! Session context and hooks for the UI.

use api::{Restored, User};
use dioxus::prelude::*;
use store::TokenStore;

use crate::gate::LOGIN_PATH;
use crate::notice::{use_notice, Notice};

pub const SESSION_EXPIRED: &str = "Session expired, please log in again";

/// Authentication state for the application.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
}

impl AuthState {
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Provider component that restores the session from the token store.
///
/// Needs a [`TokenStore`] and a `Signal<Notice>` in context. An expired
/// stored token clears both tokens and leaves the expiry notice behind.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let tokens = use_context::<TokenStore>();
    let mut notice = use_notice();

    let restored = use_hook(|| api::session::restore(&tokens, api::now_unix()));
    let expired = restored == Restored::Expired;
    use_context_provider(|| {
        Signal::new(AuthState {
            user: match restored {
                Restored::Active(user) => Some(user),
                Restored::Expired | Restored::Anonymous => None,
            },
        })
    });

    use_effect(move || {
        if expired {
            notice.set(Notice::error(SESSION_EXPIRED));
        }
    });

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut auth_state = use_auth();
    let mut notice = use_notice();
    let tokens = use_context::<TokenStore>();
    let nav = use_navigator();

    let onclick = move |_| {
        api::session::end(&tokens);
        auth_state.set(AuthState::default());
        notice.set(Notice::message("Logged out successfully"));
        nav.replace(LOGIN_PATH);
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
