use dioxus::prelude::*;

use crate::auth::{use_auth, LogoutButton};
use crate::gate::{DASHBOARD_PATH, LOGIN_PATH};

/// Top bar: who is signed in and where they can go.
#[component]
pub fn Navbar() -> Element {
    let auth = use_auth();
    let state = auth();

    rsx! {
        nav {
            class: "navbar",
            Link { class: "navbar-brand", to: "/", "LIMS" }
            div {
                class: "navbar-links",
                if let Some(user) = state.user.as_ref() {
                    span { class: "navbar-welcome", "Welcome, User ID: {user.id}" }
                    if user.is_admin() {
                        Link { to: DASHBOARD_PATH, "Admin Dashboard" }
                    }
                    LogoutButton { class: "btn btn-danger" }
                } else {
                    Link { to: LOGIN_PATH, "Login" }
                    Link { class: "btn btn-success", to: "/signup", "Sign Up" }
                }
            }
        }
    }
}
