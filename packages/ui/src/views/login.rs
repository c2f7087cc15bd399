//! Login form with a role picker fed by the roles-for-email lookup.

use api::{ApiClient, LoginRequest};
use dioxus::prelude::*;
use store::TokenStore;

use crate::auth::{use_auth, AuthState};
use crate::gate::landing;
use crate::notice::{use_notice, Notice};

#[component]
pub fn LoginView() -> Element {
    let client = use_context::<ApiClient>();
    let tokens = use_context::<TokenStore>();
    let mut auth = use_auth();
    let mut notice = use_notice();
    let nav = use_navigator();

    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut role = use_signal(String::new);
    let mut loading = use_signal(|| false);

    // Re-queried whenever the email changes.
    let lookup = client.clone();
    let roles = use_resource(move || {
        let client = lookup.clone();
        async move {
            let email = email().trim().to_string();
            if email.is_empty() {
                return Vec::new();
            }
            client.roles_for_email(&email).await
        }
    });
    let role_options = roles.cloned().unwrap_or_default();

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        let tokens = tokens.clone();
        spawn(async move {
            notice.set(Notice::None);
            loading.set(true);

            let request = LoginRequest::password(email().trim(), password(), role());
            let outcome = match client.login(&request).await {
                Ok(pair) => api::session::establish(&tokens, &pair),
                Err(e) => Err(e),
            };
            loading.set(false);

            match outcome {
                Ok(user) => {
                    let target = landing(Some(&user));
                    auth.set(AuthState { user: Some(user) });
                    password.set(String::new());
                    notice.set(Notice::message("Login successful"));
                    nav.replace(target);
                }
                Err(e) => notice.set(Notice::from_api_error(&e, api::fallback::LOGIN)),
            }
        });
    };

    rsx! {
        div {
            class: "card card-narrow",
            h2 { "Login" }
            form {
                onsubmit: handle_login,
                div {
                    class: "field",
                    label { "Email" }
                    input {
                        r#type: "email",
                        value: email(),
                        oninput: move |evt: FormEvent| email.set(evt.value()),
                        required: true,
                    }
                }
                div {
                    class: "field",
                    label { "Password" }
                    input {
                        r#type: "password",
                        value: password(),
                        oninput: move |evt: FormEvent| password.set(evt.value()),
                        required: true,
                    }
                }
                div {
                    class: "field",
                    label { "Role" }
                    select {
                        value: role(),
                        onchange: move |evt: FormEvent| role.set(evt.value()),
                        required: true,
                        option { value: "", "Select a role" }
                        for name in role_options {
                            option { key: "{name}", value: "{name}", "{name}" }
                        }
                    }
                }
                button {
                    class: "btn",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Logging in..." } else { "Login" }
                }
            }
            p {
                Link { to: "/signup", "Sign Up" }
                " | "
                Link { to: "/forgot-password", "Forgot Password" }
            }
        }
    }
}
