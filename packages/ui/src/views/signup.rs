//! Account registration form.

use api::{ApiClient, SignupRequest};
use dioxus::prelude::*;

use crate::notice::{use_notice, Notice};

/// Raw field values as typed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Client-side checks before anything is sent. The API re-validates.
pub fn validate_signup(form: &SignupForm) -> Result<SignupRequest, &'static str> {
    let first_name = form.first_name.trim();
    let last_name = form.last_name.trim();
    let email = form.email.trim();

    if first_name.is_empty() || last_name.is_empty() {
        return Err("First and last name are required");
    }
    if !email.contains('@') {
        return Err("Please enter a valid email");
    }
    if form.password.is_empty() {
        return Err("Password is required");
    }
    if form.password != form.confirm_password {
        return Err("Passwords do not match");
    }

    Ok(SignupRequest {
        email: email.to_string(),
        password: form.password.clone(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
    })
}

#[component]
pub fn SignupView() -> Element {
    let client = use_context::<ApiClient>();
    let mut notice = use_notice();
    let mut form = use_signal(SignupForm::default);
    let mut loading = use_signal(|| false);

    let handle_signup = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        spawn(async move {
            notice.set(Notice::None);

            let request = match validate_signup(&form()) {
                Ok(request) => request,
                Err(msg) => {
                    notice.set(Notice::error(msg));
                    return;
                }
            };

            loading.set(true);
            match client.signup(&request).await {
                Ok(message) => {
                    form.set(SignupForm::default());
                    notice.set(Notice::message(message));
                }
                Err(e) => notice.set(Notice::from_api_error(&e, api::fallback::SIGNUP)),
            }
            loading.set(false);
        });
    };

    rsx! {
        div {
            class: "card card-narrow",
            h2 { "Sign Up" }
            form {
                onsubmit: handle_signup,
                div {
                    class: "field",
                    label { "First Name" }
                    input {
                        r#type: "text",
                        value: form().first_name,
                        oninput: move |evt: FormEvent| form.write().first_name = evt.value(),
                        required: true,
                    }
                }
                div {
                    class: "field",
                    label { "Last Name" }
                    input {
                        r#type: "text",
                        value: form().last_name,
                        oninput: move |evt: FormEvent| form.write().last_name = evt.value(),
                        required: true,
                    }
                }
                div {
                    class: "field",
                    label { "Email" }
                    input {
                        r#type: "email",
                        value: form().email,
                        oninput: move |evt: FormEvent| form.write().email = evt.value(),
                        required: true,
                    }
                }
                div {
                    class: "field",
                    label { "Password" }
                    input {
                        r#type: "password",
                        value: form().password,
                        oninput: move |evt: FormEvent| form.write().password = evt.value(),
                        required: true,
                    }
                }
                div {
                    class: "field",
                    label { "Confirm Password" }
                    input {
                        r#type: "password",
                        value: form().confirm_password,
                        oninput: move |evt: FormEvent| form.write().confirm_password = evt.value(),
                        required: true,
                    }
                }
                button {
                    class: "btn",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Signing up..." } else { "Sign Up" }
                }
            }
            p {
                "Already have an account? "
                Link { to: "/login", "Login" }
            }
        }
    }
}
