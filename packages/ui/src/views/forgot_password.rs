use api::ApiClient;
use dioxus::prelude::*;

use crate::notice::{use_notice, Notice};

#[component]
pub fn ForgotPasswordView() -> Element {
    let client = use_context::<ApiClient>();
    let mut notice = use_notice();
    let mut email = use_signal(String::new);
    let mut loading = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        spawn(async move {
            notice.set(Notice::None);
            loading.set(true);
            match client.forgot_password(email().trim()).await {
                Ok(message) => {
                    email.set(String::new());
                    notice.set(Notice::message(message));
                }
                Err(e) => notice.set(Notice::from_api_error(&e, api::fallback::FORGOT_PASSWORD)),
            }
            loading.set(false);
        });
    };

    rsx! {
        div {
            class: "card card-narrow",
            h2 { "Forgot Password" }
            form {
                onsubmit: handle_submit,
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
                button {
                    class: "btn",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Sending..." } else { "Send Reset Link" }
                }
            }
            p {
                Link { to: "/login", "Back to Login" }
            }
        }
    }
}
