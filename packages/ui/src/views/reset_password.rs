//! New-password form reached from the emailed reset link.

use api::ApiClient;
use dioxus::prelude::*;
use store::ConsoleConfig;

use crate::gate::LOGIN_PATH;
use crate::notice::{use_notice, Notice};
use crate::platform::sleep_ms;

/// `token` comes from the link's query string; it is forwarded untouched and
/// an empty one is left for the API to reject.
#[component]
pub fn ResetPasswordView(token: String) -> Element {
    let client = use_context::<ApiClient>();
    let config = use_context::<ConsoleConfig>();
    let mut notice = use_notice();
    let nav = use_navigator();
    let mut new_password = use_signal(String::new);
    let mut loading = use_signal(|| false);

    let delay = config.ui.redirect_delay_ms;
    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        let token = token.clone();
        spawn(async move {
            notice.set(Notice::None);
            loading.set(true);
            let result = client.reset_password(&token, &new_password()).await;
            loading.set(false);
            match result {
                Ok(message) => {
                    new_password.set(String::new());
                    notice.set(Notice::message(message));
                    sleep_ms(delay).await;
                    nav.replace(LOGIN_PATH);
                }
                Err(e) => notice.set(Notice::from_api_error(&e, api::fallback::RESET_PASSWORD)),
            }
        });
    };

    rsx! {
        div {
            class: "card card-narrow",
            h2 { "Reset Password" }
            form {
                onsubmit: handle_submit,
                div {
                    class: "field",
                    label { "New Password" }
                    input {
                        r#type: "password",
                        value: new_password(),
                        oninput: move |evt: FormEvent| new_password.set(evt.value()),
                        required: true,
                    }
                }
                button {
                    class: "btn",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Resetting..." } else { "Reset Password" }
                }
            }
            p {
                Link { to: LOGIN_PATH, "Back to Login" }
            }
        }
    }
}
