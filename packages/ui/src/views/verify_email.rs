use api::ApiClient;
use dioxus::prelude::*;
use store::ConsoleConfig;

use crate::gate::LOGIN_PATH;
use crate::notice::{use_notice, Notice};
use crate::platform::sleep_ms;

/// Confirms the address on mount, then sends the user to login.
#[component]
pub fn VerifyEmailView(token: String) -> Element {
    let client = use_context::<ApiClient>();
    let config = use_context::<ConsoleConfig>();
    let mut notice = use_notice();
    let nav = use_navigator();
    let delay = config.ui.redirect_delay_ms;

    let _verify = use_resource(use_reactive!(|token| {
        let client = client.clone();
        async move {
            notice.set(Notice::None);
            match client.verify_email(&token).await {
                Ok(message) => {
                    notice.set(Notice::message(message));
                    sleep_ms(delay).await;
                    nav.replace(LOGIN_PATH);
                }
                Err(e) => notice.set(Notice::from_api_error(&e, api::fallback::VERIFY_EMAIL)),
            }
        }
    }));

    rsx! {
        div {
            class: "card card-narrow",
            p { "Verifying email..." }
        }
    }
}
