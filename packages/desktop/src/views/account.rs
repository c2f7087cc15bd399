//! Public account pages. The gate admits them for every session.

use dioxus::prelude::*;
use ui::views::{ForgotPasswordView, LoginView, ResetPasswordView, SignupView, VerifyEmailView};
use ui::{Gated, Page};

#[component]
pub fn Signup() -> Element {
    rsx! {
        Gated { page: Page::Signup, SignupView {} }
    }
}

#[component]
pub fn Login() -> Element {
    rsx! {
        Gated { page: Page::Login, LoginView {} }
    }
}

#[component]
pub fn ForgotPassword() -> Element {
    rsx! {
        Gated { page: Page::ForgotPassword, ForgotPasswordView {} }
    }
}

#[component]
pub fn ResetPassword(token: String) -> Element {
    rsx! {
        Gated { page: Page::ResetPassword, ResetPasswordView { token } }
    }
}

#[component]
pub fn VerifyEmail(token: String) -> Element {
    rsx! {
        Gated { page: Page::VerifyEmail, VerifyEmailView { token } }
    }
}
