//! The single outcome banner shared by every page.
//!
//! The application root owns one `Signal<Notice>`. Each submission clears it
//! first and then replaces it with the outcome, so the banner only ever shows
//! the last result.

use api::ApiError;
use dioxus::prelude::*;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Notice {
    #[default]
    None,
    Message(String),
    Error(String),
}

impl Notice {
    pub fn message(text: impl Into<String>) -> Self {
        Self::Message(text.into())
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::Error(text.into())
    }

    /// Error notice for a failed call, preferring the server's `detail`.
    pub fn from_api_error(err: &ApiError, fallback: &str) -> Self {
        Self::Error(err.user_message(fallback))
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Message(text) | Self::Error(text) => Some(text),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

pub fn use_notice() -> Signal<Notice> {
    use_context::<Signal<Notice>>()
}

/// Renders the current notice, or nothing.
#[component]
pub fn NoticeBanner() -> Element {
    let notice = use_notice();
    let current = notice();
    let class = if current.is_error() {
        "notice notice-error"
    } else {
        "notice notice-message"
    };

    rsx! {
        if let Some(text) = current.text() {
            div {
                class: "{class}",
                role: "status",
                "{text}"
            }
        }
    }
}
