use dioxus::prelude::*;
use ui::views::AdminDashboardView;
use ui::{Gated, Page};

/// Admin dashboard, only for sessions carrying the Admin role.
#[component]
pub fn Dashboard() -> Element {
    rsx! {
        Gated { page: Page::Dashboard, AdminDashboardView {} }
    }
}
