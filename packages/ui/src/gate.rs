//! # Route gate
//!
//! [`gate`] decides, from the current session and a requested path, whether a
//! page renders or the user is sent elsewhere. It is re-run on every render of
//! [`Gated`], which happens on each navigation and each change of the session
//! signal.
//!
//! The gate is advisory. It keeps non-admins away from screens that would only
//! fail, but the claims it reads are unverified and the API checks every
//! request on its own.

use api::User;
use dioxus::prelude::*;

use crate::auth::use_auth;

pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/dashboard";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Signup,
    Login,
    ForgotPassword,
    ResetPassword,
    VerifyEmail,
    Dashboard,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Signup,
        Page::Login,
        Page::ForgotPassword,
        Page::ResetPassword,
        Page::VerifyEmail,
        Page::Dashboard,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Page::Signup => "/signup",
            Page::Login => LOGIN_PATH,
            Page::ForgotPassword => "/forgot-password",
            Page::ResetPassword => "/reset-password",
            Page::VerifyEmail => "/verify-email",
            Page::Dashboard => DASHBOARD_PATH,
        }
    }

    /// Match a location, ignoring the query string, fragment and trailing slash.
    pub fn from_path(path: &str) -> Option<Page> {
        let path = normalize(path);
        Page::ALL.into_iter().find(|page| page.path() == path)
    }

    fn admits(self, user: Option<&User>) -> bool {
        match self {
            Page::Dashboard => user.is_some_and(User::is_admin),
            _ => true,
        }
    }
}

fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gate {
    Render(Page),
    Redirect(&'static str),
}

/// Where `/` leads: the dashboard for admins, login for everyone else.
pub fn landing(user: Option<&User>) -> &'static str {
    if Page::Dashboard.admits(user) {
        DASHBOARD_PATH
    } else {
        LOGIN_PATH
    }
}

pub fn gate(user: Option<&User>, path: &str) -> Gate {
    if normalize(path) == "/" {
        return Gate::Redirect(landing(user));
    }
    match Page::from_path(path) {
        Some(page) if page.admits(user) => Gate::Render(page),
        _ => Gate::Redirect(LOGIN_PATH),
    }
}

/// Render `children` only if the session may see `page`; otherwise replace
/// the location with the gate's redirect.
#[component]
pub fn Gated(page: Page, children: Element) -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let user = auth().user;

    match gate(user.as_ref(), page.path()) {
        Gate::Render(_) => rsx! { {children} },
        Gate::Redirect(target) => {
            tracing::debug!("{} is not available to this session, redirecting to {target}", page.path());
            nav.replace(target);
            rsx! {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(roles: &[&str]) -> User {
        User {
            id: "7".into(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            groups: vec![],
        }
    }

    #[test]
    fn test_dashboard_requires_admin() {
        assert_eq!(gate(None, "/dashboard"), Gate::Redirect("/login"));
        assert_eq!(
            gate(Some(&user(&["Admin"])), "/dashboard"),
            Gate::Render(Page::Dashboard)
        );
        assert_eq!(
            gate(Some(&user(&["Read-Only"])), "/dashboard"),
            Gate::Redirect("/login")
        );
        assert_eq!(gate(Some(&user(&[])), "/dashboard"), Gate::Redirect("/login"));
    }

    #[test]
    fn test_public_pages_always_render() {
        for page in Page::ALL.into_iter().filter(|p| *p != Page::Dashboard) {
            assert_eq!(gate(None, page.path()), Gate::Render(page));
            assert_eq!(gate(Some(&user(&["Admin"])), page.path()), Gate::Render(page));
        }
    }

    #[test]
    fn test_unknown_paths_go_to_login() {
        let admin = user(&["Admin"]);
        for path in ["/admin", "/nope", "/dashboard/extra", "/login/again"] {
            assert_eq!(gate(None, path), Gate::Redirect("/login"), "{path}");
            assert_eq!(gate(Some(&admin), path), Gate::Redirect("/login"), "{path}");
        }
    }

    #[test]
    fn test_root_lands_by_role() {
        assert_eq!(gate(None, "/"), Gate::Redirect("/login"));
        assert_eq!(gate(Some(&user(&["Lab-Tech"])), "/"), Gate::Redirect("/login"));
        assert_eq!(gate(Some(&user(&["Admin"])), "/"), Gate::Redirect("/dashboard"));
    }

    #[test]
    fn test_query_and_trailing_slash_ignored() {
        assert_eq!(
            gate(None, "/reset-password?token=abc"),
            Gate::Render(Page::ResetPassword)
        );
        assert_eq!(gate(None, "/verify-email/"), Gate::Render(Page::VerifyEmail));
        assert_eq!(
            gate(Some(&user(&["Admin"])), "/dashboard#logs"),
            Gate::Render(Page::Dashboard)
        );
    }
}
