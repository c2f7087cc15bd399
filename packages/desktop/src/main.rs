use dioxus::prelude::*;
use views::{Dashboard, ForgotPassword, Login, ResetPassword, Signup, VerifyEmail};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
        #[route("/")]
        Root {},
        #[route("/signup")]
        Signup {},
        #[route("/login")]
        Login {},
        #[route("/forgot-password")]
        ForgotPassword {},
        #[route("/reset-password?:token")]
        ResetPassword { token: String },
        #[route("/verify-email?:token")]
        VerifyEmail { token: String },
        #[route("/dashboard")]
        Dashboard {},
        #[route("/:..segments")]
        NotFound { segments: Vec<String> },
}

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    // Desktop reads console.toml from the platform config dir; tokens go to
    // a file under the data dir.
    let config = use_context_provider(ui::load_config);
    use_context_provider(|| {
        tracing::info!("Using auth API at {}", config.api.base_url);
        api::ApiClient::new(config.api.base_url.clone())
    });
    use_context_provider(ui::make_token_store);
    use_context_provider(|| Signal::new(ui::Notice::default()));

    rsx! {
        ui::ConsoleStyles {}
        ui::AuthProvider {
            Router::<Route> {}
        }
    }
}

#[component]
fn Shell() -> Element {
    rsx! {
        ui::Navbar {}
        div {
            class: "content",
            ui::NoticeBanner {}
            Outlet::<Route> {}
        }
    }
}

#[component]
fn Root() -> Element {
    let auth = ui::use_auth();
    let nav = use_navigator();

    // Redirect based on auth state
    nav.replace(ui::landing(auth().user.as_ref()));

    rsx! {}
}

#[component]
fn NotFound(segments: Vec<String>) -> Element {
    let nav = use_navigator();
    tracing::debug!("No page at /{}, redirecting to login", segments.join("/"));
    nav.replace(Route::Login {});
    rsx! {}
}
