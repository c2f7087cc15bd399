//! Page views shared by the web and desktop shells. Each platform wraps them
//! in its own `Route` enum.

mod signup;
pub use signup::{validate_signup, SignupForm, SignupView};

mod login;
pub use login::LoginView;

mod forgot_password;
pub use forgot_password::ForgotPasswordView;

mod reset_password;
pub use reset_password::ResetPasswordView;

mod verify_email;
pub use verify_email::VerifyEmailView;

mod admin_dashboard;
pub use admin_dashboard::AdminDashboardView;
