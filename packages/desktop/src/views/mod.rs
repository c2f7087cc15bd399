mod account;
pub use account::{ForgotPassword, Login, ResetPassword, Signup, VerifyEmail};

mod dashboard;
pub use dashboard::Dashboard;
