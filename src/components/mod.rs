//! Shared UI components exported for routes and features.

mod guard;
mod layout;
mod logout;
mod navbar;
pub(crate) mod otp_input;
pub(crate) mod toaster;
pub(crate) mod ui;

pub(crate) use guard::{GuestOnly, RequireAuth};
pub(crate) use layout::AuthLayout;
pub(crate) use logout::use_logout;
pub(crate) use navbar::Navbar;
pub(crate) use otp_input::OtpVerification;
pub(crate) use toaster::{use_toasts, ToastProvider, Toaster};
pub(crate) use ui::{Alert, AlertKind, Button, ButtonStyle, PasswordField, Spinner};
