//! Shared client utilities for API access, configuration, errors, logging and
//! build metadata.
//!
//! ## Backend contract
//!
//! Every call is a JSON `POST` relative to the configured base URL (which
//! already carries the `/api/v1` prefix):
//!
//! 1. **Login:** `/auth/login/api` returns `access_token` and, usually, the user
//!    profile. The client persists both through the session store.
//! 2. **Register:** `/auth/register/raw` creates the account; the user then
//!    signs in explicitly.
//! 3. **OTP:** `/auth/send-otp`, `/auth/verify-otp` and `/auth/resend-otp`
//!    drive password reset verification.
//!
//! Centralizing these helpers keeps timeouts, headers and error reduction
//! consistent across features. Callers must not log passwords, codes or
//! tokens.

pub mod api;
pub mod build_info;
pub mod config;
pub mod errors;
pub mod lifetime;
pub mod telemetry;
pub mod toast;

pub use api::ApiClient;
pub use config::AppConfig;
pub use errors::AppError;
pub use lifetime::ViewLifetime;
