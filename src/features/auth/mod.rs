//! Auth feature module covering login, registration, password reset by
//! one-time code, session persistence, and route gating. It keeps auth logic
//! out of the UI so it can be tested natively. Passwords and codes travel in
//! request bodies and must never be logged.
//!
//! Flow Overview: Login posts credentials plus the chosen role and persists
//! the returned bearer token with the user's profile. Registration posts the
//! account and sends the user to login. Password reset sends a code to the
//! email address and verifies it; the reset itself happens elsewhere.

pub mod client;
pub mod flows;
pub mod guards;
pub mod otp;
pub mod session;
#[cfg(target_arch = "wasm32")]
pub(crate) mod state;
pub mod storage;
pub mod types;
pub mod validation;
