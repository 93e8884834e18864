//! Browser client for the mentor/mentee platform.
//!
//! The crate splits into a target-independent core and a Leptos view layer
//! that only compiles for `wasm32`:
//!
//! - [`app_lib`]: configuration, HTTP transport, errors, logging, toasts and
//!   view lifetimes shared by every feature.
//! - [`features::auth`]: session persistence, route guard policy, the OTP
//!   challenge state machine, form validation and the backend auth client.
//! - `app`, `components`, `routes` (wasm only): pages and widgets that call
//!   into the core and render its results.
//!
//! All access control is enforced by the backend. Route guards here are UX
//! only and never a security boundary.

#[path = "lib/mod.rs"]
pub mod app_lib;
pub mod features;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod components;
#[cfg(target_arch = "wasm32")]
mod routes;

/// Installs logging and mounts the application on `<body>`.
#[cfg(target_arch = "wasm32")]
pub fn mount() {
    app_lib::telemetry::init();
    leptos::mount::mount_to_body(app::App);
}
