use crate::{components::toaster::use_toasts, features::auth::state::use_auth};
use leptos_router::hooks::use_navigate;

const CONFIRM_PROMPT: &str = "Are you sure you want to logout?";

/// Returns a handler that asks for confirmation, clears the session and goes
/// home. Declining the prompt changes nothing.
pub fn use_logout() -> impl Fn() + Clone + 'static {
    let auth = use_auth();
    let toasts = use_toasts();
    let navigate = use_navigate();

    move || {
        let confirmed = web_sys::window()
            .and_then(|window| window.confirm_with_message(CONFIRM_PROMPT).ok())
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        auth.sign_out();
        toasts.success("Logged out successfully");
        navigate("/", Default::default());
    }
}
