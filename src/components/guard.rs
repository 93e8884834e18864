//! Route wrappers applying the guard policy from `features::auth::guards`.
//! Decisions are recomputed on every location or session change; a redirect
//! replaces the history entry and carries the attempted location as state.

use crate::features::auth::{
    guards::{self, GuardDecision, GuardKind},
    state::use_auth,
};
use leptos::prelude::*;
use leptos_router::{
    hooks::{use_location, use_navigate},
    location::State,
    NavigateOptions,
};
use wasm_bindgen::JsValue;

fn guarded(kind: GuardKind, children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let location = use_location();

    let decision = Memo::new(move |_| {
        guards::evaluate(
            kind,
            auth.is_authenticated(),
            &location.pathname.get(),
            &location.search.get(),
        )
    });

    Effect::new(move |_| {
        if let GuardDecision::Redirect { to, from } = decision.get() {
            navigate(
                to,
                NavigateOptions {
                    replace: true,
                    state: State::new(Some(JsValue::from_str(&from))),
                    ..Default::default()
                },
            );
        }
    });

    move || decision.get().renders().then(|| children())
}

/// Login, register and forgot-password. Signed-in users go to the dashboard
/// unless the URL carries `?force=true`.
#[component]
pub fn GuestOnly(children: ChildrenFn) -> impl IntoView {
    guarded(GuardKind::GuestOnly, children)
}

/// Pages that need a session; anonymous users go to login.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    guarded(GuardKind::AuthRequired, children)
}
