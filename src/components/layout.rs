use leptos::prelude::*;

/// Centered card on a dark gradient, shared by the auth pages.
#[component]
pub fn AuthLayout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen flex items-center justify-center bg-gradient-to-br from-indigo-900 to-gray-900 p-6">
            <div class="relative w-full max-w-md bg-white/90 p-8 rounded-lg shadow-lg backdrop-blur-md">
                {children()}
            </div>
        </div>
    }
}
