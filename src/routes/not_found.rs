//! Fallback for unknown routes.

use crate::routes::paths;
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[50vh] text-center px-4">
            <div class="relative">
                <h1 class="text-9xl font-black text-gray-100 select-none">"404"</h1>
                <p class="absolute top-1/2 left-1/2 -translate-x-1/2 -translate-y-1/2 text-2xl font-bold text-gray-900 whitespace-nowrap">
                    "Page not found"
                </p>
            </div>
            <p class="mt-4 text-gray-500 max-w-sm mx-auto">
                "The page you are looking for does not exist or has moved."
            </p>
            <div class="mt-6 flex flex-col sm:flex-row items-center justify-center gap-4">
                <A
                    href=paths::HOME
                    {..}
                    class="inline-flex items-center px-5 py-2.5 text-sm font-medium text-white bg-indigo-600 rounded-lg hover:bg-indigo-700"
                >
                    "Go Home"
                </A>
                <button
                    type="button"
                    class="inline-flex items-center px-5 py-2.5 text-sm font-medium text-gray-900 bg-white border border-gray-200 rounded-lg hover:bg-gray-100"
                    on:click=move |_| {
                        if let Some(history) = web_sys::window().and_then(|window| window.history().ok()) {
                            let _ = history.back();
                        }
                    }
                >
                    "Go Back"
                </button>
            </div>
        </div>
    }
}
