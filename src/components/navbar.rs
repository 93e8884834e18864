//! Top navigation. Identity is re-read from storage on every location change
//! and whenever the session revision moves, so sign-ins and sign-outs in
//! other tabs show up without a reload.

use crate::{components::logout::use_logout, features::auth::state::use_auth};
use leptos::prelude::*;
use leptos_router::{components::A, hooks::use_location};

const LINK_CLASS: &str =
    "px-3 py-2 rounded-md text-sm font-medium text-gray-700 hover:text-gray-900 hover:bg-gray-50";
const MOBILE_LINK_CLASS: &str =
    "block px-3 py-2 rounded-md text-base font-medium text-gray-700 hover:text-gray-900 hover:bg-gray-50";

#[component]
pub fn Navbar() -> impl IntoView {
    let auth = use_auth();
    let location = use_location();
    let (menu_open, set_menu_open) = signal(false);
    let logout = StoredValue::new_local(use_logout());

    let identity = {
        let auth = auth.clone();
        Memo::new(move |_| {
            location.pathname.track();
            auth.is_authenticated().then(|| auth.profile())
        })
    };
    let signed_in = move || identity.get().is_some();
    let profile = move || identity.get().flatten();

    // Navigating anywhere closes the menu.
    Effect::new(move |_| {
        location.pathname.track();
        set_menu_open.set(false);
    });

    let on_logout = move |_| {
        set_menu_open.set(false);
        logout.with_value(|logout| logout());
    };

    view! {
        <nav class="bg-white shadow-md">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between h-16">
                    <div class="flex-shrink-0 flex items-center">
                        <A href="/" {..} class="text-xl font-bold text-indigo-600">
                            "Mentor-Mentee"
                        </A>
                    </div>

                    <div class="hidden sm:ml-6 sm:flex sm:items-center sm:space-x-4">
                        <A href="/" {..} class=LINK_CLASS>
                            "Home"
                        </A>
                        <Show
                            when=signed_in
                            fallback=|| {
                                view! {
                                    <A href="/auth/login" {..} class=LINK_CLASS>
                                        "Login"
                                    </A>
                                    <A
                                        href="/auth/register"
                                        {..}
                                        class="px-3 py-2 rounded-md text-sm font-medium text-indigo-600 border border-indigo-600 hover:bg-indigo-50"
                                    >
                                        "Register"
                                    </A>
                                }
                            }
                        >
                            <A href="/dashboard" {..} class=LINK_CLASS>
                                "Dashboard"
                            </A>
                            <div class="relative ml-3">
                                <button
                                    type="button"
                                    class=LINK_CLASS
                                    aria-expanded=move || menu_open.get().to_string()
                                    on:click=move |_| set_menu_open.update(|open| *open = !*open)
                                >
                                    {move || {
                                        profile()
                                            .map(|profile| profile.name)
                                            .unwrap_or_else(|| "Account".to_string())
                                    }}
                                    " ▼"
                                </button>
                                <Show when=move || menu_open.get()>
                                    <div class="origin-top-right absolute right-0 mt-2 w-56 rounded-md shadow-lg py-1 bg-white ring-1 ring-black/5 z-10">
                                        {move || {
                                            profile()
                                                .map(|profile| {
                                                    view! {
                                                        <p class="block px-4 py-2 text-sm text-gray-700 border-b">
                                                            <span class="font-bold">{profile.email}</span>
                                                            <br />
                                                            <span class="text-xs text-gray-500 capitalize">
                                                                "Role: "
                                                                {profile.role.as_str()}
                                                            </span>
                                                        </p>
                                                    }
                                                })
                                        }}
                                        <button
                                            type="button"
                                            class="block w-full text-left px-4 py-2 text-sm text-red-600 hover:bg-gray-100"
                                            on:click=on_logout
                                        >
                                            "Logout"
                                        </button>
                                    </div>
                                </Show>
                            </div>
                        </Show>
                    </div>

                    <div class="flex items-center sm:hidden">
                        <button
                            type="button"
                            class="inline-flex items-center justify-center p-2 rounded-md text-gray-400 hover:text-gray-500 hover:bg-gray-100 focus:outline-none"
                            aria-expanded=move || menu_open.get().to_string()
                            on:click=move |_| set_menu_open.update(|open| *open = !*open)
                        >
                            <span class="sr-only">"Open main menu"</span>
                            <svg
                                class="h-6 w-6"
                                xmlns="http://www.w3.org/2000/svg"
                                fill="none"
                                viewBox="0 0 24 24"
                                stroke="currentColor"
                            >
                                <path
                                    stroke-linecap="round"
                                    stroke-linejoin="round"
                                    stroke-width="2"
                                    d=move || {
                                        if menu_open.get() {
                                            "M6 18L18 6M6 6l12 12"
                                        } else {
                                            "M4 6h16M4 12h16M4 18h16"
                                        }
                                    }
                                ></path>
                            </svg>
                        </button>
                    </div>
                </div>
            </div>

            <Show when=move || menu_open.get()>
                <div class="sm:hidden pt-2 pb-3 space-y-1">
                    <A href="/" {..} class=MOBILE_LINK_CLASS>
                        "Home"
                    </A>
                    <Show
                        when=signed_in
                        fallback=|| {
                            view! {
                                <A href="/auth/login" {..} class=MOBILE_LINK_CLASS>
                                    "Login"
                                </A>
                                <A href="/auth/register" {..} class=MOBILE_LINK_CLASS>
                                    "Register"
                                </A>
                            }
                        }
                    >
                        <A href="/dashboard" {..} class=MOBILE_LINK_CLASS>
                            "Dashboard"
                        </A>
                        {move || {
                            profile()
                                .map(|profile| {
                                    view! {
                                        <div class="px-3 py-2 text-base font-medium text-gray-700">
                                            <p class="font-semibold">{profile.name}</p>
                                            <p class="text-xs text-gray-500">{profile.email}</p>
                                            <p class="text-xs text-gray-500 capitalize">
                                                "Role: "
                                                {profile.role.as_str()}
                                            </p>
                                        </div>
                                    }
                                })
                        }}
                        <button
                            type="button"
                            class="block w-full text-left px-3 py-2 rounded-md text-base font-medium text-red-600 hover:bg-gray-50"
                            on:click=on_logout
                        >
                            "Logout"
                        </button>
                    </Show>
                </div>
            </Show>
        </nav>
    }
}
