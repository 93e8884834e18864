//! Public landing page. Calls to action depend on whether a session exists.

use crate::{app_lib::build_info, features::auth::state::use_auth, routes::paths};
use leptos::prelude::*;
use leptos_router::components::A;

const PRIMARY_LINK: &str = "inline-flex items-center px-5 py-2.5 text-sm font-medium text-white bg-indigo-600 rounded-lg hover:bg-indigo-700 focus:ring-4 focus:outline-none focus:ring-indigo-300";
const SECONDARY_LINK: &str = "inline-flex items-center px-5 py-2.5 text-sm font-medium text-gray-900 bg-white border border-gray-200 rounded-lg hover:bg-gray-100";

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();
    let signed_in = Memo::new(move |_| auth.is_authenticated());

    view! {
        <div class="min-h-[80vh] flex flex-col">
            <section class="flex-1 flex flex-col items-center justify-center text-center px-4 py-16">
                <h1 class="text-4xl font-extrabold tracking-tight text-gray-900 sm:text-5xl">
                    "Grow faster with the right mentor"
                </h1>
                <p class="mt-4 max-w-2xl text-lg text-gray-600">
                    "Mentees find experienced guides, mentors share what they know. "
                    "Create an account to get matched."
                </p>
                <div class="mt-8 flex flex-col sm:flex-row gap-4">
                    <Show
                        when=move || signed_in.get()
                        fallback=|| {
                            view! {
                                <A href=paths::REGISTER {..} class=PRIMARY_LINK>
                                    "Get started"
                                </A>
                                <A href=paths::LOGIN {..} class=SECONDARY_LINK>
                                    "I already have an account"
                                </A>
                            }
                        }
                    >
                        <A href=paths::DASHBOARD {..} class=PRIMARY_LINK>
                            "Go to Dashboard"
                        </A>
                    </Show>
                </div>
            </section>
            <footer class="py-4 text-center text-xs text-gray-400">
                {build_info::version_label()}
            </footer>
        </div>
    }
}
