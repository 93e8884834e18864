use crate::{
    components::{use_logout, Button, ButtonStyle},
    features::auth::state::use_auth,
};
use leptos::prelude::*;

/// Signed-in landing page. The profile card is omitted when no profile was
/// stored with the token.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let profile = Memo::new(move |_| auth.profile());
    let logout = StoredValue::new_local(use_logout());
    let on_logout = Callback::new(move |()| logout.with_value(|logout| logout()));

    view! {
        <div class="flex flex-col items-center justify-center min-h-screen p-4">
            <div class="bg-white shadow-md rounded-lg p-6 w-full max-w-3xl">
                <div class="flex justify-between items-center mb-6">
                    <h1 class="text-2xl font-bold">"Dashboard"</h1>
                    <div class="w-32">
                        <Button style=ButtonStyle::Danger on_click=on_logout>
                            "Logout"
                        </Button>
                    </div>
                </div>

                {move || {
                    profile
                        .get()
                        .map(|profile| {
                            view! {
                                <div class="mb-6 p-4 bg-gray-50 rounded-lg">
                                    <h2 class="text-lg font-semibold mb-2">"User Information"</h2>
                                    <p>
                                        <strong>"Name: "</strong>
                                        {profile.name}
                                    </p>
                                    <p>
                                        <strong>"Email: "</strong>
                                        {profile.email}
                                    </p>
                                    <p>
                                        <strong>"Role: "</strong>
                                        {profile.role.label()}
                                    </p>
                                </div>
                            }
                        })
                }}

                <div class="text-center mt-8">
                    <p class="text-xl">"Welcome to your dashboard!"</p>
                    <p class="text-gray-600 mt-2">"You are now logged in to the application."</p>
                </div>
            </div>
        </div>
    }
}
