use crate::components::{Navbar, ToastProvider, Toaster};
use crate::features::auth::state::AuthProvider;
use crate::routes::AppRoutes;
use leptos::prelude::*;
use leptos_router::components::Router;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <AuthProvider>
            <ToastProvider>
                <Router>
                    <div class="min-h-screen">
                        <Navbar />
                        <main class="pt-2">
                            <AppRoutes />
                        </main>
                    </div>
                    <Toaster />
                </Router>
            </ToastProvider>
        </AuthProvider>
    }
}
