mod dashboard;
mod forgot_password;
mod home;
mod login;
mod not_found;
mod register;

pub(crate) use dashboard::DashboardPage;
pub(crate) use forgot_password::ForgotPasswordPage;
pub(crate) use home::HomePage;
pub(crate) use login::LoginPage;
pub(crate) use not_found::NotFoundPage;
pub(crate) use register::RegisterPage;

use crate::components::{GuestOnly, RequireAuth};
use leptos::prelude::*;
use leptos_router::components::{Route, Routes};
use leptos_router::path;

pub(crate) mod paths {
    pub use crate::features::auth::guards::{DASHBOARD_PATH as DASHBOARD, LOGIN_PATH as LOGIN};

    pub const HOME: &str = "/";
    pub const REGISTER: &str = "/auth/register";
    pub const FORGOT_PASSWORD: &str = "/auth/forgot-password";
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Routes fallback=|| view! { <NotFoundPage /> }>
            <Route path=path!("/") view=|| view! { <GuestOnly><HomePage /></GuestOnly> } />
            <Route
                path=path!("/auth/register")
                view=|| view! { <GuestOnly><RegisterPage /></GuestOnly> }
            />
            <Route
                path=path!("/auth/login")
                view=|| view! { <GuestOnly><LoginPage /></GuestOnly> }
            />
            <Route
                path=path!("/auth/forgot-password")
                view=|| view! { <GuestOnly><ForgotPasswordPage /></GuestOnly> }
            />
            <Route
                path=path!("/dashboard")
                view=|| view! { <RequireAuth><DashboardPage /></RequireAuth> }
            />
            <Route
                path=path!("/dashboard/*any")
                view=|| view! { <RequireAuth><DashboardPage /></RequireAuth> }
            />
            <Route path=path!("/*any") view=NotFoundPage />
        </Routes>
    }
}
