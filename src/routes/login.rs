//! Login route. The role select decides which account type the backend
//! checks the credentials against; a 403 means the email is registered under
//! a different role. The password is checked locally first so obviously bad
//! input never leaves the browser.

use crate::{
    app_lib::{toast::ToastKind, AppError},
    components::{use_toasts, AuthLayout, Button, PasswordField, Spinner},
    features::auth::{
        client::login_failure_message,
        flows::LoginForm,
        state::use_auth,
        types::Role,
        validation::password_message,
    },
    routes::paths,
};
use leptos::{ev::SubmitEvent, prelude::*};
use leptos_router::{components::A, hooks::use_navigate};

const LOADING_MESSAGE: &str = "Logging in...";
const FIELD_CLASS: &str = "w-full p-3 mb-4 border border-gray-300 rounded-lg bg-white focus:ring-2 focus:ring-indigo-500";

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();
    let navigate = use_navigate();
    let (role, set_role) = signal(Role::default());
    let (email, set_email) = signal(String::new());
    let password = RwSignal::new(String::new());
    let password_error = Signal::derive(move || password.with(|password| password_message(password)));

    let login_action = Action::new_local(move |form: &LoginForm| {
        let form = form.clone();
        let auth = auth.clone();
        async move {
            let pending = toasts.loading(LOADING_MESSAGE);
            let result = auth.sign_in(form).await;
            match &result {
                Ok(signed_in) => toasts.resolve(pending, ToastKind::Success, signed_in.message.clone()),
                // Shown inline under the form instead.
                Err(AppError::Validation(_)) => toasts.dismiss(pending),
                Err(err) => toasts.resolve(pending, ToastKind::Error, login_failure_message(err)),
            }
            result
        }
    });

    Effect::new(move |_| {
        if let Some(Ok(_)) = login_action.value().get() {
            navigate(paths::DASHBOARD, Default::default());
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        if login_action.pending().get_untracked() {
            return;
        }
        // The unmet rule is already shown under the password field.
        let password_value = password.get_untracked();
        if !password_message(&password_value).is_empty() {
            return;
        }

        login_action.dispatch(LoginForm {
            email: email.get_untracked(),
            password: password_value,
            role: role.get_untracked(),
        });
    };

    let busy = login_action.pending();
    let validation_error = move || match login_action.value().get() {
        Some(Err(AppError::Validation(message))) => Some(message),
        _ => None,
    };

    view! {
        <AuthLayout>
            <form on:submit=on_submit>
                <h2 class="text-2xl font-bold text-center text-gray-800 mb-6">"Log in"</h2>
                <select
                    class=FIELD_CLASS
                    aria-label="Account type"
                    disabled=move || busy.get()
                    on:change=move |event| {
                        if let Ok(selected) = event_target_value(&event).parse::<Role>() {
                            set_role.set(selected);
                        }
                    }
                >
                    {Role::LOGIN_CHOICES
                        .into_iter()
                        .map(|choice| {
                            view! {
                                <option value=choice.as_str() selected=move || role.get() == choice>
                                    {choice.label()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
                <input
                    type="email"
                    placeholder="Email"
                    class=FIELD_CLASS
                    autocomplete="email"
                    required
                    disabled=move || busy.get()
                    on:input=move |event| set_email.set(event_target_value(&event))
                />
                <PasswordField
                    id="password"
                    label="Password"
                    autocomplete="current-password"
                    value=password
                    message=password_error
                />
                {move || {
                    validation_error()
                        .map(|message| view! { <p class="text-red-500 text-sm mb-2">{message}</p> })
                }}
                <A href=paths::FORGOT_PASSWORD {..} class="text-indigo-500 hover:underline text-sm">
                    "Forgot your password?"
                </A>
                <div class="mt-4">
                    <Button button_type="submit" disabled=busy>
                        {move || {
                            if busy.get() {
                                view! {
                                    <Spinner small=true />
                                    {LOADING_MESSAGE}
                                }
                                    .into_any()
                            } else {
                                format!("Login as {}", role.get().label()).into_any()
                            }
                        }}
                    </Button>
                </div>
                <Show when=move || role.get().can_self_register()>
                    <p class="mt-4 text-center text-gray-600">
                        "Don't have an account? "
                        <A href=paths::REGISTER {..} class="text-indigo-500 hover:underline">
                            "Register"
                        </A>
                    </p>
                </Show>
            </form>
        </AuthLayout>
    }
}
