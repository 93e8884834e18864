//! Registration route. Only mentees and mentors can sign themselves up. On
//! success the user is sent to login after a short pause; no session is
//! created here.

use crate::{
    app_lib::{lifetime::ViewLifetime, AppError},
    components::{use_toasts, AuthLayout, Button, PasswordField, Spinner},
    features::auth::{
        client::register_failure_message,
        flows::{self, RegisterForm},
        state::use_auth,
        types::Role,
        validation::{name_message, password_message, PASSWORD_REQUIREMENTS},
    },
    routes::paths,
};
use gloo_timers::callback::Timeout;
use leptos::{ev::SubmitEvent, prelude::*};
use leptos_router::{components::A, hooks::use_navigate};

const SUCCESS_MESSAGE: &str = "Account created successfully!";
const REDIRECT_DELAY_MS: u32 = 1_000;
const FIELD_CLASS: &str = "w-full p-3 mb-4 border rounded-lg bg-white focus:ring-2 focus:ring-indigo-500";

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();
    let navigate = use_navigate();
    let (role, set_role) = signal(Role::default());
    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let password = RwSignal::new(String::new());
    let name_error = Signal::derive(move || name.with(|name| name_message(name)));
    let password_error = Signal::derive(move || password.with(|password| password_message(password)));

    let lifetime = ViewLifetime::new();
    let token = lifetime.token();
    on_cleanup(move || lifetime.end());

    let register_action = Action::new_local(move |form: &RegisterForm| {
        let form = form.clone();
        let client = auth.client();
        async move {
            let client = client?;
            flows::register_account(&client, form).await
        }
    });

    Effect::new(move |_| match register_action.value().get() {
        Some(Ok(())) => {
            toasts.success(SUCCESS_MESSAGE);
            let navigate = navigate.clone();
            let token = token.clone();
            Timeout::new(REDIRECT_DELAY_MS, move || {
                token.run_if_alive(|| navigate(paths::LOGIN, Default::default()));
            })
            .forget();
        }
        // Shown inline under the fields.
        Some(Err(AppError::Validation(_))) | None => {}
        Some(Err(err)) => toasts.error(register_failure_message(&err)),
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        if register_action.pending().get_untracked() {
            return;
        }
        let name_value = name.get_untracked();
        let password_value = password.get_untracked();
        if !name_message(&name_value).is_empty() || !password_message(&password_value).is_empty() {
            return;
        }

        register_action.dispatch(RegisterForm {
            name: name_value,
            email: email.get_untracked(),
            password: password_value,
            role: role.get_untracked(),
        });
    };

    let busy = register_action.pending();
    let submit_error = move || match register_action.value().get() {
        Some(Err(AppError::Validation(message))) => Some(message),
        _ => None,
    };

    view! {
        <AuthLayout>
            <form on:submit=on_submit>
                <h2 class="text-2xl font-bold text-center text-gray-800 mb-6">"Create Account"</h2>
                <select
                    class=format!("{FIELD_CLASS} border-gray-300")
                    aria-label="Account type"
                    disabled=move || busy.get()
                    on:change=move |event| {
                        if let Ok(selected) = event_target_value(&event).parse::<Role>() {
                            set_role.set(selected);
                        }
                    }
                >
                    {Role::REGISTER_CHOICES
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
                    type="text"
                    placeholder="Full Name (First Name Father's Name Last Name)"
                    class=FIELD_CLASS
                    class:border-red-500=move || !name.get().is_empty() && !name_error.get().is_empty()
                    class:border-gray-300=move || name.get().is_empty() || name_error.get().is_empty()
                    autocomplete="name"
                    required
                    disabled=move || busy.get()
                    on:input=move |event| set_name.set(event_target_value(&event))
                />
                {move || {
                    let message = name_error.get();
                    (!name.get().is_empty() && !message.is_empty())
                        .then(|| view! { <p class="text-red-500 text-sm mb-2">{message}</p> })
                }}
                <input
                    type="email"
                    placeholder="Email"
                    class=format!("{FIELD_CLASS} border-gray-300")
                    autocomplete="email"
                    required
                    disabled=move || busy.get()
                    on:input=move |event| set_email.set(event_target_value(&event))
                />
                <PasswordField
                    id="password"
                    label="Password"
                    autocomplete="new-password"
                    value=password
                    message=password_error
                />
                <div class="text-sm text-gray-600 mb-4">
                    "Password requirements:"
                    <ul class="list-disc pl-5 mt-1">
                        {PASSWORD_REQUIREMENTS
                            .into_iter()
                            .map(|requirement| view! { <li>{requirement}</li> })
                            .collect_view()}
                    </ul>
                </div>
                {move || {
                    submit_error()
                        .map(|message| view! { <p class="text-red-500 text-sm mb-2">{message}</p> })
                }}
                <Button button_type="submit" disabled=busy>
                    {move || {
                        if busy.get() {
                            view! {
                                <Spinner small=true />
                                "Processing..."
                            }
                                .into_any()
                        } else {
                            format!("Register as {}", role.get()).into_any()
                        }
                    }}
                </Button>
                <p class="mt-4 text-center text-gray-600">
                    "Already have an account? "
                    <A href=paths::LOGIN {..} class="text-indigo-500 hover:underline">
                        "Log In"
                    </A>
                </p>
            </form>
        </AuthLayout>
    }
}
