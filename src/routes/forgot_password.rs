//! Password reset entry: collect the email, send a one-time code, then hand
//! over to the OTP step. Setting the new password is not part of this client.

use crate::{
    app_lib::AppError,
    components::{Alert, AlertKind, AuthLayout, Button, OtpVerification, Spinner},
    features::auth::{
        client::{failure_message, SEND_OTP_FALLBACK_MESSAGE},
        flows,
        state::use_auth,
    },
    routes::paths,
};
use leptos::{ev::SubmitEvent, prelude::*};
use leptos_router::components::A;

const SENT_MESSAGE: &str = "OTP sent successfully!";
const VERIFIED_MESSAGE: &str = "OTP verified successfully!";

#[derive(Clone, Debug, PartialEq)]
enum Step {
    Email,
    Otp { email: String },
}

#[derive(Clone, Debug, PartialEq)]
enum Status {
    Idle,
    Success(&'static str),
    Error(String),
}

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let auth = use_auth();
    let (email, set_email) = signal(String::new());
    let (step, set_step) = signal(Step::Email);
    let (status, set_status) = signal(Status::Idle);

    let send_action = Action::new_local(move |email: &String| {
        let email = email.clone();
        let client = auth.client();
        async move {
            let client = client?;
            flows::request_password_reset(&client, &email).await
        }
    });

    Effect::new(move |_| {
        if let Some(result) = send_action.value().get() {
            match result {
                Ok(email) => {
                    set_status.set(Status::Success(SENT_MESSAGE));
                    set_step.set(Step::Otp { email });
                }
                Err(AppError::Validation(message)) => set_status.set(Status::Error(message)),
                Err(err) => {
                    set_status.set(Status::Error(failure_message(&err, SEND_OTP_FALLBACK_MESSAGE)));
                }
            }
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        if send_action.pending().get_untracked() {
            return;
        }
        set_status.set(Status::Idle);
        send_action.dispatch(email.get_untracked());
    };

    let on_back = Callback::new(move |()| {
        set_status.set(Status::Idle);
        set_step.set(Step::Email);
    });
    let on_verified = Callback::new(move |()| set_status.set(Status::Success(VERIFIED_MESSAGE)));

    let busy = send_action.pending();
    let status_view = move || match status.get() {
        Status::Idle => None,
        Status::Success(message) => Some(
            view! {
                <div class="mb-4">
                    <Alert kind=AlertKind::Success message=message />
                </div>
            }
            .into_any(),
        ),
        Status::Error(message) => Some(
            view! {
                <div class="mb-4">
                    <Alert kind=AlertKind::Error message=message />
                </div>
            }
            .into_any(),
        ),
    };

    view! {
        <AuthLayout>
            {move || match step.get() {
                Step::Email => view! {
                    <div>
                        <h2 class="text-2xl font-semibold text-center text-gray-800 mb-6">
                            "Password Reset"
                        </h2>
                        <p class="text-center text-gray-600 mb-4">"Enter your registered email"</p>
                        {status_view}
                        <form class="space-y-4" on:submit=on_submit>
                            <input
                                type="email"
                                placeholder="Enter your email"
                                class="w-full p-3 border border-gray-300 rounded-lg focus:ring-2 focus:ring-indigo-500"
                                autocomplete="email"
                                required
                                prop:value=move || email.get()
                                disabled=move || busy.get()
                                on:input=move |event| set_email.set(event_target_value(&event))
                            />
                            <Button button_type="submit" disabled=busy>
                                {move || busy.get().then(|| view! { <Spinner small=true /> })}
                                "Send OTP"
                            </Button>
                        </form>
                        <div class="mt-4 text-center">
                            <A href=paths::LOGIN {..} class="text-sm text-indigo-500 hover:underline">
                                "Back to Login"
                            </A>
                        </div>
                    </div>
                }
                .into_any(),
                Step::Otp { email } => view! {
                    <div>
                        {status_view}
                        <OtpVerification email=email on_verified=on_verified on_back=on_back />
                    </div>
                }
                .into_any(),
            }}
        </AuthLayout>
    }
}
