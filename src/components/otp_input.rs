//! Six-slot one-time code entry with resend cooldown. The [`OtpChallenge`]
//! lives in a signal; backend calls run between `begin_*` and `finish_*` so
//! the signal is never borrowed across an await. Completions that land after
//! the view is gone are dropped.

use crate::{
    app_lib::{lifetime::LifetimeToken, AppError, ViewLifetime},
    components::{toaster::use_toasts, Button, Spinner},
    features::auth::{
        otp::{OtpBackend, OtpChallenge, OtpPhase, OTP_LENGTH},
        state::use_auth,
    },
    routes::paths,
};
use gloo_timers::callback::{Interval, Timeout};
use leptos::{ev::SubmitEvent, html, prelude::*, task::spawn_local};
use leptos_router::{hooks::use_navigate, NavigateOptions};

const VERIFIED_MESSAGE: &str = "OTP verified successfully!";
const RESENT_MESSAGE: &str = "OTP has been resent to your email";
/// Delay before leaving for login when no success handler is given.
const REDIRECT_DELAY_MS: u32 = 1_000;

#[component]
pub fn OtpVerification(
    #[prop(into)] email: String,
    /// Runs after a successful verification. Without it the user is sent to
    /// the login page.
    #[prop(optional)]
    on_verified: Option<Callback<()>>,
    /// Runs from the back button. Without it the button goes to login.
    #[prop(optional)]
    on_back: Option<Callback<()>>,
) -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();
    let navigate = use_navigate();
    let challenge = RwSignal::new(OtpChallenge::new(email.clone()));

    let lifetime = ViewLifetime::new();
    let token = lifetime.token();
    let ticker = StoredValue::new_local(Some(cooldown_ticker(challenge)));
    on_cleanup(move || {
        lifetime.end();
        ticker.update_value(|ticker| drop(ticker.take()));
    });

    let inputs: [NodeRef<html::Input>; OTP_LENGTH] = std::array::from_fn(|_| NodeRef::new());
    let focus = Memo::new(move |_| challenge.with(OtpChallenge::focus));
    Effect::new(move |_| {
        if let Some(input) = inputs.get(focus.get()).and_then(|input| input.get()) {
            let _ = input.focus();
        }
    });

    let submit_client = auth.clone();
    let submit_token = token.clone();
    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        let Some(begun) = challenge.try_update(OtpChallenge::begin_submit) else {
            return;
        };
        let code = match begun {
            Ok(code) => code,
            Err(rejection) => {
                toasts.error(rejection.to_string());
                return;
            }
        };

        let client = submit_client.client();
        let email = email.clone();
        let token = submit_token.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            let result = match client {
                Ok(client) => client.verify_otp(&email, &code).await,
                Err(err) => Err(err),
            };
            token.run_if_alive(|| {
                match challenge.try_update(|challenge| challenge.finish_submit(result)) {
                    Some(Ok(())) => {
                        toasts.success(VERIFIED_MESSAGE);
                        match on_verified {
                            Some(on_verified) => on_verified.run(()),
                            None => redirect_to_login(&token, navigate),
                        }
                    }
                    Some(Err(err)) => toasts.error(err.to_string()),
                    None => {}
                }
            });
        });
    };

    let on_resend = move |()| {
        match challenge.try_update(OtpChallenge::begin_resend) {
            Some(Ok(())) => {}
            Some(Err(rejection)) => {
                toasts.error(rejection.to_string());
                return;
            }
            None => return,
        }

        let client = auth.client();
        let email = challenge.with_untracked(|challenge| challenge.email().to_string());
        let token = token.clone();
        spawn_local(async move {
            let result: Result<(), AppError> = match client {
                Ok(client) => client.resend_otp(&email).await,
                Err(err) => Err(err),
            };
            token.run_if_alive(|| {
                match challenge.try_update(|challenge| challenge.finish_resend(result)) {
                    Some(Ok(())) => {
                        // Restart so the fresh cooldown gets a full first second.
                        ticker.set_value(Some(cooldown_ticker(challenge)));
                        toasts.success(RESENT_MESSAGE);
                    }
                    Some(Err(err)) => toasts.error(err.to_string()),
                    None => {}
                }
            });
        });
    };

    let back_navigate = use_navigate();
    let on_back_click = move |_| match on_back {
        Some(on_back) => on_back.run(()),
        None => back_navigate(paths::LOGIN, Default::default()),
    };
    let back_label = if on_back.is_some() { "Back" } else { "Back to login" };

    let busy = Signal::derive(move || challenge.with(OtpChallenge::is_submitting));
    let cooldown = move || challenge.with(OtpChallenge::cooldown_remaining);
    let shown_email = challenge.with_untracked(|challenge| challenge.email().to_string());

    view! {
        <div class="w-full">
            <h2 class="text-2xl font-bold text-center text-gray-800 mb-4">"OTP Verification"</h2>
            <p class="text-gray-600 text-center mb-6">
                "Enter the verification code sent to" <br />
                <span class="font-medium text-gray-800">{shown_email}</span>
            </p>

            <form on:submit=on_submit>
                <div class="flex justify-between gap-2 mb-6">
                    {(0..OTP_LENGTH)
                        .map(move |index| {
                            view! {
                                <input
                                    node_ref=inputs[index]
                                    type="text"
                                    inputmode="numeric"
                                    autocomplete="one-time-code"
                                    aria-label=format!("Digit {}", index + 1)
                                    class="w-12 h-12 text-center text-xl font-bold border border-gray-300 rounded-lg focus:border-indigo-500 focus:ring-2 focus:ring-indigo-500"
                                    prop:value=move || {
                                        challenge
                                            .with(|challenge| challenge.digit(index))
                                            .map(String::from)
                                            .unwrap_or_default()
                                    }
                                    disabled=move || busy.get()
                                    on:focus=move |_| {
                                        challenge.update(|challenge| challenge.focus_slot(index));
                                        if let Some(input) = inputs[index].get_untracked() {
                                            input.select();
                                        }
                                    }
                                    on:input=move |event| {
                                        let value = event_target_value(&event);
                                        // Always notify so a rejected character is wiped from the box.
                                        challenge.update(|challenge| {
                                            challenge.input(index, value.trim());
                                        });
                                    }
                                    on:keydown=move |event| {
                                        if event.key() == "Backspace" {
                                            event.prevent_default();
                                            challenge.update(|challenge| challenge.backspace(index));
                                        }
                                    }
                                />
                            }
                        })
                        .collect_view()}
                </div>

                <Button button_type="submit" disabled=busy>
                    {move || {
                        if challenge.with(OtpChallenge::phase) == OtpPhase::Submitting {
                            view! {
                                <Spinner small=true />
                                "Verifying..."
                            }
                                .into_any()
                        } else {
                            "Verify OTP".into_any()
                        }
                    }}
                </Button>
            </form>

            <div class="mt-4 text-center">
                <p class="text-gray-600 mb-2">
                    "Didn't receive the code? "
                    {move || {
                        let remaining = cooldown();
                        let on_resend = on_resend.clone();
                        if remaining > 0 {
                            view! { <span class="font-medium">{format!("Resend in {remaining}s")}</span> }
                                .into_any()
                        } else {
                            view! {
                                <button
                                    type="button"
                                    class="text-indigo-600 hover:underline focus:outline-none"
                                    class:opacity-50=move || busy.get()
                                    disabled=move || busy.get()
                                    on:click=move |_| on_resend(())
                                >
                                    "Resend OTP"
                                </button>
                            }
                                .into_any()
                        }
                    }}
                </p>
                <button
                    type="button"
                    class="text-gray-600 hover:underline focus:outline-none mt-2"
                    disabled=move || busy.get()
                    on:click=on_back_click
                >
                    {back_label}
                </button>
            </div>
        </div>
    }
}

fn cooldown_ticker(challenge: RwSignal<OtpChallenge>) -> Interval {
    Interval::new(1_000, move || {
        challenge.try_update(|challenge| {
            challenge.tick();
        });
    })
}

fn redirect_to_login(token: &LifetimeToken, navigate: impl Fn(&str, NavigateOptions) + 'static) {
    let token = token.clone();
    Timeout::new(REDIRECT_DELAY_MS, move || {
        token.run_if_alive(|| navigate(paths::LOGIN, Default::default()));
    })
    .forget();
}
