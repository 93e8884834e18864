//! Password input with a show/hide toggle and an optional live rule message.

use leptos::prelude::*;

const INPUT_CLASS: &str = "bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-indigo-500 focus:border-indigo-500 block w-full p-2.5 pr-16";

#[component]
pub fn PasswordField(
    id: &'static str,
    label: &'static str,
    autocomplete: &'static str,
    value: RwSignal<String>,
    /// First unmet rule, or empty when the value is acceptable.
    #[prop(optional, into)]
    message: Option<Signal<String>>,
) -> impl IntoView {
    let (visible, set_visible) = signal(false);
    let message = move || message.map(|message| message.get()).unwrap_or_default();

    view! {
        <div class="mb-5">
            <label class="block mb-2 text-sm font-medium text-gray-900" for=id>
                {label}
            </label>
            <div class="relative">
                <input
                    id=id
                    type=move || if visible.get() { "text" } else { "password" }
                    class=INPUT_CLASS
                    autocomplete=autocomplete
                    required
                    prop:value=move || value.get()
                    on:input=move |event| value.set(event_target_value(&event))
                />
                <button
                    type="button"
                    class="absolute inset-y-0 right-0 px-3 text-xs font-medium text-gray-500 hover:text-gray-700"
                    aria-label=move || if visible.get() { "Hide password" } else { "Show password" }
                    on:click=move |_| set_visible.update(|visible| *visible = !*visible)
                >
                    {move || if visible.get() { "Hide" } else { "Show" }}
                </button>
            </div>
            {move || {
                let message = message();
                (!message.is_empty() && !value.get().is_empty())
                    .then(|| view! { <p class="mt-2 text-sm text-red-600">{message}</p> })
            }}
        </div>
    }
}
