//! Toast notifications rendered in the bottom-right corner. Pages push through
//! [`use_toasts`]; expiry is driven by browser timers.

use crate::app_lib::toast::{Toast, ToastKind, ToastQueue};
use gloo_timers::callback::Timeout;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct ToastContext {
    queue: RwSignal<ToastQueue>,
}

impl ToastContext {
    pub fn success(&self, message: impl Into<String>) {
        self.show(ToastKind::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(ToastKind::Error, message);
    }

    /// Shows a toast that stays until [`ToastContext::resolve`] replaces it.
    pub fn loading(&self, message: impl Into<String>) -> u64 {
        let message = message.into();
        self.queue
            .try_update(|queue| queue.push(ToastKind::Loading, message))
            .unwrap_or_default()
    }

    pub fn resolve(&self, id: u64, kind: ToastKind, message: impl Into<String>) {
        let message = message.into();
        let resolved = self
            .queue
            .try_update(|queue| queue.resolve(id, kind, message.clone()))
            .unwrap_or(false);
        if resolved {
            self.expire(id, kind);
        } else {
            self.show(kind, message);
        }
    }

    pub fn dismiss(&self, id: u64) {
        self.queue.try_update(|queue| queue.dismiss(id));
    }

    fn show(&self, kind: ToastKind, message: impl Into<String>) {
        let message = message.into();
        if let Some(id) = self.queue.try_update(|queue| queue.push(kind, message)) {
            self.expire(id, kind);
        }
    }

    fn expire(&self, id: u64, kind: ToastKind) {
        let Some(ttl) = kind.ttl() else {
            return;
        };
        let queue = self.queue;
        let millis = u32::try_from(ttl.as_millis()).unwrap_or(u32::MAX);
        // The queue ignores ids it no longer holds, so the timer can outlive the toast.
        Timeout::new(millis, move || {
            queue.try_update(|queue| queue.dismiss(id));
        })
        .forget();
    }
}

#[component]
pub fn ToastProvider(children: Children) -> impl IntoView {
    provide_context(ToastContext {
        queue: RwSignal::new(ToastQueue::default()),
    });

    view! { {children()} }
}

pub fn use_toasts() -> ToastContext {
    use_context::<ToastContext>().unwrap_or_else(|| ToastContext {
        queue: RwSignal::new(ToastQueue::default()),
    })
}

#[component]
pub fn Toaster() -> impl IntoView {
    let toasts = use_toasts();

    view! {
        <div class="fixed bottom-4 right-4 z-50 flex w-80 flex-col gap-2" aria-live="polite">
            <For
                each=move || toasts.queue.get().toasts().to_vec()
                key=|toast| (toast.id, toast.kind as u8)
                let:toast
            >
                <ToastItem toast=toast on_dismiss=move |id| toasts.dismiss(id) />
            </For>
        </div>
    }
}

#[component]
fn ToastItem(toast: Toast, #[prop(into)] on_dismiss: Callback<u64>) -> impl IntoView {
    let (class, icon) = match toast.kind {
        ToastKind::Success => ("border-emerald-200 bg-emerald-50 text-emerald-800", "check_circle"),
        ToastKind::Error => ("border-red-200 bg-red-50 text-red-800", "error"),
        ToastKind::Loading => ("border-gray-200 bg-white text-gray-800", "progress_activity"),
    };
    let id = toast.id;

    view! {
        <div
            class=format!("flex items-start gap-3 rounded-lg border px-4 py-3 text-sm shadow {class}")
            role="status"
        >
            <span
                class="material-symbols-outlined text-base"
                class:animate-spin=toast.kind == ToastKind::Loading
            >
                {icon}
            </span>
            <p class="flex-1">{toast.message}</p>
            <button
                type="button"
                class="text-xs text-gray-500 hover:text-gray-800"
                aria-label="Dismiss"
                on:click=move |_| on_dismiss.run(id)
            >
                "✕"
            </button>
        </div>
    }
}
