//! Transient notification queue backing the toaster in the corner of every
//! page. Messages must be safe to render and never include secrets.

use std::time::Duration;

/// How long a success or error toast stays on screen.
pub const TOAST_TTL: Duration = Duration::from_secs(4);
/// Oldest toasts are dropped beyond this many.
const MAX_VISIBLE: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Loading,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

impl ToastKind {
    /// Loading toasts stay until replaced; everything else expires.
    #[must_use]
    pub fn ttl(self) -> Option<Duration> {
        match self {
            ToastKind::Loading => None,
            ToastKind::Success | ToastKind::Error => Some(TOAST_TTL),
        }
    }
}

impl Toast {
    #[must_use]
    pub fn ttl(&self) -> Option<Duration> {
        self.kind.ttl()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastQueue {
    next_id: u64,
    toasts: Vec<Toast>,
}

impl ToastQueue {
    /// Queues a toast and returns its id for later dismissal or replacement.
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.toasts.push(Toast {
            id,
            kind,
            message: message.into(),
        });
        if self.toasts.len() > MAX_VISIBLE {
            let overflow = self.toasts.len() - MAX_VISIBLE;
            self.toasts.drain(..overflow);
        }
        id
    }

    /// Turns a pending toast into its outcome in place, keeping its position.
    /// Returns `false` if the toast is gone.
    pub fn resolve(&mut self, id: u64, kind: ToastKind, message: impl Into<String>) -> bool {
        match self.toasts.iter_mut().find(|toast| toast.id == id) {
            Some(toast) => {
                toast.kind = kind;
                toast.message = message.into();
                true
            }
            None => false,
        }
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|toast| toast.id != id);
    }

    #[must_use]
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }
}
