//! Teardown tracking for views that start async work.
//!
//! A view creates a [`ViewLifetime`] on mount, hands [`LifetimeToken`]s to the
//! futures it spawns and calls [`ViewLifetime::end`] from its cleanup hook.
//! Completions check [`LifetimeToken::is_alive`] before touching view state, so
//! a response that lands after the page was left is dropped instead of
//! writing into disposed signals.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

#[derive(Debug)]
pub struct ViewLifetime {
    alive: Arc<AtomicBool>,
}

#[derive(Clone, Debug)]
pub struct LifetimeToken {
    alive: Arc<AtomicBool>,
}

impl ViewLifetime {
    #[must_use]
    pub fn new() -> Self {
        Self {
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    #[must_use]
    pub fn token(&self) -> LifetimeToken {
        LifetimeToken {
            alive: Arc::clone(&self.alive),
        }
    }

    /// Marks the owning view as torn down. Idempotent.
    pub fn end(&self) {
        self.alive.store(false, Ordering::Release);
    }
}

impl Default for ViewLifetime {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ViewLifetime {
    fn drop(&mut self) {
        self.end();
    }
}

impl LifetimeToken {
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Runs `apply` only while the owning view is mounted.
    pub fn run_if_alive<T>(&self, apply: impl FnOnce() -> T) -> Option<T> {
        if self.is_alive() {
            Some(apply())
        } else {
            tracing::debug!("dropping async completion after view teardown");
            None
        }
    }
}
