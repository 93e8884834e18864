//! String key/value persistence behind the session store.
//!
//! The browser implementation wraps `window.localStorage`; [`MemoryStorage`]
//! stands in for it in tests and non-browser embedders. Both expose
//! cross-tab change notification as a subscription that unregisters itself
//! when dropped.

use crate::app_lib::AppError;
use std::{
    cell::RefCell,
    collections::BTreeMap,
    fmt,
    rc::{Rc, Weak},
};

pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    /// Returns `AppError::Storage` when the medium rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), AppError>;

    fn remove(&self, key: &str);

    /// Registers `callback` for changes made outside this tab. The callback
    /// stays registered until the returned subscription is dropped.
    fn on_external_change(&self, callback: Box<dyn Fn()>) -> Subscription;
}

/// Handle for a change listener; dropping it unregisters the listener.
#[must_use = "dropping a subscription unregisters its listener"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A subscription with nothing to unregister.
    pub fn inert() -> Self {
        Self { cancel: None }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

type Listener = Rc<dyn Fn()>;

#[derive(Default)]
struct MemoryInner {
    values: BTreeMap<String, String>,
    listeners: Vec<(u64, Listener)>,
    next_listener: u64,
}

/// In-process storage. Clones share the same contents, like two handles on
/// one tab's local storage.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    inner: Rc<RefCell<MemoryInner>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a write as if another tab made it: the value changes and
    /// external-change listeners fire. `None` removes the key.
    pub fn write_from_other_tab(&self, key: &str, value: Option<&str>) {
        let listeners: Vec<Listener> = {
            let mut inner = self.inner.borrow_mut();
            match value {
                Some(value) => {
                    inner.values.insert(key.to_string(), value.to_string());
                }
                None => {
                    inner.values.remove(key);
                }
            }
            inner
                .listeners
                .iter()
                .map(|(_, listener)| Rc::clone(listener))
                .collect()
        };

        for listener in listeners {
            listener();
        }
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

impl fmt::Debug for MemoryStorage {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        formatter
            .debug_struct("MemoryStorage")
            .field("keys", &inner.values.keys().collect::<Vec<_>>())
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.borrow().values.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.inner
            .borrow_mut()
            .values
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.inner.borrow_mut().values.remove(key);
    }

    fn on_external_change(&self, callback: Box<dyn Fn()>) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            inner.next_listener += 1;
            let id = inner.next_listener;
            inner.listeners.push((id, Rc::from(callback)));
            id
        };

        let weak: Weak<RefCell<MemoryInner>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner
                    .borrow_mut()
                    .listeners
                    .retain(|(listener_id, _)| *listener_id != id);
            }
        })
    }
}

/// `window.localStorage`. The browser only raises `storage` events for
/// writes made by other tabs, which is exactly the external-change contract.
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(target_arch = "wasm32")]
impl BrowserStorage {
    fn local_storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::local_storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let storage = Self::local_storage()
            .ok_or_else(|| AppError::Storage("Local storage is unavailable.".to_string()))?;
        storage
            .set_item(key, value)
            .map_err(|_| AppError::Storage("Unable to write to local storage.".to_string()))
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::local_storage() {
            let _ = storage.remove_item(key);
        }
    }

    fn on_external_change(&self, callback: Box<dyn Fn()>) -> Subscription {
        use wasm_bindgen::{closure::Closure, JsCast};

        let Some(window) = web_sys::window() else {
            return Subscription::inert();
        };

        let listener = Closure::<dyn Fn(web_sys::Event)>::new(move |_event: web_sys::Event| {
            callback();
        });
        if window
            .add_event_listener_with_callback("storage", listener.as_ref().unchecked_ref())
            .is_err()
        {
            tracing::warn!("unable to subscribe to storage events");
            return Subscription::inert();
        }

        Subscription::new(move || {
            let _ = window
                .remove_event_listener_with_callback("storage", listener.as_ref().unchecked_ref());
            drop(listener);
        })
    }
}
