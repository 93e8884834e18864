//! Auth session context for the browser. The session itself lives in local
//! storage; the context only carries a revision counter so views re-read
//! storage whenever this tab signs in or out or another tab changes the
//! session. Nothing here copies the token into memory.

use crate::app_lib::{AppConfig, AppError};
use crate::features::auth::{
    client::AuthClient,
    flows::{self, LoginForm, SignedIn},
    session::SessionStore,
    storage::BrowserStorage,
    types::Profile,
};
use leptos::prelude::*;
use tracing::{debug, error};

/// Auth context shared through Leptos.
#[derive(Clone)]
pub struct AuthContext {
    revision: RwSignal<u64>,
    client: Result<AuthClient, AppError>,
}

impl AuthContext {
    fn new() -> Self {
        let client = AuthClient::from_config(&AppConfig::load());
        if let Err(err) = &client {
            error!(error = %err, "auth client unavailable");
        }
        Self {
            revision: RwSignal::new(0),
            client,
        }
    }

    fn store() -> SessionStore<BrowserStorage> {
        SessionStore::new(BrowserStorage)
    }

    /// Tracks the revision so callers re-run after any session change.
    pub fn is_authenticated(&self) -> bool {
        self.revision.track();
        Self::store().is_authenticated()
    }

    pub fn profile(&self) -> Option<Profile> {
        self.revision.track();
        Self::store().current_profile()
    }

    /// # Errors
    /// The configuration error captured when the provider mounted.
    pub fn client(&self) -> Result<AuthClient, AppError> {
        self.client.clone()
    }

    /// Logs in, persists the session and notifies every view.
    ///
    /// # Errors
    /// Whatever [`flows::sign_in`] reports.
    pub async fn sign_in(&self, form: LoginForm) -> Result<SignedIn, AppError> {
        let client = self.client()?;
        let signed_in = flows::sign_in(&client, &Self::store(), form).await?;
        self.refresh();
        Ok(signed_in)
    }

    pub fn sign_out(&self) {
        flows::sign_out(&Self::store());
        self.refresh();
    }

    /// Forces dependents to re-read storage.
    pub fn refresh(&self) {
        self.revision.update(|revision| *revision = revision.wrapping_add(1));
    }
}

/// Provides the auth context and re-renders dependents when another tab
/// signs in or out.
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let auth = AuthContext::new();
    provide_context(auth.clone());

    let revision = auth.revision;
    let subscription = AuthContext::store().on_external_change(move || {
        debug!("session changed in another tab");
        revision.update(|revision| *revision = revision.wrapping_add(1));
    });
    let subscription = StoredValue::new_local(Some(subscription));
    on_cleanup(move || subscription.update_value(|subscription| drop(subscription.take())));

    view! { {children()} }
}

/// Returns the current auth context or a detached one outside the provider.
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(AuthContext::new)
}
