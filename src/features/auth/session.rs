//! Persisted session: an opaque bearer token plus a cached user profile.
//!
//! The store reads through to its storage on every call. Other tabs can
//! change the medium at any moment, so nothing here caches the
//! authentication state; views re-query after each navigation and after an
//! external-change notification.

use super::{
    storage::{KeyValueStorage, Subscription},
    types::Profile,
};
use crate::app_lib::AppError;
use tracing::{info, warn};

/// Storage key holding the bearer token.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
/// Storage key holding the JSON-encoded [`Profile`].
pub const USER_INFO_KEY: &str = "userInfo";

#[derive(Clone, Debug, Default)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: KeyValueStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// True iff a token is stored right now. Only the empty string counts as
    /// no token; any other value is opaque.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.storage
            .get(ACCESS_TOKEN_KEY)
            .filter(|token| !token.is_empty())
    }

    /// Persists a new session. The token is always written; the profile only
    /// when one is given, so an earlier profile is left as is otherwise.
    ///
    /// # Errors
    /// Returns an error if the token cannot be written. A failed profile
    /// write is logged and tolerated, because a token without a profile is a
    /// valid session.
    pub fn save(&self, token: &str, profile: Option<&Profile>) -> Result<(), AppError> {
        self.storage.set(ACCESS_TOKEN_KEY, token)?;

        if let Some(profile) = profile {
            let encoded = serde_json::to_string(profile).map_err(|err| {
                AppError::Serialization(format!("Failed to encode profile: {err}"))
            })?;
            if let Err(err) = self.storage.set(USER_INFO_KEY, &encoded) {
                warn!(error = %err, "session saved without profile");
                return Ok(());
            }
        }

        info!(with_profile = profile.is_some(), "session saved");
        Ok(())
    }

    /// Removes token and profile. The profile goes first so a reader racing
    /// this call can only ever see token-without-profile, never the reverse.
    pub fn clear(&self) {
        self.storage.remove(USER_INFO_KEY);
        self.storage.remove(ACCESS_TOKEN_KEY);
        info!("session cleared");
    }

    /// Best-effort read of the cached profile. Absent when signed out or when
    /// the stored JSON is unusable; corrupt data is logged, never surfaced.
    pub fn current_profile(&self) -> Option<Profile> {
        if !self.is_authenticated() {
            return None;
        }
        let raw = self.storage.get(USER_INFO_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(profile) => Some(profile),
            Err(err) => {
                warn!(error = %err, "stored user profile is malformed; treating it as absent");
                None
            }
        }
    }

    /// Calls `callback` whenever another tab changes the medium.
    pub fn on_external_change(&self, callback: impl Fn() + 'static) -> Subscription {
        self.storage.on_external_change(Box::new(callback))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::{storage::MemoryStorage, types::Role};
    use std::{cell::Cell, rc::Rc};

    fn profile() -> Profile {
        Profile {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            role: Role::Mentor,
        }
    }

    fn store() -> SessionStore<MemoryStorage> {
        SessionStore::new(MemoryStorage::new())
    }

    #[test]
    fn authenticated_iff_token_present() {
        let store = store();
        assert!(!store.is_authenticated());

        store
            .storage()
            .set(USER_INFO_KEY, &serde_json::to_string(&profile()).unwrap())
            .unwrap();
        assert!(!store.is_authenticated());

        store.save("tok", None).unwrap();
        assert!(store.is_authenticated());
        assert_eq!(store.token().as_deref(), Some("tok"));
    }

    #[test]
    fn token_without_profile_is_valid() {
        let store = store();
        store.save("tok", None).unwrap();
        assert!(store.is_authenticated());
        assert_eq!(store.current_profile(), None);
        assert_eq!(store.token().as_deref(), Some("tok"));
    }

    #[test]
    fn blank_token_is_not_a_session() {
        let store = store();
        store.storage().set(ACCESS_TOKEN_KEY, "").unwrap();
        assert!(!store.is_authenticated());
        assert_eq!(store.token(), None);
    }

    #[test]
    fn whitespace_token_is_still_a_token() {
        let store = store();
        store.storage().set(ACCESS_TOKEN_KEY, " ").unwrap();
        assert!(store.is_authenticated());
        assert_eq!(store.token().as_deref(), Some(" "));
    }

    #[test]
    fn save_writes_profile_under_user_info() {
        let store = store();
        store.save("tok", Some(&profile())).unwrap();

        let raw = store.storage().get(USER_INFO_KEY).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"name": "Ada Lovelace", "email": "ada@example.com", "role": "mentor"})
        );
        assert_eq!(store.current_profile(), Some(profile()));
    }

    #[test]
    fn save_without_profile_keeps_previous_profile() {
        let store = store();
        store.save("first", Some(&profile())).unwrap();
        store.save("second", None).unwrap();
        assert_eq!(store.token().as_deref(), Some("second"));
        assert_eq!(store.current_profile(), Some(profile()));
    }

    #[test]
    fn clear_removes_everything() {
        let store = store();
        store.save("tok", Some(&profile())).unwrap();
        store.clear();

        assert!(!store.is_authenticated());
        assert_eq!(store.current_profile(), None);
        assert_eq!(store.storage().get(ACCESS_TOKEN_KEY), None);
        assert_eq!(store.storage().get(USER_INFO_KEY), None);
    }

    #[test]
    fn malformed_profile_reads_as_absent() {
        let store = store();
        store.save("tok", None).unwrap();
        store.storage().set(USER_INFO_KEY, "{not json").unwrap();
        assert!(store.is_authenticated());
        assert_eq!(store.current_profile(), None);

        store
            .storage()
            .set(USER_INFO_KEY, r#"{"name":"Ada","email":"a@b.c","role":"wizard"}"#)
            .unwrap();
        assert_eq!(store.current_profile(), None);
    }

    #[test]
    fn reads_are_never_cached() {
        let store = store();
        store.save("tok", Some(&profile())).unwrap();
        assert!(store.is_authenticated());

        store.storage().write_from_other_tab(ACCESS_TOKEN_KEY, None);
        assert!(!store.is_authenticated());
        assert_eq!(store.current_profile(), None);
    }

    #[test]
    fn external_change_reaches_subscribers() {
        let store = store();
        let seen = Rc::new(Cell::new(false));
        let flag = Rc::clone(&seen);
        let subscription = store.on_external_change(move || flag.set(true));

        store.storage().write_from_other_tab(ACCESS_TOKEN_KEY, Some("from-other-tab"));
        assert!(seen.get());
        assert!(store.is_authenticated());
        drop(subscription);
        assert_eq!(store.storage().listener_count(), 0);
    }
}
