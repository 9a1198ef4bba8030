//! Browser `localStorage` as a session backend.

use loanpay_business::{SessionError, SessionStore};

/// Looks up `window.localStorage` on every call; nothing JS-side is held, so
/// the store stays `Send + Sync`.
#[derive(Debug, Default)]
pub struct LocalStorageSessionStore;

impl LocalStorageSessionStore {
    fn storage() -> Result<web_sys::Storage, SessionError> {
        web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .ok_or_else(|| SessionError::Backend("localStorage unavailable".to_owned()))
    }
}

impl SessionStore for LocalStorageSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage().ok()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|err| SessionError::Backend(format!("{err:?}")))
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|err| SessionError::Backend(format!("{err:?}")))
    }
}
