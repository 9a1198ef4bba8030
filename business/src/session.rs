//! Client-held session: the bearer token and the signed-in user's profile.
//!
//! Components never touch storage keys directly. They receive a [`Session`]
//! and go through its typed accessors; the raw key-value backend sits behind
//! the [`SessionStore`] trait so the same code runs against process memory in
//! tests and a JSON file on desktop.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use directories::ProjectDirs;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ustr::Ustr;

/// Storage key holding the bearer token.
pub const AUTH_TOKEN_KEY: &str = "authToken";
/// Storage key holding the JSON-serialized [`UserProfile`].
pub const USER_KEY: &str = "user";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("session storage is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("session storage lock poisoned")]
    Poisoned,
    #[error("could not determine a config directory for the session file")]
    NoConfigDir,
    #[error("session storage backend failed: {0}")]
    Backend(String),
}

/// A role tag on a user, compared by exact value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Role(Ustr);

impl Role {
    pub fn new(name: &str) -> Self {
        Self(Ustr::from(name))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<String> for Role {
    fn from(name: String) -> Self {
        Self::new(&name)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.0.to_string()
    }
}

impl From<&str> for Role {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profile stored under [`USER_KEY`] at login.
///
/// Every field is optional on read; absent fields fall back to empty values
/// where they are consumed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// Narrow key-value backend for session data.
///
/// Each call is atomic on its own; there is no read-modify-write across
/// calls and the last writer wins.
pub trait SessionStore: Send + Sync + fmt::Debug {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;
    fn remove(&self, key: &str) -> Result<(), SessionError>;
}

/// Process-lifetime store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.entries
            .write()
            .map_err(|_err| SessionError::Poisoned)?
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.entries
            .write()
            .map_err(|_err| SessionError::Poisoned)?
            .remove(key);
        Ok(())
    }
}

/// Store persisted as a flat JSON object, e.g.
/// `{"authToken": "...", "user": "{\"email\": ...}"}`.
///
/// The file is re-read on every `get` so a session written by another
/// process (an external login flow) is picked up without a restart.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    /// `session.json` under the platform config directory.
    pub fn default_path() -> Result<PathBuf, SessionError> {
        let dirs = ProjectDirs::from("app", "loanpay", "loanpay").ok_or(SessionError::NoConfigDir)?;
        Ok(dirs.config_dir().join("session.json"))
    }

    fn load(&self) -> Result<HashMap<String, String>, SessionError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, entries: &HashMap<String, String>) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    fn update(
        &self,
        apply: impl FnOnce(&mut HashMap<String, String>),
    ) -> Result<(), SessionError> {
        let _guard = self.lock.write().map_err(|_err| SessionError::Poisoned)?;
        let mut entries = self.load()?;
        apply(&mut entries);
        self.save(&entries)
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        let _guard = self.lock.read().ok()?;
        match self.load() {
            Ok(mut entries) => entries.remove(key),
            Err(err) => {
                error!(
                    "FileSessionStore: failed to read {}: {}",
                    self.path.display(),
                    err
                );
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.update(|entries| {
            entries.insert(key.to_owned(), value.to_owned());
        })
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}

/// Typed session context handed to components.
///
/// Cheap to clone; clones share the same backing store.
#[derive(Debug, Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
}

impl Session {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// A session backed by process memory, initially signed out.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::new()))
    }

    pub fn token(&self) -> Option<String> {
        self.store.get(AUTH_TOKEN_KEY)
    }

    /// The stored profile. A value that fails to parse counts as no user.
    pub fn user(&self) -> Option<UserProfile> {
        let raw = self.store.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(err) => {
                warn!("Session: ignoring malformed user profile: {}", err);
                None
            }
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.user().is_some()
    }

    /// Records a completed login. Session issuance happens elsewhere; this
    /// only persists its result.
    pub fn sign_in(&self, token: &str, user: &UserProfile) -> Result<(), SessionError> {
        let user_json = serde_json::to_string(user)?;
        self.store.set(AUTH_TOKEN_KEY, token)?;
        self.store.set(USER_KEY, &user_json)?;
        info!("Session: signed in {:?}", user.email);
        Ok(())
    }

    /// Removes both the token and the profile.
    ///
    /// Both removals are attempted even if the first fails; the first error is
    /// returned.
    pub fn clear(&self) -> Result<(), SessionError> {
        let token = self.store.remove(AUTH_TOKEN_KEY);
        let user = self.store.remove(USER_KEY);
        token.and(user)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::in_memory()
    }
}
