//! Session token and role persisted in key/value storage.

use std::cell::RefCell;
use std::collections::HashMap;

use tracing::info;

use crate::model::Role;

pub const SESSION_KEY: &str = "session_id";
pub const ROLE_KEY: &str = "role";

/// Minimal string key/value store (browser `localStorage` in production).
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Opaque token attached to every request.
    pub token: String,
    pub role: Role,
}

impl Session {
    pub fn new(token: impl Into<String>, role: Role) -> Self {
        Self {
            token: token.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Read the stored session; an empty or missing token means logged out.
    pub fn load(store: &impl SessionStore) -> Option<Session> {
        let token = store.get(SESSION_KEY).filter(|t| !t.is_empty())?;
        let role = store
            .get(ROLE_KEY)
            .map(|r| Role::parse(&r))
            .unwrap_or_else(|| Role::Other(String::new()));
        Some(Session { token, role })
    }

    pub fn save(&self, store: &impl SessionStore) {
        store.set(SESSION_KEY, &self.token);
        store.set(ROLE_KEY, self.role.as_str());
        info!("Stored session (role: {})", self.role.as_str());
    }
}

/// Forget the session: both keys go together.
pub fn clear_session(store: &impl SessionStore) {
    store.remove(SESSION_KEY);
    store.remove(ROLE_KEY);
    info!("Cleared stored session");
}

/// In-memory store for tests and non-browser hosts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}
