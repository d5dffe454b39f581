//! Session Storage
//!
//! Persistent key-value storage for the admin session credential.
//!
//! ## Architecture
//!
//! - **SessionStore**: the storage port every flow depends on
//! - **MemoryStore**: process-local store, used in tests and one-shot runs
//! - **FileStore**: JSON file on disk, survives between CLI invocations
//! - **SessionCredential**: typed view over the `token`/`roles`/`url` keys

mod credential;
mod error;
mod file;
mod memory;

pub use credential::SessionCredential;
pub use error::{SessionError, SessionResult};
pub use file::FileStore;
pub use memory::MemoryStore;

/// Key holding the bearer token
pub const TOKEN_KEY: &str = "token";

/// Key holding the JSON-encoded role list
pub const ROLES_KEY: &str = "roles";

/// Key holding the API base URL
pub const URL_KEY: &str = "url";

/// Persistent key-value store backing the session.
///
/// Mirrors the browser's local storage: string keys, string values, and a
/// `clear` that wipes every key, not just the ones this crate writes.
pub trait SessionStore: Send + Sync {
    /// Read a value
    fn get(&self, key: &str) -> SessionResult<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> SessionResult<()>;

    /// Write several values as one operation.
    ///
    /// Implementations backed by a single file should override this so the
    /// entries land together.
    fn set_all(&self, entries: &[(&str, &str)]) -> SessionResult<()> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Remove a single key
    fn remove(&self, key: &str) -> SessionResult<()>;

    /// Remove every key
    fn clear(&self) -> SessionResult<()>;
}

/// Read the stored bearer token, treating an empty string as absent
pub fn stored_token(store: &dyn SessionStore) -> SessionResult<Option<String>> {
    Ok(store.get(TOKEN_KEY)?.filter(|token| !token.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_token_ignores_empty() {
        let store = MemoryStore::new();
        assert_eq!(stored_token(&store).unwrap(), None);

        store.set(TOKEN_KEY, "").unwrap();
        assert_eq!(stored_token(&store).unwrap(), None);

        store.set(TOKEN_KEY, "abc").unwrap();
        assert_eq!(stored_token(&store).unwrap().as_deref(), Some("abc"));
    }

    /// Store with only the required methods, so `set_all` is the trait default
    #[derive(Default)]
    struct PlainStore {
        entries: std::sync::Mutex<std::collections::HashMap<String, String>>,
        writes: std::sync::atomic::AtomicUsize,
    }

    impl SessionStore for PlainStore {
        fn get(&self, key: &str) -> SessionResult<Option<String>> {
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> SessionResult<()> {
            self.writes
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> SessionResult<()> {
            self.entries.lock().unwrap().remove(key);
            Ok(())
        }

        fn clear(&self) -> SessionResult<()> {
            self.entries.lock().unwrap().clear();
            Ok(())
        }
    }

    #[test]
    fn test_default_set_all_writes_every_entry() {
        let store = PlainStore::default();
        store
            .set_all(&[(TOKEN_KEY, "t"), (ROLES_KEY, "[]"), (URL_KEY, "http://api")])
            .unwrap();

        assert_eq!(store.writes.load(std::sync::atomic::Ordering::SeqCst), 3);
        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("t"));
        assert_eq!(store.get(ROLES_KEY).unwrap().as_deref(), Some("[]"));
        assert_eq!(store.get(URL_KEY).unwrap().as_deref(), Some("http://api"));
    }

    #[test]
    fn test_credential_persists_through_default_set_all() {
        let store = PlainStore::default();
        SessionCredential::new("tok", vec!["ROLE_ADMIN".to_string()], "http://api")
            .persist(&store)
            .unwrap();

        let loaded = SessionCredential::load(&store).unwrap().unwrap();
        assert_eq!(loaded.roles, vec!["ROLE_ADMIN"]);
    }
}
