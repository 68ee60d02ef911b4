use keyring::Entry;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::warn;

/// Client-local key/value storage for session credentials.
///
/// Backends swallow their own I/O failures: `get` answers `None` on any
/// error, and `set`/`remove` log and move on. The session layer treats
/// storage as always available, the way browser local storage behaves.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Persistent storage backed by the operating system credential store,
/// one keyring entry per key under a fixed service name.
pub struct KeyringStore {
    service: String,
}

impl KeyringStore {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, key: &str) -> Option<Entry> {
        match Entry::new(&self.service, key) {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!(key, %err, "unable to open keyring entry");
                None
            }
        }
    }
}

impl KeyValueStore for KeyringStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entry(key)?.get_password().ok()
    }

    fn set(&self, key: &str, value: &str) {
        let Some(entry) = self.entry(key) else {
            return;
        };
        if let Err(err) = entry.set_password(value) {
            warn!(key, %err, "unable to update keyring entry");
        }
    }

    fn remove(&self, key: &str) {
        let Some(entry) = self.entry(key) else {
            return;
        };
        // A missing entry is fine: removal is used to clear a session,
        // and half of it may never have been written.
        match entry.delete_password() {
            Ok(()) | Err(keyring::Error::NoEntry) => {}
            Err(err) => warn!(key, %err, "unable to delete keyring entry"),
        }
    }
}

/// In-process storage for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values.lock().unwrap().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_values() {
        let store = MemoryStore::new();
        assert_eq!(store.get("token"), None);

        store.set("token", "abc");
        assert_eq!(store.get("token"), Some("abc".to_string()));

        store.set("token", "def");
        assert_eq!(store.get("token"), Some("def".to_string()));

        store.remove("token");
        assert_eq!(store.get("token"), None);
    }

    #[test]
    fn memory_store_remove_is_idempotent() {
        let store = MemoryStore::new();
        store.remove("never-written");
        assert_eq!(store.get("never-written"), None);
    }
}
