mod navigate;
mod storage;

pub use navigate::{LoggingNavigator, Navigator, LOGIN_ROUTE};
pub use storage::{KeyValueStore, KeyringStore, MemoryStore};

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Storage key for the current bearer token.
pub const ACCESS_TOKEN_KEY: &str = "secbase_access_token";
/// Storage key for the longer-lived refresh token.
pub const REFRESH_TOKEN_KEY: &str = "secbase_refresh_token";
/// Storage key for the last-known cached user-identity JSON.
pub const USER_PROFILE_KEY: &str = "secbase_user";

/// An access/refresh token pair as issued by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Session credentials persisted across page loads (or process runs).
///
/// The two tokens are only ever written or cleared as a pair, so the
/// client never runs with a fresh access token and a stale refresh token
/// or vice versa. The cached user profile lives and dies with them.
pub struct Session {
    store: Arc<dyn KeyValueStore>,
}

impl Session {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn access_token(&self) -> Option<String> {
        self.store.get(ACCESS_TOKEN_KEY)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.store.get(REFRESH_TOKEN_KEY)
    }

    /// Replaces both tokens together. No await point sits between the two
    /// writes, so within one task the pair is updated atomically.
    pub fn store_tokens(&self, tokens: &TokenPair) {
        self.store.set(ACCESS_TOKEN_KEY, &tokens.access_token);
        self.store.set(REFRESH_TOKEN_KEY, &tokens.refresh_token);
    }

    pub fn store_profile(&self, profile_json: &str) {
        self.store.set(USER_PROFILE_KEY, profile_json);
    }

    pub fn cached_profile(&self) -> Option<String> {
        self.store.get(USER_PROFILE_KEY)
    }

    /// Removes tokens and the cached profile together, never leaving a
    /// half-cleared credential state behind.
    pub fn clear(&self) {
        self.store.remove(ACCESS_TOKEN_KEY);
        self.store.remove(REFRESH_TOKEN_KEY);
        self.store.remove(USER_PROFILE_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_over_memory() -> (Session, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (Session::new(store.clone()), store)
    }

    #[test]
    fn store_tokens_writes_both_keys() {
        let (session, store) = session_over_memory();
        session.store_tokens(&TokenPair {
            access_token: "access-1".to_string(),
            refresh_token: "refresh-1".to_string(),
        });

        assert_eq!(store.get(ACCESS_TOKEN_KEY), Some("access-1".to_string()));
        assert_eq!(store.get(REFRESH_TOKEN_KEY), Some("refresh-1".to_string()));
    }

    #[test]
    fn clear_removes_tokens_and_profile_together() {
        let (session, store) = session_over_memory();
        session.store_tokens(&TokenPair {
            access_token: "access-1".to_string(),
            refresh_token: "refresh-1".to_string(),
        });
        session.store_profile(r#"{"id":"u1"}"#);

        session.clear();

        assert_eq!(store.get(ACCESS_TOKEN_KEY), None);
        assert_eq!(store.get(REFRESH_TOKEN_KEY), None);
        assert_eq!(store.get(USER_PROFILE_KEY), None);
    }

    #[test]
    fn cached_profile_round_trips() {
        let (session, _store) = session_over_memory();
        assert_eq!(session.cached_profile(), None);

        session.store_profile(r#"{"id":"u1","displayName":"Ada"}"#);
        assert_eq!(
            session.cached_profile(),
            Some(r#"{"id":"u1","displayName":"Ada"}"#.to_string())
        );
    }
}
