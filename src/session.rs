use crate::error::app_error::AppError;
use crate::models::auth::{AuthSession, UserProfile};
use crate::storage::KeyValueStore;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

pub const AUTH_TOKEN_KEY: &str = "auth_token";
pub const USER_DATA_KEY: &str = "user_data";

/// The signed-in session, cached in memory and mirrored to a `KeyValueStore`.
/// Concurrent writers are not merged; the last one wins.
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
    current: RwLock<Option<AuthSession>>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            current: RwLock::new(None),
        }
    }

    /// Reloads a previously persisted session. A stored token without readable
    /// profile data still restores, with an empty profile.
    pub async fn restore(&self) -> Result<Option<AuthSession>, AppError> {
        let Some(token) = self.store.get(AUTH_TOKEN_KEY).await?.filter(|token| !token.is_empty()) else {
            return Ok(None);
        };

        let user = match self.store.get(USER_DATA_KEY).await? {
            Some(raw) => serde_json::from_str::<UserProfile>(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "Stored user data is unreadable, keeping token only");
                UserProfile::default()
            }),
            None => UserProfile::default(),
        };

        let session = AuthSession { token, user };
        *self.current.write().await = Some(session.clone());
        debug!("Session restored");
        Ok(Some(session))
    }

    /// Persists `session` and makes it current. The token is written last, so a
    /// failed write leaves nothing `restore` would load, and the in-memory
    /// session is cleared along with it.
    pub async fn sign_in(&self, session: AuthSession) -> Result<(), AppError> {
        let user_data = serde_json::to_string(&session.user).map_err(|e| AppError::storage("Failed to encode user data", e))?;

        let mut current = self.current.write().await;
        if let Err(e) = self.persist(&session.token, user_data).await {
            warn!(error = ?e, "Failed to persist session, signed out");
            *current = None;
            return Err(e);
        }
        *current = Some(session);
        Ok(())
    }

    async fn persist(&self, token: &str, user_data: String) -> Result<(), AppError> {
        self.store.remove(AUTH_TOKEN_KEY).await?;
        self.store.set(USER_DATA_KEY, user_data).await?;
        self.store.set(AUTH_TOKEN_KEY, token.to_string()).await
    }

    pub async fn current(&self) -> Option<AuthSession> {
        self.current.read().await.clone()
    }

    pub async fn token(&self) -> Option<String> {
        self.current.read().await.as_ref().map(|session| session.token.clone())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }

    pub async fn clear(&self) -> Result<(), AppError> {
        let mut current = self.current.write().await;
        self.store.remove(AUTH_TOKEN_KEY).await?;
        self.store.remove(USER_DATA_KEY).await?;
        *current = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use serde_json::json;

    fn session(token: &str) -> AuthSession {
        AuthSession {
            token: token.to_string(),
            user: UserProfile {
                first_name: Some("Ana".to_string()),
                document_number: Some("12345678".to_string()),
                ..UserProfile::default()
            },
        }
    }

    #[tokio::test]
    async fn sign_in_persists_token_and_wire_format_profile() {
        let store = Arc::new(MemoryStore::new());
        let sessions = SessionStore::new(store.clone());

        sessions.sign_in(session("t1")).await.unwrap();

        assert!(sessions.is_authenticated().await);
        assert_eq!(sessions.token().await.as_deref(), Some("t1"));
        assert_eq!(store.get(AUTH_TOKEN_KEY).await.unwrap().as_deref(), Some("t1"));

        let raw = store.get(USER_DATA_KEY).await.unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["nombresUsuario"], json!("Ana"));
        assert_eq!(value["numeroDocumento"], json!("12345678"));
    }

    #[tokio::test]
    async fn restore_reads_back_what_sign_in_wrote() {
        let store = Arc::new(MemoryStore::new());
        SessionStore::new(store.clone()).sign_in(session("t1")).await.unwrap();

        let fresh = SessionStore::new(store);
        assert!(!fresh.is_authenticated().await);
        let restored = fresh.restore().await.unwrap().unwrap();
        assert_eq!(restored, session("t1"));
        assert_eq!(fresh.current().await, Some(session("t1")));
    }

    #[tokio::test]
    async fn restore_without_token_is_none() {
        let store = Arc::new(MemoryStore::new());
        store.set(USER_DATA_KEY, "{}".to_string()).await.unwrap();
        assert_eq!(SessionStore::new(store).restore().await.unwrap(), None);
    }

    #[tokio::test]
    async fn restore_tolerates_corrupt_profile() {
        let store = Arc::new(MemoryStore::new());
        store.set(AUTH_TOKEN_KEY, "t1".to_string()).await.unwrap();
        store.set(USER_DATA_KEY, "{broken".to_string()).await.unwrap();

        let restored = SessionStore::new(store).restore().await.unwrap().unwrap();
        assert_eq!(restored.token, "t1");
        assert_eq!(restored.user, UserProfile::default());
    }

    /// Fails every `set` of one key.
    struct FailingStore {
        inner: MemoryStore,
        failing_key: std::sync::Mutex<Option<&'static str>>,
    }

    impl FailingStore {
        fn new() -> Self {
            Self {
                inner: MemoryStore::new(),
                failing_key: std::sync::Mutex::new(None),
            }
        }

        fn fail_on(&self, key: &'static str) {
            *self.failing_key.lock().unwrap() = Some(key);
        }
    }

    #[async_trait::async_trait]
    impl KeyValueStore for FailingStore {
        async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: String) -> Result<(), AppError> {
            if *self.failing_key.lock().unwrap() == Some(key) {
                return Err(AppError::storage("Failed to write", key));
            }
            self.inner.set(key, value).await
        }

        async fn remove(&self, key: &str) -> Result<bool, AppError> {
            self.inner.remove(key).await
        }
    }

    #[tokio::test]
    async fn failed_profile_write_never_mixes_sessions() {
        let store = Arc::new(FailingStore::new());
        let sessions = SessionStore::new(store.clone());
        sessions.sign_in(session("alice-token")).await.unwrap();

        store.fail_on(USER_DATA_KEY);
        let mut bob = session("bob-token");
        bob.user.first_name = Some("Bob".to_string());
        assert!(matches!(sessions.sign_in(bob).await, Err(AppError::Storage { .. })));

        assert_eq!(sessions.current().await, None);
        assert_eq!(store.get(AUTH_TOKEN_KEY).await.unwrap(), None);
        assert_eq!(SessionStore::new(store.clone()).restore().await.unwrap(), None);
    }

    #[tokio::test]
    async fn failed_token_write_leaves_nothing_to_restore() {
        let store = Arc::new(FailingStore::new());
        let sessions = SessionStore::new(store.clone());
        sessions.sign_in(session("alice-token")).await.unwrap();

        store.fail_on(AUTH_TOKEN_KEY);
        assert!(sessions.sign_in(session("bob-token")).await.is_err());

        assert!(!sessions.is_authenticated().await);
        assert_eq!(SessionStore::new(store.clone()).restore().await.unwrap(), None);
    }

    #[tokio::test]
    async fn last_sign_in_wins_and_clear_removes_everything() {
        let store = Arc::new(MemoryStore::new());
        let sessions = SessionStore::new(store.clone());

        sessions.sign_in(session("t1")).await.unwrap();
        sessions.sign_in(session("t2")).await.unwrap();
        assert_eq!(sessions.token().await.as_deref(), Some("t2"));

        sessions.clear().await.unwrap();
        assert!(!sessions.is_authenticated().await);
        assert_eq!(store.get(AUTH_TOKEN_KEY).await.unwrap(), None);
        assert_eq!(store.get(USER_DATA_KEY).await.unwrap(), None);
    }
}
