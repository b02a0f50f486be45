//! Session persistence on top of a key-value store.

use tracing::{debug, warn};

use super::{AuthToken, SessionEvent, SessionState, UserProfile};
use crate::storage::KeyValueStorage;
use crate::Result;

/// Storage key holding the raw token string.
pub const AUTH_TOKEN_KEY: &str = "auth_token";
/// Storage key holding the JSON-encoded profile.
pub const USER_DATA_KEY: &str = "user_data";

/// A logged-in session: token and profile, always stored together.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: AuthToken,
    pub profile: UserProfile,
}

impl Session {
    pub fn new(token: AuthToken, profile: UserProfile) -> Self {
        Self { token, profile }
    }
}

/// Durable storage for the current session.
///
/// Token and profile are written in one batch and cleared in one batch, so
/// the store never holds one without the other.
#[derive(Debug)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: KeyValueStorage> SessionStore<S> {
    /// Create a session store over the given storage.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Get the underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Persist a session, replacing whatever was stored before.
    pub async fn save(&self, session: &Session) -> Result<()> {
        let user_data = serde_json::to_string(&session.profile)?;
        self.storage
            .set_many(&[
                (AUTH_TOKEN_KEY, session.token.as_str().to_string()),
                (USER_DATA_KEY, user_data),
            ])
            .await?;
        debug!(user_id = %session.profile.id, "session saved");
        Ok(())
    }

    /// Replace the profile of the session holding `token`. The token is kept.
    ///
    /// Fails with `NotAuthenticated` once that session has been destroyed or
    /// replaced, so a profile is never written without its token.
    pub async fn save_profile(&self, token: &AuthToken, profile: &UserProfile) -> Result<()> {
        let current = self.load_token().await?;
        SessionState::from_presence(current.as_ref() == Some(token))
            .apply(SessionEvent::ProfileUpdated)?;

        let user_data = serde_json::to_string(profile)?;
        self.storage.set(USER_DATA_KEY, user_data).await
    }

    /// Remove both session keys. Removing absent keys is a no-op.
    pub async fn clear(&self) -> Result<()> {
        self.storage
            .remove_many(&[AUTH_TOKEN_KEY, USER_DATA_KEY])
            .await?;
        debug!("session cleared");
        Ok(())
    }

    /// Read the stored token, propagating storage errors.
    ///
    /// An empty stored string counts as no token.
    pub async fn load_token(&self) -> Result<Option<AuthToken>> {
        let raw = self.storage.get(AUTH_TOKEN_KEY).await?;
        Ok(raw.filter(|t| !t.is_empty()).map(AuthToken::from_raw))
    }

    /// Read the stored profile, propagating storage errors.
    ///
    /// A record that does not decode is reported as absent.
    pub async fn load_profile(&self) -> Result<Option<UserProfile>> {
        let Some(raw) = self.storage.get(USER_DATA_KEY).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(profile) => Ok(Some(profile)),
            Err(e) => {
                warn!(error = %e, "stored user data is malformed");
                Ok(None)
            }
        }
    }

    /// Read both halves of the session, propagating storage errors.
    ///
    /// `None` unless a token and a decodable profile are both stored.
    pub async fn load_session(&self) -> Result<Option<Session>> {
        let Some(token) = self.load_token().await? else {
            return Ok(None);
        };
        Ok(self
            .load_profile()
            .await?
            .map(|profile| Session::new(token, profile)))
    }

    /// The stored token, or `None` if absent or unreadable.
    pub async fn token(&self) -> Option<AuthToken> {
        self.load_token().await.unwrap_or_else(|e| {
            warn!(error = %e, "failed to read auth token");
            None
        })
    }

    /// The stored profile, or `None` if absent, malformed or unreadable.
    pub async fn profile(&self) -> Option<UserProfile> {
        self.load_profile().await.unwrap_or_else(|e| {
            warn!(error = %e, "failed to read user data");
            None
        })
    }

    /// Whether a token is stored. Storage failures read as `false`.
    pub async fn has_active_session(&self) -> bool {
        self.token().await.is_some()
    }

    /// Current state derived from token presence.
    pub async fn state(&self) -> SessionState {
        SessionState::from_presence(self.has_active_session().await)
    }

    /// The full session, if both halves are readable.
    pub async fn session(&self) -> Option<Session> {
        let token = self.token().await?;
        let profile = self.profile().await?;
        Some(Session::new(token, profile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthError;
    use crate::storage::MemoryStorage;

    fn sample_session() -> Session {
        Session::new(
            AuthToken::from_raw("mock_jwt_token_abc"),
            UserProfile::new("user1", "a@x.com").with_name("A"),
        )
    }

    #[tokio::test]
    async fn test_save_writes_both_keys() {
        let store = SessionStore::new(MemoryStorage::new());
        store.save(&sample_session()).await.unwrap();

        let snap = store.storage().snapshot().unwrap();
        assert_eq!(snap[AUTH_TOKEN_KEY], "mock_jwt_token_abc");
        let stored: serde_json::Value = serde_json::from_str(&snap[USER_DATA_KEY]).unwrap();
        assert_eq!(stored["email"], "a@x.com");
        assert_eq!(stored["name"], "A");
    }

    #[tokio::test]
    async fn test_session_roundtrip() {
        let store = SessionStore::new(MemoryStorage::new());
        assert_eq!(store.state().await, SessionState::LoggedOut);

        let session = sample_session();
        store.save(&session).await.unwrap();

        assert_eq!(store.state().await, SessionState::LoggedIn);
        assert_eq!(store.session().await, Some(session));
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let store = SessionStore::new(MemoryStorage::new());
        store.save(&sample_session()).await.unwrap();

        store.clear().await.unwrap();
        store.clear().await.unwrap();

        assert!(!store.has_active_session().await);
        assert!(store.profile().await.is_none());
        assert!(store.storage().is_empty().unwrap());
    }

    #[tokio::test]
    async fn test_malformed_profile_reads_absent() {
        let storage = MemoryStorage::with_entries([(USER_DATA_KEY, "{oops")]);
        let store = SessionStore::new(storage);

        assert!(store.profile().await.is_none());
        assert!(store.load_profile().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_empty_token_reads_absent() {
        let storage = MemoryStorage::with_entries([(AUTH_TOKEN_KEY, "")]);
        let store = SessionStore::new(storage);

        assert!(!store.has_active_session().await);
    }

    #[tokio::test]
    async fn test_save_profile_keeps_token() {
        let store = SessionStore::new(MemoryStorage::new());
        store.save(&sample_session()).await.unwrap();

        let renamed = UserProfile::new("user1", "a@x.com").with_name("B");
        let token = AuthToken::from_raw("mock_jwt_token_abc");
        store.save_profile(&token, &renamed).await.unwrap();

        let session = store.session().await.unwrap();
        assert_eq!(session.token.as_str(), "mock_jwt_token_abc");
        assert_eq!(session.profile.name.as_deref(), Some("B"));
    }

    #[tokio::test]
    async fn test_save_profile_requires_matching_token() {
        let store = SessionStore::new(MemoryStorage::new());
        let profile = UserProfile::new("user1", "a@x.com");
        let token = AuthToken::from_raw("mock_jwt_token_abc");

        // No session at all
        let err = store.save_profile(&token, &profile).await.unwrap_err();
        assert!(matches!(err, AuthError::NotAuthenticated));
        assert!(store.storage().is_empty().unwrap());

        // A different session took over
        let other = Session::new(AuthToken::from_raw("mock_jwt_token_new"), profile.clone());
        store.save(&other).await.unwrap();
        let err = store
            .save_profile(&token, &profile.clone().with_name("B"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::NotAuthenticated));
        assert_eq!(store.session().await, Some(other));
    }

    #[tokio::test]
    async fn test_load_session_needs_both_halves() {
        let token_only = SessionStore::new(MemoryStorage::with_entries([(AUTH_TOKEN_KEY, "t")]));
        assert!(token_only.load_session().await.unwrap().is_none());

        let profile_only = SessionStore::new(MemoryStorage::with_entries([(
            USER_DATA_KEY,
            r#"{"id":"u1","email":"a@x.com"}"#,
        )]));
        assert!(profile_only.load_session().await.unwrap().is_none());

        let store = SessionStore::new(MemoryStorage::new());
        store.save(&sample_session()).await.unwrap();
        assert_eq!(store.load_session().await.unwrap(), Some(sample_session()));
    }
}
