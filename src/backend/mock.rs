//! Mock backend that simulates a remote auth service locally.
//!
//! No credentials are checked. Each call waits a configurable delay,
//! synthesizes an identity and writes it through the [`SessionStore`].

use std::time::Duration;

use async_trait::async_trait;
use tracing::{error, info};

use super::AuthBackend;
use crate::error::AuthError;
use crate::session::{
    generate_user_id, require_email, AuthToken, Credentials, ProfileUpdate, Provider, Session,
    SessionStore, UserProfile, DEFAULT_AVATAR_URL,
};
use crate::storage::KeyValueStorage;
use crate::Result;

/// Token prefix for email/password sessions.
pub const DIRECT_TOKEN_PREFIX: &str = "mock_jwt_token_";

/// Behaviour knobs for the mock backend.
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Delay applied to every mutating call.
    pub latency: Duration,
    /// Avatar given to direct signups and logins.
    pub default_avatar: String,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            latency: Duration::from_millis(1000),
            default_avatar: DEFAULT_AVATAR_URL.to_string(),
        }
    }
}

impl MockConfig {
    /// Config with no simulated delay.
    pub fn instant() -> Self {
        Self {
            latency: Duration::ZERO,
            ..Default::default()
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

/// Canned identity handed out by a social provider.
struct SocialIdentity {
    id_prefix: &'static str,
    name: &'static str,
    email: &'static str,
    avatar: &'static str,
    token_prefix: &'static str,
}

fn social_identity(provider: Provider) -> SocialIdentity {
    match provider {
        Provider::Google => SocialIdentity {
            id_prefix: "google_user_",
            name: "Google User",
            email: "user@gmail.com",
            avatar: "https://example.com/google-avatar.png",
            token_prefix: "mock_google_jwt_token_",
        },
        Provider::Facebook => SocialIdentity {
            id_prefix: "fb_user_",
            name: "Facebook User",
            email: "user@facebook.com",
            avatar: "https://example.com/fb-avatar.png",
            token_prefix: "mock_fb_jwt_token_",
        },
    }
}

fn logged<T>(op: &'static str, result: Result<T>) -> Result<T> {
    if let Err(ref e) = result {
        error!(op, error = %e, "auth operation failed");
    }
    result
}

/// Local stand-in for a real authentication service.
#[derive(Debug)]
pub struct MockAuthBackend<S> {
    store: SessionStore<S>,
    config: MockConfig,
}

impl<S: KeyValueStorage> MockAuthBackend<S> {
    /// Create a backend over `storage` with default settings.
    pub fn new(storage: S) -> Self {
        Self::with_config(storage, MockConfig::default())
    }

    pub fn with_config(storage: S, config: MockConfig) -> Self {
        Self {
            store: SessionStore::new(storage),
            config,
        }
    }

    /// Get the session store.
    pub fn store(&self) -> &SessionStore<S> {
        &self.store
    }

    pub fn config(&self) -> &MockConfig {
        &self.config
    }

    async fn simulate_latency(&self) {
        if !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }
    }

    async fn login_or_signup(&self, credentials: Credentials) -> Result<Session> {
        credentials.validate()?;
        self.simulate_latency().await;

        let mut profile = UserProfile::new(generate_user_id("user"), credentials.email())
            .with_avatar(self.config.default_avatar.clone());
        if let Some(name) = credentials.name() {
            profile = profile.with_name(name);
        }

        let session = Session::new(AuthToken::generate(DIRECT_TOKEN_PREFIX), profile);
        self.store.save(&session).await?;
        Ok(session)
    }

    async fn social_login(&self, provider: Provider) -> Result<Session> {
        self.simulate_latency().await;

        let identity = social_identity(provider);
        let profile = UserProfile::new(generate_user_id(identity.id_prefix), identity.email)
            .with_name(identity.name)
            .with_avatar(identity.avatar)
            .with_provider(provider);

        let session = Session::new(AuthToken::generate(identity.token_prefix), profile);
        self.store.save(&session).await?;
        Ok(session)
    }

    async fn password_reset(&self, email: &str) -> Result<bool> {
        require_email(email)?;
        self.simulate_latency().await;
        Ok(true)
    }

    async fn merge_profile(&self, update: ProfileUpdate) -> Result<UserProfile> {
        let session = self
            .store
            .load_session()
            .await?
            .ok_or(AuthError::NotAuthenticated)?;

        let updated = session.profile.merged(update)?;
        self.simulate_latency().await;

        // The session may have ended during the delay
        self.store.save_profile(&session.token, &updated).await?;
        Ok(updated)
    }
}

#[async_trait]
impl<S: KeyValueStorage> AuthBackend for MockAuthBackend<S> {
    async fn create_session(&self, credentials: Credentials) -> Result<Session> {
        let kind = if credentials.is_signup() { "signup" } else { "login" };
        let session = logged(kind, self.login_or_signup(credentials).await)?;
        info!(user_id = %session.profile.id, kind, "session created");
        Ok(session)
    }

    async fn create_social_session(&self, provider: Provider) -> Result<Session> {
        let session = logged("social_login", self.social_login(provider).await)?;
        info!(user_id = %session.profile.id, %provider, "social session created");
        Ok(session)
    }

    async fn destroy_session(&self) -> Result<()> {
        logged("logout", self.store.clear().await)?;
        info!("session destroyed");
        Ok(())
    }

    async fn has_active_session(&self) -> bool {
        self.store.has_active_session().await
    }

    async fn current_profile(&self) -> Option<UserProfile> {
        self.store.profile().await
    }

    async fn token(&self) -> Option<AuthToken> {
        self.store.token().await
    }

    async fn request_password_reset(&self, email: &str) -> Result<bool> {
        let sent = logged("password_reset", self.password_reset(email).await)?;
        info!("password reset requested");
        Ok(sent)
    }

    async fn update_profile(&self, update: ProfileUpdate) -> Result<UserProfile> {
        let profile = logged("update_profile", self.merge_profile(update).await)?;
        info!(user_id = %profile.id, "profile updated");
        Ok(profile)
    }
}
