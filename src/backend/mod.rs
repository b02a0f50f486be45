//! Authentication backends.
//!
//! Screens talk to an [`AuthBackend`] rather than to storage directly, so a
//! network-backed implementation can replace the mock without touching
//! callers.

mod mock;

use async_trait::async_trait;

use crate::session::{AuthToken, Credentials, ProfileUpdate, Provider, Session, UserProfile};
use crate::Result;

pub use mock::{MockAuthBackend, MockConfig};

/// The operations available to screen controllers.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Log in or sign up, replacing any current session.
    async fn create_session(&self, credentials: Credentials) -> Result<Session>;

    /// Log in through a third-party provider, replacing any current session.
    async fn create_social_session(&self, provider: Provider) -> Result<Session>;

    /// Log out. Succeeds when no session exists.
    async fn destroy_session(&self) -> Result<()>;

    /// Whether a user is logged in. Never fails; errors read as `false`.
    async fn has_active_session(&self) -> bool;

    /// The current profile, or `None` if absent or unreadable.
    async fn current_profile(&self) -> Option<UserProfile>;

    /// The current token, or `None` if absent or unreadable.
    async fn token(&self) -> Option<AuthToken>;

    /// Ask for a password reset email.
    async fn request_password_reset(&self, email: &str) -> Result<bool>;

    /// Merge `update` into the current profile and persist it.
    async fn update_profile(&self, update: ProfileUpdate) -> Result<UserProfile>;
}
