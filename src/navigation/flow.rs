//! Screen controllers for the signup, login and home screens.
//!
//! Each handler calls the backend and moves the navigation stack only when
//! the call succeeds. On failure the current screen stays put and the error
//! is handed back for the screen to show.

use tracing::{debug, warn};

use super::{NavigationStack, Route};
use crate::backend::AuthBackend;
use crate::session::{Credentials, ProfileUpdate, Provider, Session, UserProfile};
use crate::Result;

/// Drives navigation from authentication results.
#[derive(Debug)]
pub struct AuthFlow<B> {
    backend: B,
    stack: NavigationStack,
}

impl<B: AuthBackend> AuthFlow<B> {
    /// Create a flow starting on the initial screen.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            stack: NavigationStack::default(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn stack(&self) -> &NavigationStack {
        &self.stack
    }

    /// Screen currently shown.
    pub fn current(&self) -> Route {
        self.stack.current()
    }

    /// Sync the screen with the stored session.
    ///
    /// Jumps to Home when a session survived from a previous run, and back
    /// to Login when a protected screen is showing without one.
    pub async fn restore(&mut self) -> Route {
        if self.backend.has_active_session().await {
            self.stack.reset(Route::Home);
        } else if self.current().requires_session() {
            self.stack.reset(Route::Login);
        }
        self.current()
    }

    /// "Sign Up" button.
    pub async fn submit_signup(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Session> {
        let result = self
            .backend
            .create_session(Credentials::signup(name, email, password))
            .await;
        self.enter_home(result)
    }

    /// "Log In" button.
    pub async fn submit_login(&mut self, email: &str, password: &str) -> Result<Session> {
        let result = self
            .backend
            .create_session(Credentials::login(email, password))
            .await;
        self.enter_home(result)
    }

    /// Google or Facebook button, on either screen.
    pub async fn social_login(&mut self, provider: Provider) -> Result<Session> {
        let result = self.backend.create_social_session(provider).await;
        self.enter_home(result)
    }

    /// "Forgot password?" link.
    pub async fn forgot_password(&self, email: &str) -> Result<bool> {
        self.backend.request_password_reset(email).await
    }

    /// Profile edit from the home screen.
    pub async fn edit_profile(&self, update: ProfileUpdate) -> Result<UserProfile> {
        self.backend.update_profile(update).await
    }

    /// Log out and show the login screen with no history.
    pub async fn logout(&mut self) -> Result<Route> {
        self.backend.destroy_session().await?;
        self.stack.reset(Route::Login);
        Ok(self.current())
    }

    /// "Already have an account? Log In" link.
    pub fn show_login(&mut self) -> Route {
        self.stack.navigate(Route::Login);
        self.current()
    }

    /// "Don't have an account? Sign Up" link.
    pub fn show_signup(&mut self) -> Route {
        self.stack.navigate(Route::Signup);
        self.current()
    }

    /// Hardware or header back button.
    pub fn go_back(&mut self) -> bool {
        self.stack.go_back()
    }

    fn enter_home(&mut self, result: Result<Session>) -> Result<Session> {
        match result {
            Ok(session) => {
                self.stack.navigate(Route::Home);
                debug!(route = %self.current(), "navigated after sign-in");
                Ok(session)
            }
            Err(e) => {
                warn!(route = %self.current(), error = %e, "sign-in failed, staying on screen");
                Err(e)
            }
        }
    }
}
