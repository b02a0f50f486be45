//! Sign-in and sign-up credentials.

use std::fmt;

use crate::error::AuthError;
use crate::Result;

/// Credentials submitted by the login or signup screen.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Existing account: email and password.
    Login { email: String, password: String },
    /// New account: name, email and password.
    Signup {
        name: String,
        email: String,
        password: String,
    },
}

impl Credentials {
    pub fn login(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Login {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn signup(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self::Signup {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// Check that every required field is present.
    ///
    /// Name and email must contain something other than whitespace; the
    /// password only has to be non-empty.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Login { email, password } => {
                if email.trim().is_empty() || password.is_empty() {
                    return Err(AuthError::validation("Email and password are required"));
                }
            }
            Self::Signup {
                name,
                email,
                password,
            } => {
                if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
                    return Err(AuthError::validation(
                        "Name, email, and password are required",
                    ));
                }
            }
        }
        Ok(())
    }

    pub fn email(&self) -> &str {
        match self {
            Self::Login { email, .. } | Self::Signup { email, .. } => email,
        }
    }

    /// Display name, only supplied at signup.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Login { .. } => None,
            Self::Signup { name, .. } => Some(name),
        }
    }

    pub fn is_signup(&self) -> bool {
        matches!(self, Self::Signup { .. })
    }
}

// Passwords never reach logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Login { email, .. } => f
                .debug_struct("Login")
                .field("email", email)
                .field("password", &"<redacted>")
                .finish(),
            Self::Signup { name, email, .. } => f
                .debug_struct("Signup")
                .field("name", name)
                .field("email", email)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}

/// Validate an email for password reset.
pub fn require_email(email: &str) -> Result<()> {
    if email.trim().is_empty() {
        return Err(AuthError::validation("Email is required"));
    }
    Ok(())
}
