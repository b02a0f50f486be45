//! Session state machine.

use crate::error::AuthError;

/// Whether a user is currently logged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No token stored.
    #[default]
    LoggedOut,
    /// A token and profile are stored.
    LoggedIn,
}

/// Something that happened to the stored session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Login, signup or social login succeeded.
    Created,
    /// Logout.
    Destroyed,
    /// Profile fields were changed.
    ProfileUpdated,
}

impl SessionState {
    /// Derive the state from whether session data is stored.
    pub fn from_presence(present: bool) -> Self {
        if present {
            SessionState::LoggedIn
        } else {
            SessionState::LoggedOut
        }
    }

    /// Compute the state after `event`.
    ///
    /// Destroying an absent session is a no-op. Updating the profile
    /// without a session is an error, not a transition.
    pub fn apply(self, event: SessionEvent) -> crate::Result<SessionState> {
        use SessionState::*;
        match (self, event) {
            (_, SessionEvent::Created) => Ok(LoggedIn),
            (_, SessionEvent::Destroyed) => Ok(LoggedOut),
            (LoggedIn, SessionEvent::ProfileUpdated) => Ok(LoggedIn),
            (LoggedOut, SessionEvent::ProfileUpdated) => Err(AuthError::NotAuthenticated),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self, SessionState::LoggedIn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events() {
        use SessionEvent::*;
        use SessionState::*;

        assert_eq!(LoggedOut.apply(Created).unwrap(), LoggedIn);
        assert_eq!(LoggedIn.apply(Created).unwrap(), LoggedIn);
        assert_eq!(LoggedIn.apply(ProfileUpdated).unwrap(), LoggedIn);
        assert_eq!(LoggedIn.apply(Destroyed).unwrap(), LoggedOut);
        assert_eq!(LoggedOut.apply(Destroyed).unwrap(), LoggedOut);
        assert!(matches!(
            LoggedOut.apply(ProfileUpdated),
            Err(AuthError::NotAuthenticated)
        ));
    }

    #[test]
    fn test_from_presence() {
        assert!(SessionState::from_presence(true).is_logged_in());
        assert!(!SessionState::from_presence(false).is_logged_in());
        assert_eq!(SessionState::default(), SessionState::LoggedOut);
    }
}
