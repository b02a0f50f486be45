//! Session management module.
//!
//! This module provides the persisted session (auth token plus user
//! profile), the credentials that create it, and the state derived from it.

mod credentials;
mod profile;
mod state;
mod store;
mod token;

pub use credentials::{require_email, Credentials};
pub use profile::{ProfileUpdate, Provider, UserProfile, DEFAULT_AVATAR_URL};
pub use state::{SessionEvent, SessionState};
pub use store::{Session, SessionStore, AUTH_TOKEN_KEY, USER_DATA_KEY};
pub use token::{generate_user_id, AuthToken, USER_ID_RANGE};
