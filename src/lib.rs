//! # travel-auth
//!
//! Session store and mock authentication backend for the travel app shell.
//!
//! The crate keeps the current login (an opaque token plus the user's
//! profile) in a local key-value store and exposes the operations the
//! signup, login and home screens need. There is no server: the
//! [`MockAuthBackend`] simulates one with random identities and a timed
//! delay.
//!
//! ## Features
//!
//! - **Pluggable storage**: in-memory or JSON file, behind [`KeyValueStorage`]
//! - **Consistent sessions**: token and profile are written and cleared in one batch
//! - **Replaceable backend**: screens depend on the [`AuthBackend`] trait only
//! - **Navigation**: [`AuthFlow`] moves between screens based on results
//!
//! ## Quick Start
//!
//! ```no_run
//! use travel_auth::{AuthBackend, Credentials, MemoryStorage, MockAuthBackend, MockConfig};
//!
//! #[tokio::main]
//! async fn main() -> travel_auth::Result<()> {
//!     travel_auth::logging::try_init(None).ok();
//!
//!     let backend = MockAuthBackend::with_config(MemoryStorage::new(), MockConfig::instant());
//!
//!     let session = backend
//!         .create_session(Credentials::signup("Ada", "ada@example.com", "secret"))
//!         .await?;
//!     println!("logged in as {} ({})", session.profile.email, session.profile.id);
//!
//!     backend.destroy_session().await?;
//!     assert!(!backend.has_active_session().await);
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod navigation;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use backend::{AuthBackend, MockAuthBackend, MockConfig};
pub use error::{AuthError, Result};
pub use navigation::{AuthFlow, NavigationStack, Route};
pub use session::{
    AuthToken, Credentials, ProfileUpdate, Provider, Session, SessionState, SessionStore,
    UserProfile,
};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
