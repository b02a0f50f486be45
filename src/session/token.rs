//! Opaque auth tokens and mock account identifiers.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::AuthError;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 11;

/// Upper bound (exclusive) for the numeric part of a mock account ID.
pub const USER_ID_RANGE: u32 = 1000;

/// Opaque auth token.
///
/// The token is only a presence marker for "logged in". It looks
/// unguessable but carries no signature and is not cryptographically
/// secure.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuthToken(String);

impl AuthToken {
    /// Generate a fresh token: `prefix` followed by a random base-36 suffix.
    pub fn generate(prefix: &str) -> Self {
        let mut rng = rand::rng();
        let mut token = String::with_capacity(prefix.len() + SUFFIX_LEN);
        token.push_str(prefix);
        token.extend((0..SUFFIX_LEN).map(|_| BASE36[rng.random_range(0..BASE36.len())] as char));
        Self(token)
    }

    /// Wrap a raw token string, e.g. one read back from storage.
    pub fn from_raw(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AuthToken {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(AuthError::validation("token is empty"));
        }
        Ok(Self(s.to_string()))
    }
}

/// Generate a mock account ID such as `user42` or `google_user_917`.
pub fn generate_user_id(prefix: &str) -> String {
    let n = rand::rng().random_range(0..USER_ID_RANGE);
    format!("{prefix}{n}")
}
