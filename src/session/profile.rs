//! User profile record and partial updates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::AuthError;

/// Placeholder avatar used when none is supplied.
pub const DEFAULT_AVATAR_URL: &str = "https://example.com/default-avatar.png";

/// Third-party identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Google,
    Facebook,
}

impl Provider {
    /// All supported providers.
    pub const ALL: [Provider; 2] = [Provider::Google, Provider::Facebook];

    /// Lowercase tag as persisted in the profile.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Google => "google",
            Provider::Facebook => "facebook",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(Provider::Google),
            "facebook" => Ok(Provider::Facebook),
            other => Err(AuthError::validation(format!(
                "unsupported provider '{other}' (expected google or facebook)"
            ))),
        }
    }
}

/// The stored record describing the current user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
    #[serde(default = "default_avatar")]
    pub avatar: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<Provider>,
    /// Fields this crate does not model, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_avatar() -> String {
    DEFAULT_AVATAR_URL.to_string()
}

impl UserProfile {
    /// Create a profile with the default avatar and no provider.
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            email: email.into(),
            avatar: default_avatar(),
            provider: None,
            extra: Map::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = avatar.into();
        self
    }

    pub fn with_provider(mut self, provider: Provider) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Apply a partial update.
    ///
    /// Shallow override: every supplied field replaces the current value,
    /// every absent field is kept. Nested JSON values in `extra` are replaced
    /// whole, never merged. Loose fields named after a modelled field
    /// (`id`, `name`, `email`, `avatar`, `provider`) land on that field, and
    /// the typed setters on [`ProfileUpdate`] win over them.
    ///
    /// Nothing changes if any field has the wrong type.
    pub fn apply(&mut self, update: ProfileUpdate) -> crate::Result<()> {
        let mut next = self.clone();
        for (key, value) in update.extra {
            next.set_field(key, value)?;
        }
        if let Some(name) = update.name {
            next.name = Some(name);
        }
        if let Some(email) = update.email {
            next.email = email;
        }
        if let Some(avatar) = update.avatar {
            next.avatar = avatar;
        }
        if let Some(provider) = update.provider {
            next.provider = Some(provider);
        }
        *self = next;
        Ok(())
    }

    /// Return a copy with `update` applied.
    pub fn merged(&self, update: ProfileUpdate) -> crate::Result<Self> {
        let mut next = self.clone();
        next.apply(update)?;
        Ok(next)
    }

    fn set_field(&mut self, key: String, value: Value) -> crate::Result<()> {
        match key.as_str() {
            "id" => self.id = string_field(&key, value)?,
            "email" => self.email = string_field(&key, value)?,
            "avatar" => self.avatar = string_field(&key, value)?,
            "name" => {
                self.name = match value {
                    Value::Null => None,
                    other => Some(string_field(&key, other)?),
                }
            }
            "provider" => {
                self.provider = match value {
                    Value::Null => None,
                    other => Some(string_field(&key, other)?.parse::<Provider>()?),
                }
            }
            _ => {
                self.extra.insert(key, value);
            }
        }
        Ok(())
    }
}

fn string_field(key: &str, value: Value) -> crate::Result<String> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(AuthError::validation(format!(
            "profile field '{key}' must be a string, got {other}"
        ))),
    }
}

/// Fields to override on the current profile. `None` means "keep".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<Provider>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProfileUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// Set a field by name.
    ///
    /// Names outside the modelled set are stored as extra profile data.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Check whether the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.avatar.is_none()
            && self.provider.is_none()
            && self.extra.is_empty()
    }
}
