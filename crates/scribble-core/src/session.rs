//! Local user context.
//!
//! There is no authentication: a session simply holds the user drawings are
//! saved for. Saving requires a signed-in user.

use crate::storage::{KeyValueStore, StorageError, StorageResult};
use serde::{Deserialize, Serialize};

/// Key the signed-in user is persisted under.
pub const CURRENT_USER_KEY: &str = "currentUser";

/// A local user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// The active user, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    /// A session with nobody signed in.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(user: User) -> Self {
        Self { user: Some(user) }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn sign_in(&mut self, user: User) {
        log::info!("Signed in as {} ({})", user.name, user.id);
        self.user = Some(user);
    }

    pub fn sign_out(&mut self) {
        self.user = None;
    }

    /// Restore the persisted user. A missing entry yields an anonymous session.
    pub fn load(storage: &impl KeyValueStore) -> StorageResult<Self> {
        match storage.get(CURRENT_USER_KEY)? {
            Some(json) => {
                let user = serde_json::from_str(&json)
                    .map_err(|e| StorageError::Serialization(e.to_string()))?;
                Ok(Self::signed_in(user))
            }
            None => Ok(Self::anonymous()),
        }
    }

    /// Persist the current user, or remove the entry when signed out.
    pub fn store(&self, storage: &impl KeyValueStore) -> StorageResult<()> {
        match &self.user {
            Some(user) => {
                let json = serde_json::to_string(user)
                    .map_err(|e| StorageError::Serialization(e.to_string()))?;
                storage.set(CURRENT_USER_KEY, &json)
            }
            None => storage.remove(CURRENT_USER_KEY),
        }
    }
}
