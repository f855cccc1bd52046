use serde::{Deserialize, Serialize};
use std::fmt;

/// Role claim asserted by the identity collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// The verified caller of an engine operation.
///
/// Produced once by [`crate::clients::SessionClient::verify`] and passed
/// explicitly into every call; nothing reads identity from ambient state.
#[derive(Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub role: Role,
    pub credential: String,
}

impl Identity {
    pub fn new(user_id: impl Into<String>, role: Role, credential: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            role,
            credential: credential.into(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Owners and admins may read a user's orders.
    pub fn can_access(&self, user_id: &str) -> bool {
        self.is_admin() || self.user_id == user_id
    }
}

// The credential stays out of logs and panic messages.
impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("user_id", &self.user_id)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}
