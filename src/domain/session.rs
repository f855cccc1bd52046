use super::{Identity, Role};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// An issued credential. Exists from login until logout.
#[derive(Clone, PartialEq)]
pub struct Session {
    pub credential: String,
    pub user_id: String,
    pub role: Role,
    pub issued_at: DateTime<Utc>,
}

impl Session {
    pub fn identity(&self) -> Identity {
        Identity::new(self.user_id.clone(), self.role, self.credential.clone())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("role", &self.role)
            .field("issued_at", &self.issued_at)
            .finish_non_exhaustive()
    }
}

/// Payload for issuing a session. A fixed `credential` is honoured when given.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCreate {
    #[serde(default)]
    pub credential: Option<String>,
    pub user_id: String,
    pub role: Role,
}

impl std::fmt::Debug for SessionCreate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCreate")
            .field("user_id", &self.user_id)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}
