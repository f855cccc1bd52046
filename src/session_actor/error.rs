use crate::actor_framework::FrameworkError;
use thiserror::Error;

/// Errors that can occur while verifying or managing sessions.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SessionError {
    #[error("Missing credential")]
    MissingCredential,
    #[error("Invalid or revoked credential")]
    InvalidCredential,
    #[error("Credential already issued")]
    AlreadyIssued,
    #[error("Session validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError<SessionError>> for SessionError {
    fn from(error: FrameworkError<SessionError>) -> Self {
        match error {
            // Ids are credentials here; never echo them back.
            FrameworkError::NotFound(_) => SessionError::InvalidCredential,
            FrameworkError::AlreadyExists(_) => SessionError::AlreadyIssued,
            FrameworkError::Entity(e) => e,
            other => SessionError::ActorCommunicationError(other.to_string()),
        }
    }
}
