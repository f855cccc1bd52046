use super::error::SessionError;
use crate::actor_framework::Entity;
use crate::domain::{Session, SessionCreate};
use chrono::Utc;

impl Entity for Session {
    type Id = String;
    type CreateParams = SessionCreate;
    type Action = ();
    type ActionResult = ();
    type Error = SessionError;

    fn requested_id(params: &SessionCreate) -> Option<String> {
        params.credential.clone()
    }

    fn from_create_params(credential: String, params: SessionCreate) -> Result<Self, SessionError> {
        if params.user_id.trim().is_empty() {
            return Err(SessionError::ValidationError("user id required".to_string()));
        }
        if credential.trim().is_empty() {
            return Err(SessionError::ValidationError("credential must not be blank".to_string()));
        }
        Ok(Self {
            credential,
            user_id: params.user_id,
            role: params.role,
            issued_at: Utc::now(),
        })
    }

    /// Sessions carry no custom actions.
    fn handle_action(&mut self, _action: ()) -> Result<(), SessionError> {
        Ok(())
    }
}
