use crate::actor_framework::ResourceClient;
use crate::domain::{Identity, Session, SessionCreate};
use crate::session_actor::SessionError;
use tracing::{debug, info, instrument, warn};

/// Client for the session actor. This is the identity collaborator: it
/// turns a bearer credential into an [`Identity`].
#[derive(Clone)]
pub struct SessionClient {
    inner: ResourceClient<Session>,
}

impl_client_new!(SessionClient, Session);

impl SessionClient {
    /// Issues a session (login). The credential is generated unless the
    /// payload fixes one.
    #[instrument(skip(self, params), fields(user_id = %params.user_id, role = %params.role))]
    pub async fn issue(&self, params: SessionCreate) -> Result<Session, SessionError> {
        debug!("Sending request");
        let session = self.inner.create(params).await?;
        info!("Session issued");
        Ok(session)
    }

    /// Resolves a credential to the identity it was issued for.
    #[instrument(skip_all)]
    pub async fn verify(&self, credential: &str) -> Result<Identity, SessionError> {
        debug!("Sending request");
        if credential.trim().is_empty() {
            return Err(SessionError::MissingCredential);
        }
        match self.inner.get(credential.to_string()).await? {
            Some(session) => Ok(session.identity()),
            None => {
                warn!("Unknown credential presented");
                Err(SessionError::InvalidCredential)
            }
        }
    }

    /// Revokes a session (logout). Later `verify` calls with the same
    /// credential fail.
    #[instrument(skip_all)]
    pub async fn revoke(&self, credential: &str) -> Result<(), SessionError> {
        debug!("Sending request");
        self.inner.delete(credential.to_string()).await?;
        info!("Session revoked");
        Ok(())
    }
}
