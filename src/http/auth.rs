use super::error::ApiError;
use super::AppState;
use crate::domain::Identity;
use crate::session_actor::SessionError;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;

/// Extractor for the verified caller. Requests without a valid bearer
/// credential are refused with 401 before any handler runs.
#[derive(Debug, Clone)]
pub struct Authenticated(pub Identity);

impl FromRequestParts<AppState> for Authenticated {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let credential = bearer_credential(&parts.headers)?;
        let identity = state.sessions.verify(credential).await?;
        Ok(Authenticated(identity))
    }
}

/// Reads `Authorization: Bearer <credential>`.
pub fn bearer_credential(headers: &HeaderMap) -> Result<&str, SessionError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(SessionError::MissingCredential)?;

    let (scheme, credential) = value
        .trim()
        .split_once(' ')
        .ok_or(SessionError::MissingCredential)?;
    if !scheme.eq_ignore_ascii_case("bearer") || credential.trim().is_empty() {
        return Err(SessionError::MissingCredential);
    }
    Ok(credential.trim())
}
