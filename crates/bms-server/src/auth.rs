use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;

use bms_session::SessionGuard;
use bms_types::{Role, Session};

use crate::error::ServerError;
use crate::state::AppState;

/// Credentials presented with a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credentials {
    Bearer(String),
    Anonymous,
}

impl Credentials {
    /// Read an `Authorization: Bearer <token>` header. The scheme name is
    /// case-insensitive; anything else is anonymous.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().split_once(' '))
            .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
            .map(|(_, token)| token.trim())
            .filter(|token| !token.is_empty())
            .map_or(Self::Anonymous, |token| Self::Bearer(token.to_string()))
    }
}

/// Extractor for handlers that require the admin role.
///
/// Rejects with 401 when no credential or an unknown one is presented, and
/// with 403 when the session lacks the admin role.
#[derive(Clone, Debug)]
pub struct AdminSession(pub Session);

#[async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Credentials::Bearer(token) = Credentials::from_headers(&parts.headers) else {
            return Err(ServerError::Unauthorized);
        };
        let session = state.guard.resolve(&token)?.ok_or(ServerError::Unauthorized)?;
        if !SessionGuard::is_authorized(Some(&session), Role::Admin) {
            return Err(ServerError::Forbidden);
        }
        Ok(Self(session))
    }
}
