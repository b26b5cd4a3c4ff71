//! `AuthUser` extractor: pulls the JWT from the Authorization header,
//! validates it, and loads the acting user.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tracing::debug;

use studiohub_core::error::AppError;
use studiohub_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or_else(|| AppError::authentication("Not authenticated"))?;

        let claims = state.jwt_decoder.decode_access_token(token)?;

        // The stored role wins over the one baked into the token.
        let user = state
            .stores
            .users
            .find_user(claims.user_id())
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(|| {
                debug!(user_id = claims.user_id(), "Token subject missing or inactive");
                AppError::authentication("Could not validate credentials")
            })?;

        Ok(AuthUser(RequestContext::new(
            user.id,
            user.role,
            state.clock.now(),
        )))
    }
}
