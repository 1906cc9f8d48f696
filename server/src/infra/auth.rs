use crate::infra::error::AppError;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use destination_relay::app_state::AppState;
use destination_relay::token::{bearer_key, AccessTokenRepository};
use uuid::Uuid;

/// Resolves the request's `Authorization: <scheme> <key>` header against the
/// token store. Destination endpoints receive the owner identity through this
/// extractor, never from ambient request state.
pub struct AuthenticatedUser(pub Uuid);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let key = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_key)
            .ok_or_else(|| AppError::unauthorized("Authorization credentials not provided"))?;

        let token = AccessTokenRepository::find_by_key(&state.postgres_pool, key)
            .await
            .map_err(|error| AppError::new(&error.to_string(), "Failed to verify authorization credentials"))?
            .ok_or_else(|| AppError::unauthorized("Authorization credentials not found"))?;

        Ok(Self(token.user_id))
    }
}
