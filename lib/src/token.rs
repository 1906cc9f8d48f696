use crate::destination::Headers;
use crate::error::{ForwardError, StoreError};
use sqlx::{FromRow, Pool, Postgres};
use tracing::instrument;
use uuid::Uuid;

pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// A row of the external token store. Tokens are issued elsewhere, this crate
/// only resolves and validates them.
#[derive(Debug, FromRow, Clone, PartialEq)]
pub struct AccessToken {
    pub key: String,
    pub user_id: Uuid,
}

/// Extracts the key from an `Authorization` value of the form
/// `"<scheme> <key>"`. The scheme word is not interpreted.
pub fn bearer_key(header_value: &str) -> Option<&str> {
    header_value.split_whitespace().nth(1)
}

pub struct AccessTokenRepository;

impl AccessTokenRepository {
    #[instrument(skip_all)]
    pub async fn find_by_key(
        pool: &Pool<Postgres>,
        key: &str,
    ) -> Result<Option<AccessToken>, StoreError> {
        let sql = r#"
        select key, user_id
        from auth_token
        where key = $1
        "#;

        sqlx::query_as(sql)
            .bind(key)
            .fetch_optional(pool)
            .await
            .map_err(|error| StoreError::Persistence(format!("Failed to fetch access token: {error}")))
    }

    /// Pre-flight check run before any outbound call: when the submitted
    /// headers carry an `Authorization` entry, some currently-valid token must
    /// exist for its key. Headers without that entry pass untouched.
    pub async fn verify_embedded_authorization(
        pool: &Pool<Postgres>,
        headers: Option<&Headers>,
    ) -> Result<(), ForwardError> {
        let Some(value) = headers.and_then(|headers| headers.get(AUTHORIZATION_HEADER)) else {
            return Ok(());
        };

        let key = value
            .as_str()
            .and_then(bearer_key)
            .ok_or_else(|| ForwardError::Unauthorized("Authorization credentials not found".to_string()))?;

        match Self::find_by_key(pool, key).await {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(ForwardError::Unauthorized("Authorization credentials not found".to_string())),
            Err(error) => Err(ForwardError::Internal(error.to_string())),
        }
    }
}
