use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::types::chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Header map of a destination. `serde_json` is built with `preserve_order`,
/// so the map keeps the key order the owner submitted.
pub type Headers = serde_json::Map<String, Value>;

/// A stored, user-owned template for an outbound HTTP call.
#[derive(Debug, FromRow, Serialize, Clone, PartialEq)]
pub struct Destination {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub url: String,
    pub http_method: String,
    pub headers: Option<Json<Headers>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// The mutable fields of a destination, as submitted on create and edit.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct NewDestination {
    pub url: String,
    pub http_method: String,
    pub headers: Option<Headers>,
}

impl NewDestination {
    /// Write-time validation shared by create and edit. The method is an open
    /// set here, only forwarding restricts it to GET/POST/PUT.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.url.is_empty() {
            return Err(StoreError::Validation("Url not found".to_string()));
        }

        if !self.url.starts_with("http") {
            return Err(StoreError::Validation("Invalid url".to_string()));
        }

        if self.http_method.is_empty() {
            return Err(StoreError::Validation("Method not found".to_string()));
        }

        if let Some(headers) = &self.headers {
            for (key, value) in headers {
                if !value.is_string() {
                    return Err(StoreError::Validation(format!("Header {key} must be a string")));
                }
            }
        }

        Ok(())
    }
}

impl Destination {
    pub fn new(
        owner_id: Uuid,
        new_destination: &NewDestination,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            owner_id,
            url: new_destination.url.clone(),
            http_method: new_destination.http_method.clone(),
            headers: new_destination.headers.clone().map(Json),
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}
