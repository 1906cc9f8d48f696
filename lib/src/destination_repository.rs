use crate::destination::{Destination, NewDestination};
use crate::error::StoreError;
use sqlx::types::Json;
use sqlx::{Pool, Postgres};
use tracing::instrument;
use uuid::Uuid;

/// CRUD persistence for destinations. Every by-id operation is scoped to the
/// owner, an id of another user behaves exactly like an unknown id.
pub struct DestinationRepository;

impl DestinationRepository {
    #[instrument(skip_all)]
    pub async fn insert(
        pool: &Pool<Postgres>,
        owner_id: Uuid,
        new_destination: &NewDestination,
    ) -> Result<Destination, StoreError> {
        new_destination.validate()?;

        let destination = Destination::new(owner_id, new_destination);

        let sql = r#"
        insert into destination
            (id, owner_id, url, http_method, headers, created_at)
        values
            ($1, $2, $3, $4, $5, $6)
        "#;

        sqlx::query(sql)
            .bind(destination.id)
            .bind(destination.owner_id)
            .bind(&destination.url)
            .bind(&destination.http_method)
            .bind(&destination.headers)
            .bind(destination.created_at)
            .execute(pool)
            .await
            .map_err(|error| StoreError::Persistence(format!("Failed to insert destination for owner {owner_id}: {error}")))?;

        Ok(destination)
    }

    #[instrument(skip_all)]
    pub async fn list_by_owner(
        pool: &Pool<Postgres>,
        owner_id: Uuid,
    ) -> Result<Vec<Destination>, StoreError> {
        let sql = r#"
        select *
        from destination
        where owner_id = $1
        order by created_at, id
        "#;

        sqlx::query_as(sql)
            .bind(owner_id)
            .fetch_all(pool)
            .await
            .map_err(|error| StoreError::Persistence(format!("Failed to list destinations for owner {owner_id}: {error}")))
    }

    #[instrument(skip_all)]
    pub async fn find_by_id(
        pool: &Pool<Postgres>,
        owner_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Destination>, StoreError> {
        let sql = r#"
        select *
        from destination
        where id = $1 and owner_id = $2
        "#;

        sqlx::query_as(sql)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
            .map_err(|error| StoreError::Persistence(format!("Failed to fetch destination {id}: {error}")))
    }

    /// Full replacement of url, method and headers. Headers are overwritten,
    /// not merged.
    #[instrument(skip_all)]
    pub async fn update(
        pool: &Pool<Postgres>,
        owner_id: Uuid,
        id: Uuid,
        new_destination: &NewDestination,
    ) -> Result<Destination, StoreError> {
        new_destination.validate()?;

        let sql = r#"
        update destination
        set url = $3, http_method = $4, headers = $5, updated_at = now()
        where id = $1 and owner_id = $2
        returning *
        "#;

        sqlx::query_as(sql)
            .bind(id)
            .bind(owner_id)
            .bind(&new_destination.url)
            .bind(&new_destination.http_method)
            .bind(new_destination.headers.clone().map(Json))
            .fetch_optional(pool)
            .await
            .map_err(|error| StoreError::Persistence(format!("Failed to update destination {id}: {error}")))?
            .ok_or(StoreError::NotFound)
    }

    #[instrument(skip_all)]
    pub async fn delete(
        pool: &Pool<Postgres>,
        owner_id: Uuid,
        id: Uuid,
    ) -> Result<(), StoreError> {
        let sql = r#"
        delete from destination
        where id = $1 and owner_id = $2
        "#;

        let result = sqlx::query(sql)
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await
            .map_err(|error| StoreError::Persistence(format!("Failed to delete destination {id}: {error}")))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}
